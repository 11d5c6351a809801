use std::sync::{Arc, LazyLock};

use kanjidic_types::KanjiRecord;
use regex::Regex;

use crate::joyo::JoyoSet;

/// First character of the header/comment line
pub const HEADER_MARKER: char = '#';

/// Whole whitespace-delimited token `prefix` + `body`, capturing `body`
fn tag(prefix: &str, body: &str) -> Regex {
    Regex::new(&format!(r"(?:^|\s){prefix}({body})(?:\s|$)")).unwrap()
}

static CHARACTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\S+)").unwrap());
static JIS_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([0-9A-Fa-f]+)(?:\s|$)").unwrap());
static UNICODE_CODE: LazyLock<Regex> = LazyLock::new(|| tag("U", "[0-9A-Fa-f]+"));

static SKIP: LazyLock<Regex> = LazyLock::new(|| tag("P", "[0-9-]+"));
static RADICAL: LazyLock<Regex> = LazyLock::new(|| tag("C", "[0-9]+"));
static MOROHASHI_PAGE: LazyLock<Regex> = LazyLock::new(|| tag("MP", r"[0-9]+\.[0-9]+"));
static ADDITIONAL: LazyLock<Regex> = LazyLock::new(|| tag("D", "[A-Za-z][0-9]+"));
static SPAHN: LazyLock<Regex> = LazyLock::new(|| tag("I", r"[0-9][a-z][0-9]+\.[0-9]+"));
static FOUR_CORNER: LazyLock<Regex> = LazyLock::new(|| tag("Q", r"[0-9]{4}\.[0-9]"));
static CROSS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)(X\S*)").unwrap());
static KOREAN: LazyLock<Regex> = LazyLock::new(|| tag("W", "[A-Za-z:]+[0-9]?"));
static PINYIN: LazyLock<Regex> = LazyLock::new(|| tag("Y", "[A-Za-z:]+[0-9]?"));
static MEANING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^}]*)\}").unwrap());
static HIRAGANA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\x{3041}-\x{309F}]+(?:\.[\x{3041}-\x{309F}]+)*)").unwrap()
});
static KATAKANA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([\x{30A1}-\x{30FF}]+)").unwrap());
static TRAILING_MARKER: LazyLock<Regex> = LazyLock::new(|| tag("T", "1"));

/// Reference works indexed by a tag and an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceWork {
    Morohashi,
    Tuttle,
    Nelson,
    RadicalNelson,
    Grade,
    Strokes,
    Halpern,
    Frequency,
    NewNelson,
    Henshall,
    Gakken,
    Heisig,
    Oneill,
}

impl ReferenceWork {
    /// Extraction order: two-letter tags come before any one-letter tag
    pub const ALL: [ReferenceWork; 13] = [
        ReferenceWork::Morohashi,
        ReferenceWork::Tuttle,
        ReferenceWork::Nelson,
        ReferenceWork::RadicalNelson,
        ReferenceWork::Grade,
        ReferenceWork::Strokes,
        ReferenceWork::Halpern,
        ReferenceWork::Frequency,
        ReferenceWork::NewNelson,
        ReferenceWork::Henshall,
        ReferenceWork::Gakken,
        ReferenceWork::Heisig,
        ReferenceWork::Oneill,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            ReferenceWork::Morohashi => "MN",
            ReferenceWork::Tuttle => "IN",
            ReferenceWork::Nelson => "N",
            ReferenceWork::RadicalNelson => "B",
            ReferenceWork::Grade => "G",
            ReferenceWork::Strokes => "S",
            ReferenceWork::Halpern => "H",
            ReferenceWork::Frequency => "F",
            ReferenceWork::NewNelson => "V",
            ReferenceWork::Henshall => "E",
            ReferenceWork::Gakken => "K",
            ReferenceWork::Heisig => "L",
            ReferenceWork::Oneill => "O",
        }
    }

    fn slot<'a>(&self, record: &'a mut KanjiRecord) -> &'a mut Option<u32> {
        match self {
            ReferenceWork::Morohashi => &mut record.morohashi,
            ReferenceWork::Tuttle => &mut record.tuttle,
            ReferenceWork::Nelson => &mut record.nelson,
            ReferenceWork::RadicalNelson => &mut record.radical_nelson,
            ReferenceWork::Grade => &mut record.grade,
            ReferenceWork::Strokes => &mut record.strokes,
            ReferenceWork::Halpern => &mut record.halpern,
            ReferenceWork::Frequency => &mut record.frequency,
            ReferenceWork::NewNelson => &mut record.new_nelson,
            ReferenceWork::Henshall => &mut record.henshall,
            ReferenceWork::Gakken => &mut record.gakken,
            ReferenceWork::Heisig => &mut record.heisig,
            ReferenceWork::Oneill => &mut record.oneill,
        }
    }
}

static REFERENCE_TAGS: LazyLock<Vec<(ReferenceWork, Regex)>> = LazyLock::new(|| {
    ReferenceWork::ALL
        .iter()
        .map(|work| (*work, tag(work.tag(), "[0-9]+")))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed record, no {field} in {line:?}")]
    Missing { field: &'static str, line: String },
}

impl ParseError {
    fn missing(field: &'static str, line: &str) -> Self {
        ParseError::Missing {
            field,
            line: line.to_string(),
        }
    }
}

/// The part of a line no rule has consumed yet
struct Remainder {
    text: String,
}

impl Remainder {
    fn new(line: &str) -> Self {
        Self {
            text: line.to_string(),
        }
    }

    /// Remove the leftmost match and return its first group
    fn take(&mut self, pattern: &Regex) -> Option<String> {
        let captures = pattern.captures(&self.text)?;
        let token = captures.get(0)?.range();
        let value = captures.get(1)?.as_str().to_string();
        self.text.replace_range(token, " ");
        Some(value)
    }

    fn take_all(&mut self, pattern: &Regex) -> Vec<String> {
        std::iter::from_fn(|| self.take(pattern)).collect()
    }

    fn take_number(&mut self, pattern: &Regex) -> Option<u32> {
        self.take(pattern).and_then(|v| v.parse().ok())
    }
}

/// Parse one decoded KANJIDIC line.
///
/// Returns `Ok(None)` for the header line and for blank lines. Tokens no rule
/// knows about are dropped.
pub fn parse_line(line: &str, joyo: &JoyoSet) -> Result<Option<KanjiRecord>, ParseError> {
    if line.starts_with(HEADER_MARKER) || line.trim().is_empty() {
        return Ok(None);
    }

    let mut rest = Remainder::new(line);
    // Meanings may hold spaces and tag-like words, so lift them out first
    let meaning = rest.take_all(&MEANING);

    let character = rest
        .take(&CHARACTER)
        .ok_or_else(|| ParseError::missing("character", line))?;
    let jis_code = rest
        .take(&JIS_CODE)
        .ok_or_else(|| ParseError::missing("jis_code", line))?;
    let unicode_code = rest
        .take(&UNICODE_CODE)
        .ok_or_else(|| ParseError::missing("unicode_code", line))?;

    let mut record = KanjiRecord {
        character,
        jis_code,
        unicode_code,
        meaning,
        ..Default::default()
    };

    for (work, pattern) in REFERENCE_TAGS.iter() {
        if let Some(value) = rest.take_number(pattern) {
            *work.slot(&mut record) = Some(value);
        }
    }

    record.skip = rest.take(&SKIP);
    record.radical = rest.take_number(&RADICAL).or(record.radical_nelson);
    record.morohashi_page = rest.take(&MOROHASHI_PAGE);

    for code in rest.take_all(&ADDITIONAL) {
        let mut chars = code.chars();
        if let (Some(letter), Ok(index)) = (chars.next(), chars.as_str().parse()) {
            record.additional.insert(letter, index);
        }
    }

    record.spahn = rest.take(&SPAHN);
    record.four_corner = rest.take(&FOUR_CORNER);
    rest.take_all(&CROSS_REFERENCE);

    record.korean = rest.take_all(&KOREAN);
    record.pinyin = rest.take_all(&PINYIN);
    record.hiragana = rest.take_all(&HIRAGANA);
    record.katakana = rest.take_all(&KATAKANA);
    rest.take(&TRAILING_MARKER);

    record.joyo = joyo.contains(&record.character);

    let leftover = rest.text.split_whitespace().collect::<Vec<_>>();
    if !leftover.is_empty() {
        tracing::trace!(
            "Unrecognized tokens for {}: {}",
            record.character,
            leftover.join(" ")
        );
    }

    Ok(Some(record))
}

/// Line parser bound to a joyo set
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    joyo: Arc<JoyoSet>,
}

impl RecordParser {
    pub fn new(joyo: Arc<JoyoSet>) -> Self {
        Self { joyo }
    }

    pub fn joyo(&self) -> &JoyoSet {
        &self.joyo
    }

    pub fn parse(&self, line: &str) -> Result<Option<KanjiRecord>, ParseError> {
        parse_line(line, &self.joyo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = "木 4C7A U6728 B75 G1 S4 F10 N3843 {tree} {wood} き こ ボク モク";
    const ASIA: &str = "亜 3021 U4e9c B1 C7 G8 S7 XJ13F59 F1509 J1 N43 V81 H3540 DP4354 \
                        DK2204 DL2966 L1809 DN1950 K1331 O525 DO1788 MN272 MP1.0525 E997 \
                        IN1616 DA1724 DS1 DF1032 DT1092 DJ1818 DG35 DM1827 P4-7-1 I0a7.14 \
                        Q1010.6 DR3273 Yya4 Wa ア つ.ぐ T1 や つぎ つぐ {Asia} {rank next} \
                        {come after} {-ous}";

    fn parser() -> RecordParser {
        RecordParser::new(Arc::new(JoyoSet::from_chars(['木', '亜'])))
    }

    fn parse(line: &str) -> KanjiRecord {
        parser().parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_tree_line() {
        let record = parse(TREE);

        let expected = KanjiRecord {
            character: "木".to_string(),
            jis_code: "4C7A".to_string(),
            unicode_code: "6728".to_string(),
            radical_nelson: Some(75),
            radical: Some(75),
            grade: Some(1),
            strokes: Some(4),
            frequency: Some(10),
            nelson: Some(3843),
            meaning: vec!["tree".to_string(), "wood".to_string()],
            hiragana: vec!["き".to_string(), "こ".to_string()],
            katakana: vec!["ボク".to_string(), "モク".to_string()],
            joyo: true,
            ..Default::default()
        };
        assert_eq!(record, expected);
    }

    #[test]
    fn test_full_line() {
        let record = parse(ASIA);

        assert_eq!(record.character, "亜");
        assert_eq!(record.jis_code, "3021");
        assert_eq!(record.unicode_code, "4e9c");
        assert_eq!(record.radical_nelson, Some(1));
        assert_eq!(record.radical, Some(7));
        assert_eq!(record.grade, Some(8));
        assert_eq!(record.strokes, Some(7));
        assert_eq!(record.frequency, Some(1509));
        assert_eq!(record.nelson, Some(43));
        assert_eq!(record.new_nelson, Some(81));
        assert_eq!(record.halpern, Some(3540));
        assert_eq!(record.heisig, Some(1809));
        assert_eq!(record.gakken, Some(1331));
        assert_eq!(record.oneill, Some(525));
        assert_eq!(record.morohashi, Some(272));
        assert_eq!(record.henshall, Some(997));
        assert_eq!(record.tuttle, Some(1616));
        assert_eq!(record.morohashi_page.as_deref(), Some("1.0525"));
        assert_eq!(record.skip.as_deref(), Some("4-7-1"));
        assert_eq!(record.spahn.as_deref(), Some("0a7.14"));
        assert_eq!(record.four_corner.as_deref(), Some("1010.6"));
        assert_eq!(record.pinyin, vec!["ya4"]);
        assert_eq!(record.korean, vec!["a"]);
        assert_eq!(record.katakana, vec!["ア"]);
        assert_eq!(record.hiragana, vec!["つ.ぐ", "や", "つぎ", "つぐ"]);
        assert_eq!(
            record.meaning,
            vec!["Asia", "rank next", "come after", "-ous"]
        );
        assert!(record.joyo);

        assert_eq!(record.additional.len(), 13);
        assert_eq!(record.additional.get(&'P'), Some(&4354));
        assert_eq!(record.additional.get(&'S'), Some(&1));
        assert_eq!(record.additional.get(&'R'), Some(&3273));
        assert_eq!(record.additional.get(&'N'), Some(&1950));
    }

    #[test]
    fn test_header_is_not_a_record() {
        let parser = parser();
        assert_eq!(parser.parse("# KANJIDIC JIS X 0208 Kanji Dictionary").unwrap(), None);
        assert_eq!(parser.parse("#").unwrap(), None);
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(ASIA), parse(ASIA));
    }

    #[test]
    fn test_missing_character() {
        let err = RecordParser::default().parse(" 4C7A U6728").unwrap_err();
        assert!(matches!(err, ParseError::Missing { field: "character", .. }));
    }

    #[test]
    fn test_blank_line_is_not_a_record() {
        let parser = RecordParser::default();
        assert_eq!(parser.parse(""), Ok(None));
        assert_eq!(parser.parse("   "), Ok(None));
        assert_eq!(parser.parse("\t \u{3000}"), Ok(None));
    }

    #[test]
    fn test_missing_jis_code() {
        let err = RecordParser::default().parse("木 U6728 N3843").unwrap_err();
        assert_eq!(
            err,
            ParseError::Missing {
                field: "jis_code",
                line: "木 U6728 N3843".to_string()
            }
        );
    }

    #[test]
    fn test_missing_unicode_code() {
        let err = RecordParser::default().parse("木 4C7A N3843 {tree}").unwrap_err();
        assert!(matches!(err, ParseError::Missing { field: "unicode_code", .. }));
    }

    #[test]
    fn test_two_letter_tags_do_not_corrupt_one_letter_tags() {
        let record = parse("漢 3441 U6f22 MN17987 N2668 IN558 H537 B85");
        assert_eq!(record.morohashi, Some(17987));
        assert_eq!(record.nelson, Some(2668));
        assert_eq!(record.tuttle, Some(558));
        assert_eq!(record.halpern, Some(537));

        // Same tags, one-letter ones first on the line
        let record = parse("漢 3441 U6f22 N2668 H537 MN17987 IN558");
        assert_eq!(record.morohashi, Some(17987));
        assert_eq!(record.nelson, Some(2668));
        assert_eq!(record.tuttle, Some(558));
        assert_eq!(record.halpern, Some(537));
    }

    #[test]
    fn test_radical_fallback() {
        let record = parse("木 4C7A U6728 B75");
        assert_eq!(record.radical_nelson, Some(75));
        assert_eq!(record.radical, Some(75));

        let record = parse("亜 3021 U4e9c B1 C7");
        assert_eq!(record.radical_nelson, Some(1));
        assert_eq!(record.radical, Some(7));

        let record = parse("亜 3021 U4e9c C7");
        assert_eq!(record.radical_nelson, None);
        assert_eq!(record.radical, Some(7));

        let record = parse("亜 3021 U4e9c");
        assert_eq!(record.radical, None);
    }

    #[test]
    fn test_meaning_order_kept() {
        let record = parse("木 4C7A U6728 {tree} {wood}");
        assert_eq!(record.meaning, vec!["tree", "wood"]);

        let record = parse("木 4C7A U6728 {wood} {tree}");
        assert_eq!(record.meaning, vec!["wood", "tree"]);
    }

    #[test]
    fn test_meaning_text_is_not_read_as_tags() {
        let record = parse("椚 5D4B U691a {(kokuji) N1 oak} {sawtooth oak}");
        assert_eq!(record.nelson, None);
        assert_eq!(record.meaning, vec!["(kokuji) N1 oak", "sawtooth oak"]);
    }

    #[test]
    fn test_joyo_membership() {
        let joyo = JoyoSet::from_chars(['水']);
        let water = parse_line("水 3F65 U6c34", &joyo).unwrap().unwrap();
        let tree = parse_line(TREE, &joyo).unwrap().unwrap();
        assert!(water.joyo);
        assert!(!tree.joyo);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let record = parse("亜 3021 U4e9c S7 S8");
        assert_eq!(record.strokes, Some(7));
    }

    #[test]
    fn test_unknown_tokens_tolerated() {
        let record = parse("木 4C7A U6728 ZZ9 J1 XJ13F59 N3843 &");
        assert_eq!(record.nelson, Some(3843));
        assert!(record.meaning.is_empty());
    }

    #[test]
    fn test_nanori_after_marker_go_to_hiragana() {
        let record = parse("木 4C7A U6728 き こ- T1 もと");
        assert_eq!(record.hiragana, vec!["き", "こ", "もと"]);
        assert!(record.katakana.is_empty());
    }

    #[test]
    fn test_reference_tag_order_is_two_letter_first() {
        let all = ReferenceWork::ALL;
        let first_single = all.iter().position(|w| w.tag().len() == 1).unwrap();

        assert!(first_single > 0);
        assert!(all[..first_single].iter().all(|w| w.tag().len() == 2));
        assert!(all[first_single..].iter().all(|w| w.tag().len() == 1));
    }
}
