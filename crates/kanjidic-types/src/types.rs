use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One parsed KANJIDIC line.
///
/// `character`, `jis_code` and `unicode_code` are always present; every other
/// field is filled only when its tag occurs in the line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiRecord {
    pub character: String,
    /// JIS X 0208 code, hex
    pub jis_code: String,
    /// Unicode scalar value, hex without the `U`
    pub unicode_code: String,

    // Reference work indices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nelson: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radical_nelson: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halpern: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_nelson: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub henshall: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gakken: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heisig: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oneill: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morohashi: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuttle: Option<u32>,

    /// Classical radical, falls back to `radical_nelson`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radical: Option<u32>,
    /// SKIP code without the leading `P`, e.g. "1-2-2"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<String>,
    /// Morohashi "volume.page"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morohashi_page: Option<String>,
    /// `D<letter><index>` dictionary codes keyed by the letter
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional: HashMap<char, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spahn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub four_corner: Option<String>,

    #[serde(default)]
    pub korean: Vec<String>,
    #[serde(default)]
    pub pinyin: Vec<String>,
    #[serde(default)]
    pub meaning: Vec<String>,
    /// Kun-yomi
    #[serde(default)]
    pub hiragana: Vec<String>,
    /// On-yomi
    #[serde(default)]
    pub katakana: Vec<String>,

    pub joyo: bool,
}

impl KanjiRecord {
    /// Decode `unicode_code` into the scalar it names
    pub fn codepoint(&self) -> Option<char> {
        u32::from_str_radix(&self.unicode_code, 16)
            .ok()
            .and_then(char::from_u32)
    }

    /// On readings first, then kun readings, in file order
    pub fn readings(&self) -> impl Iterator<Item = &str> {
        self.katakana
            .iter()
            .chain(self.hiragana.iter())
            .map(String::as_str)
    }
}
