use std::borrow::Cow;

use encoding_rs::{EUC_JP, Encoding, UTF_8};

use crate::error::SourceError;

/// Turns the raw bytes of one dictionary line into text
pub trait LineDecoder: Send + Sync {
    fn encoding(&self) -> &'static Encoding;

    // Default decoder: strict, no replacement characters
    fn decode<'a>(&self, raw: &'a [u8], index: usize) -> Result<Cow<'a, str>, SourceError> {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let encoding = self.encoding();

        encoding
            .decode_without_bom_handling_and_without_replacement(raw)
            .ok_or(SourceError::Decode {
                index,
                encoding: encoding.name(),
            })
    }
}

/// Decoder for any WHATWG encoding label
#[derive(Debug, Clone, Copy)]
pub struct EncodingDecoder {
    encoding: &'static Encoding,
}

impl EncodingDecoder {
    /// KANJIDIC ships in EUC-JP
    pub fn euc_jp() -> Self {
        Self { encoding: EUC_JP }
    }

    pub fn utf8() -> Self {
        Self { encoding: UTF_8 }
    }

    pub fn for_label(label: &str) -> Result<Self, SourceError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| SourceError::UnknownEncoding(label.to_string()))
    }
}

impl Default for EncodingDecoder {
    fn default() -> Self {
        Self::euc_jp()
    }
}

impl LineDecoder for EncodingDecoder {
    fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_euc_jp() {
        let decoder = EncodingDecoder::euc_jp();
        // 木 4C7A in JIS X 0208
        let line = decoder.decode(b"\xCC\xFA 4C7A U6728", 1).unwrap();
        assert_eq!(line, "木 4C7A U6728");
    }

    #[test]
    fn test_decode_strips_carriage_return() {
        let decoder = EncodingDecoder::utf8();
        let line = decoder.decode("水 3F65 U6c34\r".as_bytes(), 3).unwrap();
        assert_eq!(line, "水 3F65 U6c34");
    }

    #[test]
    fn test_decode_rejects_invalid_bytes() {
        let decoder = EncodingDecoder::euc_jp();
        let err = decoder.decode(b"\xFF\xFF", 7).unwrap_err();
        assert!(matches!(err, SourceError::Decode { index: 7, .. }));
    }

    #[test]
    fn test_for_label() {
        assert_eq!(EncodingDecoder::for_label("euc-jp").unwrap().encoding(), EUC_JP);
        assert_eq!(EncodingDecoder::for_label(" utf8 ").unwrap().encoding(), UTF_8);
        assert!(matches!(
            EncodingDecoder::for_label("klingon"),
            Err(SourceError::UnknownEncoding(_))
        ));
    }
}
