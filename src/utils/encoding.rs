// Encoding utilities

use encoding_rs::UTF_8;

/// Text encoding types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Latin1,
    Utf16,
    Utf16Be,
    Utf8,
    Unknown(u8),
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => TextEncoding::Latin1,
            1 => TextEncoding::Utf16,
            2 => TextEncoding::Utf16Be,
            3 => TextEncoding::Utf8,
            other => TextEncoding::Unknown(other),
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            TextEncoding::Latin1 => 0,
            TextEncoding::Utf16 => 1,
            TextEncoding::Utf16Be => 2,
            TextEncoding::Utf8 => 3,
            TextEncoding::Unknown(byte) => byte,
        }
    }

    /// Only ISO-8859-1 and UTF-8 text is decoded
    pub fn is_supported(self) -> bool {
        matches!(self, TextEncoding::Latin1 | TextEncoding::Utf8)
    }

    /// Strings in this encoding end in a two byte terminator
    pub fn is_wide(self) -> bool {
        matches!(self, TextEncoding::Utf16 | TextEncoding::Utf16Be)
    }
}

/// Decode text with specified encoding
///
/// Returns `None` for encodings that are not supported. Trailing
/// terminators are dropped, malformed UTF-8 is replaced with U+FFFD.
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> Option<String> {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let data = &data[..end];

    match encoding {
        TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(data).into_owned()),
        TextEncoding::Utf8 => {
            let (text, had_errors) = UTF_8.decode_without_bom_handling(data);
            if had_errors {
                log::debug!("Replaced malformed UTF-8 sequences in {} byte(s) of text", data.len());
            }
            Some(text.into_owned())
        }
        _ => None,
    }
}
