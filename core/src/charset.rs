//! Charset detection from response headers and body decoding.
//!
//! Labels are resolved through `encoding_rs`, except for ISO-8859-1 and
//! US-ASCII, which the WHATWG label table folds into windows-1252. Those two
//! keep their strict meaning here: latin-1 maps every byte to the code point of
//! the same value and ASCII rejects any byte above 0x7f. A bare `utf-16` label
//! honors a byte order mark and falls back to little-endian.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

use crate::error::ClientError;

/// Character encodings the client can decode a body with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Latin1,
    Ascii,
    /// UTF-16 with byte order taken from a leading BOM.
    Utf16,
    Other(&'static Encoding),
}

impl Charset {
    /// Looks up a charset by name, ignoring case and treating `-` and `_`
    /// as the same character.
    pub fn lookup(name: &str) -> Result<Self, ClientError> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
            .collect();

        match normalized.as_str() {
            "utf-8" | "utf8" | "u8" | "utf" => return Ok(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "iso8859" | "8859" | "latin-1" | "latin1" | "latin"
            | "l1" | "cp819" | "ibm819" | "iso-ir-100" => return Ok(Charset::Latin1),
            "us-ascii" | "ascii" | "646" | "us" | "cp367" | "ibm367" | "csascii" | "iso646-us"
            | "iso-ir-6" | "ansi-x3.4-1968" => return Ok(Charset::Ascii),
            "utf-16" | "utf16" | "u16" => return Ok(Charset::Utf16),
            _ => {}
        }

        Encoding::for_label_no_replacement(name.trim().as_bytes())
            .or_else(|| Encoding::for_label_no_replacement(normalized.as_bytes()))
            .map(Charset::Other)
            .ok_or_else(|| ClientError::UnknownCharset(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Latin1 => "iso-8859-1",
            Charset::Ascii => "us-ascii",
            Charset::Utf16 => "utf-16",
            Charset::Other(encoding) => encoding.name(),
        }
    }

    /// Strictly decodes `bytes`; any byte sequence invalid under this
    /// charset fails the whole decode.
    pub fn decode(self, bytes: &[u8]) -> Result<String, ClientError> {
        match self {
            Charset::Utf8 => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(text.to_string()),
                Err(err) => Err(self.decode_error(Some(err.valid_up_to()))),
            },
            Charset::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Charset::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(position) => Err(self.decode_error(Some(position))),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Charset::Utf16 => {
                let (encoding, payload) = match Encoding::for_bom(bytes) {
                    Some((encoding, bom)) if encoding == UTF_16LE || encoding == UTF_16BE => {
                        (encoding, &bytes[bom..])
                    }
                    _ => (UTF_16LE, bytes),
                };
                self.decode_strict(encoding, payload)
            }
            Charset::Other(encoding) => self.decode_strict(encoding, bytes),
        }
    }

    fn decode_strict(self, encoding: &'static Encoding, bytes: &[u8]) -> Result<String, ClientError> {
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| self.decode_error(None))
    }

    fn decode_error(self, position: Option<usize>) -> ClientError {
        ClientError::Decode {
            charset: self.name().to_string(),
            position,
        }
    }
}

/// Returns the charset name declared by the last `Content-Type` header
/// carrying a `charset=` token, if any.
///
/// Header names are matched case-sensitively and tokens are separated by
/// single spaces, so `charset=utf-8;` yields the name `utf-8;`.
pub fn declared_charset<'a, I>(header_lines: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut declared = None;
    for line in header_lines {
        if !line.starts_with("Content-Type") {
            continue;
        }
        for token in line.split(' ') {
            if let Some(name) = token.strip_prefix("charset=") {
                declared = Some(name.split("charset=").next().unwrap_or(name));
            }
        }
    }
    declared
}
