//! Strict decoding of uploaded bytes.

use std::borrow::Cow;

use data_spi::{DataError, Result, TextEncoding};
use encoding_rs::{UTF_8, WINDOWS_1252};

const UTF8_BOM: &str = "\u{feff}";

/// Bytes with no assigned character in windows-1252.
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Decode `bytes` under `encoding`.
///
/// Decoding never substitutes replacement characters: input that is not
/// valid in the chosen encoding is an error, and no other encoding is tried.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<Cow<'_, str>> {
    match encoding {
        TextEncoding::Utf8 => {
            let text = UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or_else(|| invalid(encoding, utf8_error_offset(bytes)))?;
            Ok(strip_bom(text))
        }
        TextEncoding::Windows1252 => {
            // The WHATWG table maps the unassigned bytes to C1 controls.
            if let Some(offset) = bytes
                .iter()
                .position(|b| WINDOWS_1252_UNDEFINED.contains(b))
            {
                return Err(invalid(encoding, offset));
            }
            WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or_else(|| invalid(encoding, 0))
        }
        TextEncoding::Latin1 => Ok(Cow::Owned(bytes.iter().map(|&b| b as char).collect())),
        TextEncoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
            Some(offset) => Err(invalid(encoding, offset)),
            // All bytes are ASCII, hence valid UTF-8.
            None => Ok(String::from_utf8_lossy(bytes)),
        },
    }
}

fn strip_bom(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.strip_prefix(UTF8_BOM).unwrap_or(s)),
        Cow::Owned(s) => match s.strip_prefix(UTF8_BOM) {
            Some(rest) => Cow::Owned(rest.to_string()),
            None => Cow::Owned(s),
        },
    }
}

fn utf8_error_offset(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(_) => 0,
        Err(e) => e.valid_up_to(),
    }
}

fn invalid(encoding: TextEncoding, offset: usize) -> DataError {
    DataError::FileParse(format!(
        "content is not valid {} (byte offset {})",
        encoding, offset
    ))
}
