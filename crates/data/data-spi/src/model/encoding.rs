//! Text encodings accepted for uploads.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Character encoding the upload is decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// Windows code page 1252
    #[serde(rename = "windows-1252")]
    Windows1252,
    /// ISO-8859-1, every byte maps to the code point of the same value
    #[serde(rename = "latin1")]
    Latin1,
    /// 7-bit ASCII
    #[serde(rename = "ascii")]
    Ascii,
}

impl TextEncoding {
    /// Canonical label.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Ascii => "ascii",
        }
    }

    /// All supported encodings, in selector order.
    pub fn all() -> &'static [TextEncoding] {
        &[
            TextEncoding::Utf8,
            TextEncoding::Windows1252,
            TextEncoding::Latin1,
            TextEncoding::Ascii,
        ]
    }

    /// Next encoding in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            TextEncoding::Utf8 => TextEncoding::Windows1252,
            TextEncoding::Windows1252 => TextEncoding::Latin1,
            TextEncoding::Latin1 => TextEncoding::Ascii,
            TextEncoding::Ascii => TextEncoding::Utf8,
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "windows-1252" | "cp1252" => Ok(TextEncoding::Windows1252),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            _ => Err(DataError::UnsupportedEncoding(s.to_string())),
        }
    }
}
