//! Conversions between stored bytes and the four textual value formats.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a value is shown and edited. Never changes the stored bytes by itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Text,
    Hex,
    Base64,
    #[default]
    #[serde(alias = "structured")]
    Json,
}

impl ValueFormat {
    pub const ALL: [ValueFormat; 4] = [Self::Text, Self::Hex, Self::Base64, Self::Json];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Json => "json",
        }
    }

    /// Shortcut key that selects this format.
    pub const fn key(self) -> char {
        match self {
            Self::Text => 't',
            Self::Hex => 'h',
            Self::Base64 => 'b',
            Self::Json => 'j',
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == c)
    }
}

impl std::str::FromStr for ValueFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            "json" | "structured" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}' (expected text, hex, base64 or json)")),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("value is not valid UTF-8; switch to hex or base64 to edit it")]
    InvalidUtf8,

    #[error("hex length must be even (got {0} digits)")]
    OddHexLength(usize),

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("JSON error at {line}:{column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },
}

impl CodecError {
    fn from_json(err: &serde_json::Error) -> Self {
        let full = err.to_string();
        // serde_json appends " at line L column C"; the position is reported separately.
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        Self::InvalidJson {
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}

/// A value rendered for the read-only pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayValue {
    pub text: String,
    /// Shown above the text when the bytes did not fit the format cleanly.
    pub warning: Option<String>,
    /// Whether `text` should go through the JSON highlighter.
    pub highlight: bool,
}

/// Text placed in the editor when an edit session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableText {
    pub text: String,
    pub warning: Option<String>,
}

pub fn display(format: ValueFormat, bytes: &[u8]) -> DisplayValue {
    match format {
        ValueFormat::Text => match std::str::from_utf8(bytes) {
            Ok(s) => plain(s.to_string()),
            Err(_) => base64_fallback("invalid UTF-8", bytes),
        },
        ValueFormat::Hex => plain(hex_dump(bytes)),
        ValueFormat::Base64 => plain(STANDARD.encode(bytes)),
        ValueFormat::Json => {
            let Ok(s) = std::str::from_utf8(bytes) else {
                return base64_fallback("invalid UTF-8; cannot be JSON", bytes);
            };
            match canonical_json(s) {
                Ok(pretty) => DisplayValue {
                    text: pretty,
                    warning: None,
                    highlight: true,
                },
                Err(err) => DisplayValue {
                    text: s.to_string(),
                    warning: Some(format!("Invalid JSON: {err}")),
                    highlight: true,
                },
            }
        }
    }
}

/// Decode stored bytes into the active format's editable representation.
pub fn editable(format: ValueFormat, bytes: &[u8]) -> Result<EditableText, CodecError> {
    match format {
        ValueFormat::Text => {
            let s = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
            Ok(EditableText {
                text: s.to_string(),
                warning: None,
            })
        }
        ValueFormat::Hex => Ok(EditableText {
            text: hex::encode(bytes),
            warning: None,
        }),
        ValueFormat::Base64 => Ok(EditableText {
            text: STANDARD.encode(bytes),
            warning: None,
        }),
        ValueFormat::Json => {
            let s = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
            match canonical_json(s) {
                Ok(pretty) => Ok(EditableText {
                    text: pretty,
                    warning: None,
                }),
                Err(err) => Ok(EditableText {
                    text: s.to_string(),
                    warning: Some(format!("Invalid JSON: {err} (you can fix it)")),
                }),
            }
        }
    }
}

/// Encode editor text back into the bytes that get stored.
pub fn encode(format: ValueFormat, text: &str) -> Result<Vec<u8>, CodecError> {
    match format {
        ValueFormat::Text => Ok(text.as_bytes().to_vec()),
        ValueFormat::Hex => {
            let digits = clean_hex(text);
            if digits.len() % 2 != 0 {
                return Err(CodecError::OddHexLength(digits.len()));
            }
            Ok(hex::decode(digits)?)
        }
        ValueFormat::Base64 => Ok(STANDARD.decode(text.trim())?),
        ValueFormat::Json => canonical_json(text).map(String::into_bytes),
    }
}

/// Parse and re-serialize with two-space indentation.
pub fn canonical_json(text: &str) -> Result<String, CodecError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| CodecError::from_json(&e))?;
    serde_json::to_string_pretty(&value).map_err(|e| CodecError::from_json(&e))
}

/// Lowercase, drop `0x` prefixes, then keep only hex digits.
fn clean_hex(text: &str) -> String {
    text.to_ascii_lowercase()
        .replace("0x", "")
        .chars()
        .filter(char::is_ascii_hexdigit)
        .collect()
}

/// Canonical hex dump: offset, sixteen bytes in two groups, ASCII gutter.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 4 + 16);
    for (row, chunk) in bytes.chunks(16).enumerate() {
        out.push_str(&format!("{:08x}  ", row * 16));
        for i in 0..16 {
            match chunk.get(i) {
                Some(b) => out.push_str(&format!("{b:02x} ")),
                None => out.push_str("   "),
            }
            if i == 7 {
                out.push(' ');
            }
        }
        out.push_str(" |");
        out.extend(chunk.iter().map(|&b| {
            if (0x20..0x7f).contains(&b) {
                b as char
            } else {
                '.'
            }
        }));
        out.push_str("|\n");
    }
    out
}

fn plain(text: String) -> DisplayValue {
    DisplayValue {
        text,
        warning: None,
        highlight: false,
    }
}

fn base64_fallback(reason: &str, bytes: &[u8]) -> DisplayValue {
    DisplayValue {
        text: STANDARD.encode(bytes),
        warning: Some(format!("Warning: {reason}. Showing base64.")),
        highlight: false,
    }
}
