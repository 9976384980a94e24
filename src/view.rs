//! Read-only snapshot handed to the renderer each refresh.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewRadix {
    #[default]
    Hex,
    Decimal,
    Ascii,
}

impl ViewRadix {
    pub fn next(self) -> Self {
        match self {
            ViewRadix::Hex => ViewRadix::Decimal,
            ViewRadix::Decimal => ViewRadix::Ascii,
            ViewRadix::Ascii => ViewRadix::Hex,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewRadix::Hex => "HEX",
            ViewRadix::Decimal => "DEC",
            ViewRadix::Ascii => "ASCII",
        }
    }

    /// Width of one rendered cell, separator excluded.
    pub fn cell_width(self) -> usize {
        match self {
            ViewRadix::Hex => 2,
            ViewRadix::Decimal => 3,
            ViewRadix::Ascii => 1,
        }
    }

    pub fn format_byte(self, byte: u8) -> String {
        match self {
            ViewRadix::Hex => format!("{byte:02x}"),
            ViewRadix::Decimal => format!("{byte:3}"),
            ViewRadix::Ascii => printable(byte).to_string(),
        }
    }

    /// Interprets operator input typed in Edit mode. The result is not range
    /// checked; the document rejects anything wider than a byte.
    pub fn parse_input(self, input: &str) -> EngineResult<u32> {
        let invalid = || {
            EngineError::InvalidValue(format!("cannot read {input:?} as {}", self.label()))
        };
        match self {
            ViewRadix::Hex => {
                let digits = input.trim();
                let digits = digits
                    .strip_prefix("0x")
                    .or_else(|| digits.strip_prefix("0X"))
                    .unwrap_or(digits);
                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(invalid());
                }
                u32::from_str_radix(digits, 16).map_err(|_| invalid())
            }
            ViewRadix::Decimal => {
                let digits = input.trim();
                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                digits.parse::<u32>().map_err(|_| invalid())
            }
            ViewRadix::Ascii => {
                let mut chars = input.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(u32::from(c)),
                    _ => Err(invalid()),
                }
            }
        }
    }
}

pub fn printable(byte: u8) -> char {
    if (0x20..=0x7e).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeView {
    Normal,
    Search(String),
    Edit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub file_name: String,
    pub len: usize,
    pub dirty: bool,
    pub rows: Vec<RowView>,
    pub cursor_offset: usize,
    pub cursor_row_visible: bool,
    pub mode: ModeView,
    pub radix: ViewRadix,
    pub bookmarks: Vec<usize>,
    pub matches: Vec<Range<usize>>,
    pub status: Option<String>,
}

impl ViewModel {
    pub fn is_bookmarked(&self, offset: usize) -> bool {
        self.bookmarks.binary_search(&offset).is_ok()
    }

    pub fn in_match(&self, offset: usize) -> bool {
        self.matches.iter().any(|m| m.contains(&offset))
    }
}
