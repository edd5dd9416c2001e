use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete color of one backplane cell.
///
/// The declaration order fixes the text symbol: `White = '0'` through
/// `Purple = '6'`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCode {
    White,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl ColorCode {
    pub const ALL: [ColorCode; 7] = [
        ColorCode::White,
        ColorCode::Red,
        ColorCode::Orange,
        ColorCode::Yellow,
        ColorCode::Green,
        ColorCode::Blue,
        ColorCode::Purple,
    ];

    /// Single-digit symbol used in the text matrix.
    pub fn symbol(self) -> char {
        char::from(b'0' + self as u8)
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        let idx = symbol.to_digit(10)? as usize;
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
