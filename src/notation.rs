//! Letter+digit square notation: column letter A-H, row digit 1-8.
//! Row 3 / col 3 is "D4".

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::types::{Move, Position};

const BOARD_SIZE: u8 = 8;

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row >= BOARD_SIZE || self.col >= BOARD_SIZE {
            return write!(f, "?({}, {})", self.row, self.col);
        }
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = NotationError;

    /// Accepts upper or lower case column letters and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        let [col_char, row_char] = chars[..] else {
            return Err(NotationError::WrongLength(chars.len()));
        };

        let col = match col_char.to_ascii_uppercase() {
            c @ 'A'..='H' => c as u8 - b'A',
            _ => return Err(NotationError::BadColumn(col_char)),
        };
        let row = match row_char {
            c @ '1'..='8' => c as u8 - b'1',
            _ => return Err(NotationError::BadRow(row_char)),
        };
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);

        Ok(Position::new(row, col))
    }
}

impl Move {
    /// Parses coordinate text; any malformed input yields `Move::undefined()`.
    pub fn from_notation(text: &str) -> Self {
        text.parse::<Position>()
            .map(Move::at)
            .unwrap_or_else(|_| Move::undefined())
    }

    /// Formats the move's square, or `None` for the undefined move.
    pub fn notation(&self) -> Option<String> {
        self.position.map(|pos| pos.to_string())
    }
}
