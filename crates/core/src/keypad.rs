//! Keypad key events
//!
//! The alarm is operated from a 4x4 membrane keypad. Digits and the letters
//! `A`-`D` are code symbols; `*` clears the entered code and `#` confirms it.

use core::fmt;

/// Number of keypad rows
pub const KEYPAD_ROWS: usize = 4;

/// Number of keypad columns
pub const KEYPAD_COLS: usize = 4;

/// Character printed on each key, indexed `[row][column]`
pub const KEYPAD_LAYOUT: [[char; KEYPAD_COLS]; KEYPAD_ROWS] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// Character of the reset key
pub const RESET_CHAR: char = '*';

/// Character of the confirm key
pub const CONFIRM_CHAR: char = '#';

/// A single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Code symbol: `0`-`9` or `A`-`D`
    Symbol(char),
    /// `*`: clear the entered code
    Reset,
    /// `#`: compare the entered code with the reference code
    Confirm,
}

impl Key {
    /// Map a keypad character to a key event.
    ///
    /// Returns `None` for characters that are not on the keypad, including
    /// lowercase `a`-`d`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            RESET_CHAR => Some(Key::Reset),
            CONFIRM_CHAR => Some(Key::Confirm),
            c if is_code_symbol(c) => Some(Key::Symbol(c)),
            _ => None,
        }
    }

    /// Character printed on the key
    pub fn as_char(self) -> char {
        match self {
            Key::Symbol(c) => c,
            Key::Reset => RESET_CHAR,
            Key::Confirm => CONFIRM_CHAR,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Whether `c` may appear in an entered or reference code
pub fn is_code_symbol(c: char) -> bool {
    c.is_ascii_digit() || ('A'..='D').contains(&c)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_from_char_covers_layout() {
        for row in KEYPAD_LAYOUT.iter() {
            for &c in row.iter() {
                let key = Key::from_char(c).unwrap();
                assert_eq!(key.as_char(), c);
            }
        }
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(Key::from_char('*'), Some(Key::Reset));
        assert_eq!(Key::from_char('#'), Some(Key::Confirm));
        assert_eq!(Key::from_char('7'), Some(Key::Symbol('7')));
        assert_eq!(Key::from_char('D'), Some(Key::Symbol('D')));
    }

    #[test]
    fn test_rejects_unknown_characters() {
        assert_eq!(Key::from_char('a'), None);
        assert_eq!(Key::from_char('E'), None);
        assert_eq!(Key::from_char(' '), None);
        assert_eq!(Key::from_char('\0'), None);
    }

    #[test]
    fn test_display() {
        use std::format;
        assert_eq!(format!("{}", Key::Confirm), "#");
        assert_eq!(format!("{}", Key::Symbol('B')), "B");
    }
}
