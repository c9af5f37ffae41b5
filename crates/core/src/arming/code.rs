//! Code buffers
//!
//! [`EnteredCode`] accumulates the symbols typed on the keypad;
//! [`ReferenceCode`] holds the code that arms and disarms the system.

use heapless::String;

use crate::error::ConfigError;
use crate::keypad::is_code_symbol;

/// Maximum supported code length (buffer capacity)
pub const MAX_CODE_LENGTH: usize = 8;

/// Candidate code typed by the operator.
///
/// The buffer accepts at most `capacity` symbols; further symbols are dropped
/// until the buffer is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnteredCode {
    symbols: String<MAX_CODE_LENGTH>,
    capacity: usize,
}

impl EnteredCode {
    /// Create an empty buffer holding up to `capacity` symbols.
    ///
    /// `capacity` is clamped to [`MAX_CODE_LENGTH`].
    pub fn new(capacity: usize) -> Self {
        Self {
            symbols: String::new(),
            capacity: capacity.min(MAX_CODE_LENGTH),
        }
    }

    /// Append a symbol.
    ///
    /// Returns `false` (buffer unchanged) if the buffer is already full.
    pub fn push(&mut self, symbol: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.symbols.push(symbol).is_ok()
    }

    /// Remove every symbol
    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.symbols.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_str(&self) -> &str {
        self.symbols.as_str()
    }

    /// Exact, case-sensitive comparison with the reference code
    pub fn matches(&self, reference: &ReferenceCode) -> bool {
        self.symbols.as_str() == reference.as_str()
    }
}

/// The code accepted by the authentication controller. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCode {
    symbols: String<MAX_CODE_LENGTH>,
}

impl ReferenceCode {
    /// Build a reference code from its printed form.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyCode`] for an empty string
    /// - [`ConfigError::CodeTooLong`] above [`MAX_CODE_LENGTH`] characters
    /// - [`ConfigError::InvalidCodeCharacter`] for `*`, `#` or anything not
    ///   printed on the keypad
    pub fn parse(code: &str) -> Result<Self, ConfigError> {
        let length = code.chars().count();
        if length == 0 {
            return Err(ConfigError::EmptyCode);
        }
        if length > MAX_CODE_LENGTH {
            return Err(ConfigError::CodeTooLong {
                length,
                max: MAX_CODE_LENGTH,
            });
        }

        let mut symbols = String::new();
        for c in code.chars() {
            if !is_code_symbol(c) {
                return Err(ConfigError::InvalidCodeCharacter(c));
            }
            // Length was checked above and symbols are ASCII
            let _ = symbols.push(c);
        }
        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.symbols.as_str()
    }
}
