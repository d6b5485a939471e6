use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Upper-cased ticker as it appears in the provider query string.
///
/// Only ASCII letters, digits, `.` and `-` are accepted, so a ticker can be
/// placed in a URL without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let ticker = input.trim();

        let mut len = 0;
        for (index, ch) in ticker.chars().enumerate() {
            if index == 0 && !ch.is_ascii_alphabetic() {
                return Err(ValidationError::SymbolInvalidStart { ch });
            }
            if !is_ticker_char(ch) {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
            len += 1;
        }

        match len {
            0 => Err(ValidationError::EmptySymbol),
            len if len > MAX_SYMBOL_LEN => Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            }),
            _ => Ok(Self(ticker.to_ascii_uppercase())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_ticker_char(ch: char) -> bool {
    matches!(ch, 'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '-')
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
