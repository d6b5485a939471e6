use serde::Serialize;

use crate::{Symbol, ValidationError};

const STOCKS: [(&str, &str); 5] = [
    ("Apple", "AAPL"),
    ("Microsoft", "MSFT"),
    ("Google", "GOOGL"),
    ("Amazon", "AMZN"),
    ("Tesla", "TSLA"),
];

/// One entry of the fixed stock catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockChoice {
    pub name: &'static str,
    pub ticker: &'static str,
}

impl StockChoice {
    pub fn all() -> impl Iterator<Item = StockChoice> {
        STOCKS
            .iter()
            .map(|&(name, ticker)| StockChoice { name, ticker })
    }

    /// Find by display name or ticker, ignoring case.
    pub fn lookup(value: &str) -> Result<Self, ValidationError> {
        let wanted = value.trim();
        Self::all()
            .find(|choice| {
                choice.name.eq_ignore_ascii_case(wanted)
                    || choice.ticker.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ValidationError::UnknownStock {
                value: value.to_owned(),
            })
    }

    /// The ticker checked the same way as any user-typed symbol.
    pub fn symbol(&self) -> Result<Symbol, ValidationError> {
        Symbol::parse(self.ticker)
    }
}

impl Default for StockChoice {
    fn default() -> Self {
        Self {
            name: STOCKS[0].0,
            ticker: STOCKS[0].1,
        }
    }
}
