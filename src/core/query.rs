//! The free-text query grammar: parsing, validation against a rate snapshot,
//! and price calculation.

use crate::core::rates::{RUB, RateTable};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// A query rejected before calculation. Every variant carries what the user
/// typed so the rendered message can echo it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("the query is empty")]
    Empty,
    #[error("a query takes at most 3 arguments, got {0}")]
    TooManyArguments(usize),
    #[error("\"{0}\" is not a number")]
    InvalidAmount(String),
    #[error("negative amount requested: {0}")]
    NegativeAmount(String),
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// A parsed conversion query. The ambiguous two-token shape is resolved once,
/// here: a first token that parses as a number makes an [`Query::Amount`],
/// anything else a [`Query::Pair`].
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// `USD`: price of one unit in rubles.
    Rate { currency: String },
    /// `10 USD`: value of the amount in rubles.
    Amount { amount: f64, currency: String },
    /// `USD EUR`: price of one unit of `from` expressed in `to`.
    Pair { from: String, to: String },
    /// `10 USD EUR`: convert the amount from one currency into another.
    Convert { amount: f64, from: String, to: String },
}

impl Query {
    /// Splits the raw text on whitespace and checks the token-level grammar.
    /// Currency tokens are normalized to uppercase; amount tokens are echoed
    /// verbatim in errors.
    pub fn parse(raw: &str) -> Result<Query, QueryError> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();

        match tokens.as_slice() {
            [] => Err(QueryError::Empty),
            [code] => Ok(Query::Rate {
                currency: code.to_uppercase(),
            }),
            [first, code] => match first.parse::<f64>() {
                Ok(amount) if amount < 0.0 => Err(QueryError::NegativeAmount(first.to_string())),
                Ok(amount) => Ok(Query::Amount {
                    amount,
                    currency: code.to_uppercase(),
                }),
                // Not a number, so both tokens name currencies.
                Err(_) => Ok(Query::Pair {
                    from: first.to_uppercase(),
                    to: code.to_uppercase(),
                }),
            },
            [first, from, to] => match first.parse::<f64>() {
                Ok(amount) if amount < 0.0 => Err(QueryError::NegativeAmount(first.to_string())),
                Ok(amount) => Ok(Query::Convert {
                    amount,
                    from: from.to_uppercase(),
                    to: to.to_uppercase(),
                }),
                Err(_) => Err(QueryError::InvalidAmount(first.to_string())),
            },
            more => Err(QueryError::TooManyArguments(more.len())),
        }
    }

    /// Currency codes referenced by the query, in validation order.
    pub fn currencies(&self) -> Vec<&str> {
        match self {
            Query::Rate { currency } | Query::Amount { currency, .. } => vec![currency],
            Query::Pair { from, to } | Query::Convert { from, to, .. } => vec![from, to],
        }
    }

    /// Checks every referenced code for membership in the snapshot. The
    /// first missing code wins.
    pub fn validate_against(&self, rates: &RateTable) -> Result<(), QueryError> {
        for code in self.currencies() {
            if !rates.contains(code) {
                return Err(QueryError::UnknownCurrency(code.to_string()));
            }
        }
        Ok(())
    }

    /// Computes the price, rounded to two decimals. Pure with respect to the
    /// snapshot; a code absent from the table surfaces as `UnknownCurrency`,
    /// so callers that validated first never see an error here.
    pub fn price(&self, rates: &RateTable) -> Result<f64, QueryError> {
        let rate = |code: &String| {
            rates
                .rate(code)
                .ok_or_else(|| QueryError::UnknownCurrency(code.clone()))
        };

        let raw = match self {
            Query::Rate { currency } => rate(currency)?,
            Query::Amount { amount, currency } => rate(currency)? * amount,
            Query::Pair { from, to } => rate(from)? / rate(to)?,
            // Every rate is already in rubles, skip the division by 1.
            Query::Convert { amount, from, to } if to == RUB => rate(from)? * amount,
            Query::Convert { amount, from, to } => rate(from)? * amount / rate(to)?,
        };

        Ok(round_price(raw))
    }
}

/// Half-up rounding to two decimal places for display.
fn round_price(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
