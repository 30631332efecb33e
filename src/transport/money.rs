use serde::{Deserialize, Serialize};

use super::envelope::TransportError;
use crate::domain::Money;

/// Amount as seen on the wire: `{ "currency": "SLE", "value": 1000 }`.
///
/// `value` arrives as a JSON integer, an integral float (`200.0`) or a numeric string.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportMoney {
    #[serde(default)]
    currency: Option<String>,
    value: TransportAmount,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportAmount {
    Int(i64),
    Float(f64),
    String(String),
}

fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .then_some(value as i64)
}

impl TransportMoney {
    pub fn into_money(self) -> Result<Money, TransportError> {
        let value = match self.value {
            TransportAmount::Int(value) => value,
            TransportAmount::Float(value) => {
                integral(value).ok_or_else(|| TransportError::InvalidAmount {
                    value: value.to_string(),
                })?
            }
            TransportAmount::String(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| TransportError::InvalidAmount { value })?,
        };
        Ok(Money {
            currency: self.currency.unwrap_or_default(),
            value,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MoneyBody<'a> {
    currency: &'a str,
    value: i64,
}

impl<'a> From<&'a Money> for MoneyBody<'a> {
    fn from(value: &'a Money) -> Self {
        Self {
            currency: value.currency.trim(),
            value: value.value,
        }
    }
}
