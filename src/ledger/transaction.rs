use super::{amount::Amount, party::Party};
use crate::constants::now_millis;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finalized transfer. Field order is part of the block digest preimage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub from: Party,
    pub to: Party,
    pub amount: Amount,
    pub timestamp: i64,
}

impl TransactionRecord {
    pub fn new(from: Party, to: Party, amount: Amount) -> Self {
        Self {
            id: TransactionId::generate(),
            from,
            to,
            amount,
            timestamp: now_millis(),
        }
    }

    /// Synthetic `system -> sealer` transfer created by sealing
    pub fn reward(sealer: Party, amount: Amount) -> Self {
        Self::new(Party::system(), sealer, amount)
    }

    pub fn involves(&self, party: &Party) -> bool {
        &self.from == party || &self.to == party
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("transaction is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("transaction amount is not a number")]
    NonNumericAmount,
    #[error("transaction amount must not be negative")]
    NegativeAmount,
    #[error("transaction amount is out of range")]
    AmountOutOfRange,
}

/// Amount as supplied, type-checked when the draft is finalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "serde_json::Value")]
pub enum DraftAmount {
    Float(f64),
    Json(serde_json::Value),
}

impl From<serde_json::Value> for DraftAmount {
    fn from(value: serde_json::Value) -> Self {
        DraftAmount::Json(value)
    }
}

/// Caller-supplied transaction. Any `id` or `timestamp` present is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<DraftAmount>,
}

impl TransactionDraft {
    pub fn new<F: Into<String>, T: Into<String>>(from: F, to: T, amount: f64) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            amount: Some(DraftAmount::Float(amount)),
        }
    }

    /// Check required fields and produce a record with a fresh id and timestamp
    pub fn finalize(self) -> Result<TransactionRecord, ValidationError> {
        use serde_json::Value;

        let from = required_party(self.from, "from")?;
        let to = required_party(self.to, "to")?;
        let amount = match self.amount {
            None | Some(DraftAmount::Json(Value::Null)) => {
                return Err(ValidationError::MissingField("amount"))
            }
            Some(DraftAmount::Float(value)) => value,
            Some(DraftAmount::Json(Value::Number(number))) => number
                .as_f64()
                .ok_or(ValidationError::AmountOutOfRange)?,
            Some(DraftAmount::Json(_)) => return Err(ValidationError::NonNumericAmount),
        };

        // NaN and infinities have no decimal value
        let amount = Amount::from_f64(amount).ok_or(ValidationError::AmountOutOfRange)?;
        if amount.is_negative() {
            return Err(ValidationError::NegativeAmount);
        }
        Ok(TransactionRecord::new(from, to, amount))
    }
}

fn required_party(value: Option<String>, field: &'static str) -> Result<Party, ValidationError> {
    match value {
        Some(id) if !id.trim().is_empty() => Ok(Party(id)),
        _ => Err(ValidationError::MissingField(field)),
    }
}
