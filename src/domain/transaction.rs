//! Transaction entity
//!
//! An immutable record of a completed balance-changing operation. Created
//! exactly once per successful deposit or transfer, never mutated or
//! deleted afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::money::MinorUnits;

/// Kind of balance-changing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(Self::Deposit),
            "TRANSFER" => Ok(Self::Transfer),
            other => Err(format!("Unknown transaction kind: {other}")),
        }
    }
}

/// Transaction lifecycle status.
///
/// The engine only ever persists `Completed`: failed operations abort the
/// whole unit before a record is written, so `Pending` and `Failed` exist
/// for wire compatibility only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            other => Err(format!("Unknown transaction status: {other}")),
        }
    }
}

/// A persisted transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: Uuid,
    /// Magnitude moved, in minor units, always positive.
    pub amount: MinorUnits,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    /// Set for transfers, absent for deposits.
    pub sender_id: Option<Uuid>,
    /// The wallet credited, set for both kinds.
    pub receiver_id: Uuid,
    /// Human-readable summary, never interpreted by the engine.
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [TransactionKind::Deposit, TransactionKind::Transfer] {
            let parsed: TransactionKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_unknown_rejected() {
        let result: Result<TransactionKind, _> = "WITHDRAWAL".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Failed,
        ] {
            let parsed: TransactionStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_serde_screaming_snake() {
        let json = serde_json::to_string(&TransactionKind::Deposit).unwrap();
        assert_eq!(json, r#""DEPOSIT""#);

        let json = serde_json::to_string(&TransactionStatus::Completed).unwrap();
        assert_eq!(json, r#""COMPLETED""#);
    }
}
