//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

use super::money::MinorUnits;

/// Domain-specific errors
///
/// These errors represent business rule violations and domain invariant
/// failures. They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Referenced wallet does not exist
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    /// Transfer where sender and receiver are the same wallet
    #[error("Cannot transfer to the same wallet")]
    SelfTransfer,

    /// Sender balance insufficient, at pre-check or atomic re-verification
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// Invalid amount (zero, negative, sub-cent, or exceeds limit)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl DomainError {
    /// Create a wallet-not-found error from any id type
    pub fn wallet_not_found(id: impl ToString) -> Self {
        Self::WalletNotFound(id.to_string())
    }

    /// Create an insufficient-funds error from minor-unit values
    pub fn insufficient_funds(required: MinorUnits, available: MinorUnits) -> Self {
        Self::InsufficientFunds {
            required: required.to_decimal(),
            available: available.to_decimal(),
        }
    }

    /// Check if this is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::SelfTransfer | Self::InsufficientFunds { .. } | Self::InvalidAmount(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_error() {
        let err = DomainError::insufficient_funds(MinorUnits::new(10000), MinorUnits::new(5000));

        assert!(err.is_client_error());
        assert!(err.to_string().contains("100.00"));
        assert!(err.to_string().contains("50.00"));
    }

    #[test]
    fn test_wallet_not_found_not_client_error() {
        let err = DomainError::wallet_not_found("abc");
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_self_transfer_message() {
        let err = DomainError::SelfTransfer;
        assert_eq!(err.to_string(), "Cannot transfer to the same wallet");
    }
}
