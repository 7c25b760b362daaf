//! Domain module
//!
//! Core domain types and business rules.

pub mod context;
pub mod error;
pub mod money;
pub mod transaction;
pub mod wallet;

pub use context::RequestContext;
pub use error::DomainError;
pub use money::{Amount, AmountError, MinorUnits};
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use wallet::Wallet;
