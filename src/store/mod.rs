//! Store module
//!
//! Persistence layer for wallets and the transaction log, backed by
//! PostgreSQL. Mutations run inside a caller-provided database transaction
//! so a balance update and its log entry commit or roll back together.

mod accounts;
mod transactions;

pub use accounts::AccountStore;
pub use transactions::{NewTransaction, TransactionLog};
