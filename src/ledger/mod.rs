//! Ledger engine module
//!
//! Command handlers and query paths that orchestrate the balance-mutation
//! core. Each handler validates its command, then executes the mutation as
//! one atomic unit against the account store and transaction log.

mod commands;
mod create_handler;
mod fund_handler;
mod queries;
mod transfer_handler;


pub use commands::*;
pub use create_handler::CreateWalletHandler;
pub use fund_handler::FundHandler;
pub use queries::WalletQueries;
pub use transfer_handler::TransferHandler;
