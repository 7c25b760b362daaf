//! Wallet Queries
//!
//! Read-only paths over the stores. None of these mutate state; repeated
//! calls with no intervening writes return identical results.

use sqlx::PgPool;

use crate::domain::{DomainError, Transaction, Wallet};
use crate::error::AppError;
use crate::store::{AccountStore, TransactionLog};

/// Query service for wallets and their transaction history
#[derive(Debug, Clone)]
pub struct WalletQueries {
    store: AccountStore,
    log: TransactionLog,
}

impl WalletQueries {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: AccountStore::new(pool.clone()),
            log: TransactionLog::new(pool),
        }
    }

    /// All wallets, oldest first.
    pub async fn list(&self) -> Result<Vec<Wallet>, AppError> {
        Ok(self.store.list().await?)
    }

    /// A single wallet together with every transaction it participated in.
    pub async fn get(&self, id: uuid::Uuid) -> Result<(Wallet, Vec<Transaction>), AppError> {
        let wallet = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::wallet_not_found(id))?;

        let transactions = self.log.find_by_account(id).await?;

        Ok((wallet, transactions))
    }

    /// Current balance for a wallet.
    pub async fn balance(&self, id: uuid::Uuid) -> Result<Wallet, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::wallet_not_found(id).into())
    }

    /// Transaction history for a wallet, newest first.
    pub async fn history(&self, id: uuid::Uuid) -> Result<Vec<Transaction>, AppError> {
        // Distinguish "no transactions" from "no such wallet"
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::wallet_not_found(id))?;

        Ok(self.log.find_by_account(id).await?)
    }
}
