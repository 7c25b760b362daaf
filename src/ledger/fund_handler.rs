//! Fund Handler
//!
//! Handles deposits into a wallet. The balance increment and the DEPOSIT
//! log entry persist in one database transaction, so neither is ever
//! observable without the other.

use sqlx::PgPool;

use crate::domain::{DomainError, MinorUnits, TransactionKind, TransactionStatus};
use crate::error::AppError;
use crate::store::{AccountStore, NewTransaction, TransactionLog};

use super::{FundCommand, FundResult};

/// Handler for wallet deposits
pub struct FundHandler {
    store: AccountStore,
    log: TransactionLog,
    pool: PgPool,
}

impl FundHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: AccountStore::new(pool.clone()),
            log: TransactionLog::new(pool.clone()),
            pool,
        }
    }

    /// Execute the fund command
    pub async fn execute(&self, command: FundCommand) -> Result<FundResult, AppError> {
        // Convert to minor units exactly once
        let minor = command.amount.minor_units();

        self.store
            .get(command.wallet_id)
            .await?
            .ok_or_else(|| DomainError::wallet_not_found(command.wallet_id))?;

        let mut tx = self.pool.begin().await?;

        // A positive delta cannot violate the zero floor; None here means
        // the row vanished between the lookup and the update.
        let wallet = self
            .store
            .adjust_balance(&mut tx, command.wallet_id, minor, MinorUnits::ZERO)
            .await?
            .ok_or_else(|| DomainError::wallet_not_found(command.wallet_id))?;

        let transaction = self
            .log
            .append(
                &mut tx,
                NewTransaction {
                    amount: minor,
                    kind: TransactionKind::Deposit,
                    status: TransactionStatus::Completed,
                    sender_id: None,
                    receiver_id: command.wallet_id,
                    description: format!("Deposit of {} to wallet", command.amount),
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            wallet_id = %wallet.id,
            transaction_id = %transaction.id,
            amount = %command.amount,
            "Deposit completed"
        );

        Ok(FundResult {
            wallet,
            transaction,
        })
    }
}
