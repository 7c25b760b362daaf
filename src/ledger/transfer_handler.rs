//! Transfer Handler
//!
//! Handles transfers between wallets. The sender debit, receiver credit,
//! and TRANSFER log entry execute as one database transaction. The debit is
//! a conditional adjustment with a floor of zero, so two transfers draining
//! the same sender can never both succeed past it.

use sqlx::PgPool;

use crate::domain::{DomainError, MinorUnits, TransactionKind, TransactionStatus, Wallet};
use crate::error::AppError;
use crate::store::{AccountStore, NewTransaction, TransactionLog};

use super::{TransferCommand, TransferResult};

/// Handler for wallet-to-wallet transfers
pub struct TransferHandler {
    store: AccountStore,
    log: TransactionLog,
    pool: PgPool,
}

impl TransferHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: AccountStore::new(pool.clone()),
            log: TransactionLog::new(pool.clone()),
            pool,
        }
    }

    /// Execute the transfer command
    pub async fn execute(&self, command: TransferCommand) -> Result<TransferResult, AppError> {
        if command.sender_wallet_id == command.receiver_wallet_id {
            return Err(DomainError::SelfTransfer.into());
        }

        // The two lookups have no ordering requirement between them
        let (sender, receiver) = tokio::try_join!(
            self.store.get(command.sender_wallet_id),
            self.store.get(command.receiver_wallet_id),
        )?;

        let sender = sender
            .ok_or_else(|| DomainError::wallet_not_found(command.sender_wallet_id))?;
        receiver.ok_or_else(|| DomainError::wallet_not_found(command.receiver_wallet_id))?;

        // Convert to minor units exactly once
        let minor = command.amount.minor_units();

        if !sender.balance.is_sufficient_for(minor) {
            return Err(DomainError::insufficient_funds(minor, sender.balance).into());
        }

        let mut tx = self.pool.begin().await?;

        let (sender, receiver, transaction) =
            self.apply_transfer(&mut tx, &command, minor, sender.balance).await?;

        tx.commit().await?;

        tracing::info!(
            sender_id = %sender.id,
            receiver_id = %receiver.id,
            transaction_id = %transaction.id,
            amount = %command.amount,
            "Transfer completed"
        );

        Ok(TransferResult {
            sender,
            receiver,
            transaction,
        })
    }

    /// The atomic unit: debit, credit, log entry. Any error (or a dropped
    /// `tx`) rolls the whole unit back.
    async fn apply_transfer(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        command: &TransferCommand,
        minor: MinorUnits,
        balance_at_check: MinorUnits,
    ) -> Result<(Wallet, Wallet, crate::domain::Transaction), AppError> {
        // Conditional decrement: only applies if the resulting balance
        // stays at or above zero. A None means a concurrent transfer
        // drained the sender after the pre-check.
        let sender = self
            .store
            .adjust_balance(tx, command.sender_wallet_id, -minor, MinorUnits::ZERO)
            .await?
            .ok_or_else(|| DomainError::insufficient_funds(minor, balance_at_check))?;

        let receiver = self
            .store
            .adjust_balance(tx, command.receiver_wallet_id, minor, MinorUnits::ZERO)
            .await?
            .ok_or_else(|| DomainError::wallet_not_found(command.receiver_wallet_id))?;

        let transaction = self
            .log
            .append(
                tx,
                NewTransaction {
                    amount: minor,
                    kind: TransactionKind::Transfer,
                    status: TransactionStatus::Completed,
                    sender_id: Some(command.sender_wallet_id),
                    receiver_id: command.receiver_wallet_id,
                    description: format!(
                        "Transfer of {} from {} to {}",
                        command.amount, command.sender_wallet_id, command.receiver_wallet_id
                    ),
                },
            )
            .await?;

        Ok((sender, receiver, transaction))
    }
}
