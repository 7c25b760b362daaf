//! Transaction Log
//!
//! Durable append-only record of completed operations. Rows are inserted
//! inside the same database transaction as the balance mutation they
//! describe and are never updated or deleted afterwards.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::{MinorUnits, Transaction, TransactionKind, TransactionStatus};

/// A transaction record about to be appended.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: MinorUnits,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub sender_id: Option<Uuid>,
    pub receiver_id: Uuid,
    pub description: String,
}

type TransactionRow = (
    Uuid,
    i64,
    String,
    String,
    Option<Uuid>,
    Uuid,
    String,
    DateTime<Utc>,
);

fn transaction_from_row(row: TransactionRow) -> Result<Transaction, sqlx::Error> {
    let (id, amount, kind, status, sender_id, receiver_id, description, created_at) = row;

    let kind = TransactionKind::from_str(&kind).map_err(|e| sqlx::Error::Decode(e.into()))?;
    let status =
        TransactionStatus::from_str(&status).map_err(|e| sqlx::Error::Decode(e.into()))?;

    Ok(Transaction {
        id,
        amount: MinorUnits::new(amount),
        kind,
        status,
        sender_id,
        receiver_id,
        description,
        created_at,
    })
}

/// Append-only log of transactions
#[derive(Debug, Clone)]
pub struct TransactionLog {
    pool: PgPool,
}

impl TransactionLog {
    /// Create a new TransactionLog with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a transaction record within the caller's database transaction.
    pub async fn append(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        record: NewTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        let row: TransactionRow = sqlx::query_as(
            r#"
            INSERT INTO transactions (id, amount, kind, status, sender_id, receiver_id, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, amount, kind, status, sender_id, receiver_id, description, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.amount.value())
        .bind(record.kind.as_str())
        .bind(record.status.as_str())
        .bind(record.sender_id)
        .bind(record.receiver_id)
        .bind(&record.description)
        .fetch_one(&mut **tx)
        .await?;

        transaction_from_row(row)
    }

    /// All transactions where the wallet is sender or receiver, newest first.
    pub async fn find_by_account(&self, wallet_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, amount, kind, status, sender_id, receiver_id, description, created_at
            FROM transactions
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(wallet_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(transaction_from_row).collect()
    }
}
