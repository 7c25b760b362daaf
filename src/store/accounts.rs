//! Account Store
//!
//! Durable keyed storage of wallet records. The only write path for
//! balances is `adjust_balance`, a single conditional UPDATE: the row lock
//! it takes serializes balance mutation per wallet, and the floor condition
//! makes "decrement only if the resulting balance stays above the floor"
//! atomic. Two concurrent transfers draining the same sender can therefore
//! never both pass the zero floor.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::domain::{MinorUnits, Wallet};

type WalletRow = (Uuid, String, i64, DateTime<Utc>, DateTime<Utc>);

fn wallet_from_row((id, currency, balance, created_at, updated_at): WalletRow) -> Wallet {
    Wallet {
        id,
        currency,
        balance: MinorUnits::new(balance),
        created_at,
        updated_at,
    }
}

/// Store for wallet records
#[derive(Debug, Clone)]
pub struct AccountStore {
    pool: PgPool,
}

impl AccountStore {
    /// Create a new AccountStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new wallet with a zero balance.
    pub async fn create(&self, currency: &str) -> Result<Wallet, sqlx::Error> {
        let row: WalletRow = sqlx::query_as(
            r#"
            INSERT INTO wallets (id, currency, balance)
            VALUES ($1, $2, 0)
            RETURNING id, currency, balance, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(currency)
        .fetch_one(&self.pool)
        .await?;

        Ok(wallet_from_row(row))
    }

    /// Look up a wallet by id.
    pub async fn get(&self, id: Uuid) -> Result<Option<Wallet>, sqlx::Error> {
        let row: Option<WalletRow> = sqlx::query_as(
            r#"
            SELECT id, currency, balance, created_at, updated_at
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(wallet_from_row))
    }

    /// List all wallets, oldest first.
    pub async fn list(&self) -> Result<Vec<Wallet>, sqlx::Error> {
        let rows: Vec<WalletRow> = sqlx::query_as(
            r#"
            SELECT id, currency, balance, created_at, updated_at
            FROM wallets
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(wallet_from_row).collect())
    }

    /// Atomically adjust a wallet balance by `delta`, but only if the
    /// resulting balance would be at least `min_resulting`.
    ///
    /// Returns the updated wallet, or `None` when the wallet row is absent
    /// or the floor condition fails. Must run inside the caller's database
    /// transaction so the adjustment commits or rolls back with the rest of
    /// the unit.
    pub async fn adjust_balance(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: Uuid,
        delta: MinorUnits,
        min_resulting: MinorUnits,
    ) -> Result<Option<Wallet>, sqlx::Error> {
        let row: Option<WalletRow> = sqlx::query_as(
            r#"
            UPDATE wallets
            SET balance = balance + $2, updated_at = NOW()
            WHERE id = $1 AND balance + $2 >= $3
            RETURNING id, currency, balance, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(delta.value())
        .bind(min_resulting.value())
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(wallet_from_row))
    }
}
