//! Create Wallet Handler

use sqlx::PgPool;

use crate::domain::Wallet;
use crate::error::AppError;
use crate::store::AccountStore;

use super::CreateWalletCommand;

/// Handler for wallet creation
pub struct CreateWalletHandler {
    store: AccountStore,
}

impl CreateWalletHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: AccountStore::new(pool),
        }
    }

    /// Execute the create-wallet command
    pub async fn execute(&self, command: CreateWalletCommand) -> Result<Wallet, AppError> {
        let currency = command.currency.trim();
        if currency.is_empty() {
            return Err(AppError::InvalidRequest(
                "currency must not be empty".to_string(),
            ));
        }

        let wallet = self.store.create(currency).await?;

        tracing::info!(wallet_id = %wallet.id, currency = %wallet.currency, "Wallet created");

        Ok(wallet)
    }
}
