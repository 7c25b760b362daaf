//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Amount, Transaction, TransactionKind, TransactionStatus, Wallet};
use crate::error::AppError;
use crate::ledger::{
    CreateWalletCommand, CreateWalletHandler, FundCommand, FundHandler, TransferCommand,
    TransferHandler, WalletQueries,
};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FundRequest {
    pub wallet_id: Uuid,
    /// Decimal major units, e.g. "100.00"
    pub amount: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender_wallet_id: Uuid,
    pub receiver_wallet_id: Uuid,
    /// Decimal major units, e.g. "100.00"
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub id: Uuid,
    pub currency: String,
    /// Balance in minor units
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Wallet> for WalletResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id,
            currency: wallet.currency,
            balance: wallet.balance.value(),
            created_at: wallet.created_at,
            updated_at: wallet.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    /// Magnitude moved, in minor units
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Uuid>,
    pub receiver_id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            amount: transaction.amount.value(),
            kind: transaction.kind,
            status: transaction.status,
            sender_id: transaction.sender_id,
            receiver_id: transaction.receiver_id,
            description: transaction.description,
            created_at: transaction.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WalletDetailResponse {
    pub id: Uuid,
    pub currency: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub transactions: Vec<TransactionResponse>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub id: Uuid,
    pub currency: String,
    /// Balance converted back to decimal major units
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct FundResponse {
    pub wallet: WalletResponse,
    pub transaction: TransactionResponse,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub sender: WalletResponse,
    pub receiver: WalletResponse,
    pub transaction: TransactionResponse,
}

/// Boundary validation: malformed, non-positive, or sub-cent amounts never
/// reach the handlers.
fn parse_amount(raw: &str) -> Result<Amount, AppError> {
    raw.parse()
        .map_err(|e| AppError::InvalidRequest(format!("Invalid amount: {}", e)))
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/wallets", post(create_wallet).get(list_wallets))
        .route("/wallets/fund", post(fund_wallet))
        .route("/wallets/transfer", post(transfer_funds))
        .route("/wallets/:wallet_id", get(get_wallet))
        .route("/wallets/:wallet_id/balance", get(get_balance))
        .route("/wallets/:wallet_id/transactions", get(get_transaction_history))
}

// =========================================================================
// POST /wallets
// =========================================================================

/// Create a new wallet
async fn create_wallet(
    State(pool): State<PgPool>,
    Json(request): Json<CreateWalletRequest>,
) -> Result<(StatusCode, Json<WalletResponse>), AppError> {
    let handler = CreateWalletHandler::new(pool);

    let wallet = handler
        .execute(CreateWalletCommand::new(request.currency))
        .await?;

    Ok((StatusCode::CREATED, Json(wallet.into())))
}

// =========================================================================
// GET /wallets
// =========================================================================

/// List all wallets
async fn list_wallets(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<WalletResponse>>, AppError> {
    let queries = WalletQueries::new(pool);

    let wallets = queries.list().await?;

    Ok(Json(wallets.into_iter().map(Into::into).collect()))
}

// =========================================================================
// GET /wallets/:wallet_id
// =========================================================================

/// Get a wallet together with its transactions
async fn get_wallet(
    State(pool): State<PgPool>,
    Path(wallet_id): Path<Uuid>,
) -> Result<Json<WalletDetailResponse>, AppError> {
    let queries = WalletQueries::new(pool);

    let (wallet, transactions) = queries.get(wallet_id).await?;

    Ok(Json(WalletDetailResponse {
        id: wallet.id,
        currency: wallet.currency,
        balance: wallet.balance.value(),
        created_at: wallet.created_at,
        updated_at: wallet.updated_at,
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}

// =========================================================================
// GET /wallets/:wallet_id/balance
// =========================================================================

/// Get wallet balance in decimal major units
async fn get_balance(
    State(pool): State<PgPool>,
    Path(wallet_id): Path<Uuid>,
) -> Result<Json<BalanceResponse>, AppError> {
    let queries = WalletQueries::new(pool);

    let wallet = queries.balance(wallet_id).await?;

    Ok(Json(BalanceResponse {
        id: wallet.id,
        currency: wallet.currency,
        balance: wallet.balance.to_decimal(),
    }))
}

// =========================================================================
// GET /wallets/:wallet_id/transactions
// =========================================================================

/// Get wallet transaction history, newest first
async fn get_transaction_history(
    State(pool): State<PgPool>,
    Path(wallet_id): Path<Uuid>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let queries = WalletQueries::new(pool);

    let transactions = queries.history(wallet_id).await?;

    Ok(Json(transactions.into_iter().map(Into::into).collect()))
}

// =========================================================================
// POST /wallets/fund
// =========================================================================

/// Deposit funds into a wallet
async fn fund_wallet(
    State(pool): State<PgPool>,
    Json(request): Json<FundRequest>,
) -> Result<Json<FundResponse>, AppError> {
    let amount = parse_amount(&request.amount)?;

    let handler = FundHandler::new(pool);

    let result = handler
        .execute(FundCommand::new(request.wallet_id, amount))
        .await?;

    Ok(Json(FundResponse {
        wallet: result.wallet.into(),
        transaction: result.transaction.into(),
    }))
}

// =========================================================================
// POST /wallets/transfer
// =========================================================================

/// Transfer funds between two wallets
async fn transfer_funds(
    State(pool): State<PgPool>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let amount = parse_amount(&request.amount)?;

    let handler = TransferHandler::new(pool);

    let result = handler
        .execute(TransferCommand::new(
            request.sender_wallet_id,
            request.receiver_wallet_id,
            amount,
        ))
        .await?;

    Ok(Json(TransferResponse {
        sender: result.sender.into(),
        receiver: result.receiver.into(),
        transaction: result.transaction.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_wallet_request_deserialize() {
        let json = r#"{"currency": "USD"}"#;

        let request: CreateWalletRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.currency, "USD");
    }

    #[test]
    fn test_fund_request_deserialize() {
        let json = r#"{
            "wallet_id": "550e8400-e29b-41d4-a716-446655440000",
            "amount": "100.00"
        }"#;

        let request: FundRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, "100.00");
    }

    #[test]
    fn test_transfer_request_deserialize() {
        let json = r#"{
            "sender_wallet_id": "550e8400-e29b-41d4-a716-446655440001",
            "receiver_wallet_id": "550e8400-e29b-41d4-a716-446655440002",
            "amount": "50.25"
        }"#;

        let request: TransferRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, "50.25");
        assert_ne!(request.sender_wallet_id, request.receiver_wallet_id);
    }

    #[test]
    fn test_parse_amount_rejects_sub_cent() {
        let result = parse_amount("0.005");
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_amount_rejects_zero_and_negative() {
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-10.00").is_err());
    }

    #[test]
    fn test_parse_amount_accepts_minimum() {
        let amount = parse_amount("0.01").unwrap();
        assert_eq!(amount.minor_units().value(), 1);
    }
}
