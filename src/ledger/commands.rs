//! Command definitions
//!
//! Commands represent intentions to change the system state. Amounts are
//! already validated `Amount` values here: the API boundary parses and
//! rejects malformed or sub-cent input before a command is built.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Amount, Transaction, Wallet};

/// Command to create a new wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWalletCommand {
    pub currency: String,
}

impl CreateWalletCommand {
    pub fn new(currency: String) -> Self {
        Self { currency }
    }
}

/// Command to deposit funds into a wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundCommand {
    pub wallet_id: Uuid,
    /// Amount in decimal major units, validated at the boundary
    pub amount: Amount,
}

impl FundCommand {
    pub fn new(wallet_id: Uuid, amount: Amount) -> Self {
        Self { wallet_id, amount }
    }
}

/// Command to transfer funds between two wallets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    pub sender_wallet_id: Uuid,
    pub receiver_wallet_id: Uuid,
    /// Amount in decimal major units, validated at the boundary
    pub amount: Amount,
}

impl TransferCommand {
    pub fn new(sender_wallet_id: Uuid, receiver_wallet_id: Uuid, amount: Amount) -> Self {
        Self {
            sender_wallet_id,
            receiver_wallet_id,
            amount,
        }
    }
}

/// Result of a successful deposit
#[derive(Debug, Clone, Serialize)]
pub struct FundResult {
    pub wallet: Wallet,
    pub transaction: Transaction,
}

/// Result of a successful transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferResult {
    pub sender: Wallet,
    pub receiver: Wallet,
    pub transaction: Transaction,
}
