//! Ledger Integration Tests
//!
//! Exercise the handlers and the account store directly against a real
//! database, including the concurrent-transfer race the conditional
//! decrement exists for.

use std::time::Duration;

use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

use walletd::domain::{Amount, MinorUnits};
use walletd::ledger::{
    CreateWalletCommand, CreateWalletHandler, FundCommand, FundHandler, TransferCommand,
    TransferHandler,
};
use walletd::store::AccountStore;
use walletd::{AppError, DomainError};

mod common;

async fn new_wallet(pool: &PgPool) -> Uuid {
    CreateWalletHandler::new(pool.clone())
        .execute(CreateWalletCommand::new("USD".to_string()))
        .await
        .expect("wallet creation failed")
        .id
}

async fn fund(pool: &PgPool, wallet_id: Uuid, amount: Amount) {
    FundHandler::new(pool.clone())
        .execute(FundCommand::new(wallet_id, amount))
        .await
        .expect("deposit failed");
}

#[tokio::test]
async fn test_concurrent_transfers_cannot_overdraw() {
    let pool = common::setup_test_db().await;

    // Sender holds exactly one transfer's worth; two racing transfers
    // must produce exactly one success and one InsufficientFunds.
    let sender = new_wallet(&pool).await;
    let receiver_a = new_wallet(&pool).await;
    let receiver_b = new_wallet(&pool).await;
    fund(&pool, sender, Amount::new(dec!(10.00)).unwrap()).await;

    let amount = Amount::new(dec!(10.00)).unwrap();
    let mut tasks = Vec::new();
    for receiver in [receiver_a, receiver_b] {
        let pool = pool.clone();
        tasks.push(tokio::spawn(async move {
            TransferHandler::new(pool)
                .execute(TransferCommand::new(sender, receiver, amount))
                .await
        }));
    }

    let mut successes = 0;
    for task in tasks {
        match task.await.expect("task panicked") {
            Ok(_) => successes += 1,
            Err(AppError::Domain(DomainError::InsufficientFunds { .. })) => {}
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
    assert_eq!(successes, 1);

    // Sender drained to zero, never below; exactly one receiver credited
    let store = AccountStore::new(pool.clone());
    let sender_balance = store.get(sender).await.unwrap().unwrap().balance;
    assert_eq!(sender_balance, MinorUnits::ZERO);

    let a = store.get(receiver_a).await.unwrap().unwrap().balance.value();
    let b = store.get(receiver_b).await.unwrap().unwrap().balance.value();
    assert_eq!(a + b, 1000);

    // Exactly one TRANSFER record exists
    let transfers: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE kind = 'TRANSFER'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(transfers, 1);
}

#[tokio::test]
async fn test_transfer_storm_preserves_invariants() {
    let pool = common::setup_test_db().await;

    // Balance covers three of four concurrent 5.00 transfers
    let sender = new_wallet(&pool).await;
    fund(&pool, sender, Amount::new(dec!(15.00)).unwrap()).await;

    let mut receivers = Vec::new();
    for _ in 0..4 {
        receivers.push(new_wallet(&pool).await);
    }

    let amount = Amount::new(dec!(5.00)).unwrap();
    let mut tasks = Vec::new();
    for &receiver in &receivers {
        let pool = pool.clone();
        tasks.push(tokio::spawn(async move {
            TransferHandler::new(pool)
                .execute(TransferCommand::new(sender, receiver, amount))
                .await
        }));
    }

    let mut successes = 0;
    for task in tasks {
        match task.await.expect("task panicked") {
            Ok(result) => {
                assert!(!result.sender.balance.is_negative());
                successes += 1;
            }
            Err(AppError::Domain(DomainError::InsufficientFunds { .. })) => {}
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
    assert_eq!(successes, 3);

    // Conservation: everything the sender lost, the receivers gained
    let store = AccountStore::new(pool.clone());
    assert_eq!(
        store.get(sender).await.unwrap().unwrap().balance,
        MinorUnits::ZERO
    );

    let mut credited = 0;
    for receiver in receivers {
        credited += store.get(receiver).await.unwrap().unwrap().balance.value();
    }
    assert_eq!(credited, 1500);
}

#[tokio::test]
async fn test_adjust_balance_floor_rolls_back() {
    let pool = common::setup_test_db().await;
    let store = AccountStore::new(pool.clone());

    let wallet = store.create("USD").await.unwrap();

    let mut tx = pool.begin().await.unwrap();

    let credited = store
        .adjust_balance(&mut tx, wallet.id, MinorUnits::new(500), MinorUnits::ZERO)
        .await
        .unwrap();
    assert_eq!(credited.unwrap().balance, MinorUnits::new(500));

    // Overdraw within the same unit violates the floor
    let debited = store
        .adjust_balance(&mut tx, wallet.id, MinorUnits::new(-600), MinorUnits::ZERO)
        .await
        .unwrap();
    assert!(debited.is_none());

    // Dropping the transaction rolls back the credit as well
    drop(tx);

    let wallet = store.get(wallet.id).await.unwrap().unwrap();
    assert_eq!(wallet.balance, MinorUnits::ZERO);
}

#[tokio::test]
async fn test_deposit_advances_updated_at() {
    let pool = common::setup_test_db().await;
    let store = AccountStore::new(pool.clone());

    let wallet_id = new_wallet(&pool).await;
    let before = store.get(wallet_id).await.unwrap().unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    fund(&pool, wallet_id, Amount::new(dec!(1.00)).unwrap()).await;

    let after = store.get(wallet_id).await.unwrap().unwrap();
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_failed_transfer_writes_nothing() {
    let pool = common::setup_test_db().await;

    let sender = new_wallet(&pool).await;
    let receiver = new_wallet(&pool).await;
    fund(&pool, sender, Amount::new(dec!(1.00)).unwrap()).await;

    let result = TransferHandler::new(pool.clone())
        .execute(TransferCommand::new(
            sender,
            receiver,
            Amount::new(dec!(2.00)).unwrap(),
        ))
        .await;
    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::InsufficientFunds { .. }))
    ));

    // Exactly one record total: the deposit. The failed transfer left none.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
