//! Wallet entity
//!
//! A wallet holds a non-negative balance in a single currency. The balance
//! is stored as integer minor units; only the store mutates it, and always
//! through the atomic conditional adjustment.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::money::MinorUnits;

/// A wallet record as persisted in the account store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wallet {
    /// Opaque unique identifier, assigned at creation.
    pub id: Uuid,
    /// Currency code, immutable after creation.
    pub currency: String,
    /// Balance in minor units, never negative.
    pub balance: MinorUnits,
    pub created_at: DateTime<Utc>,
    /// Advances on every balance mutation.
    pub updated_at: DateTime<Utc>,
}
