//! Ledger Transaction Records
//!
//! The platform's own durable record of a completed payment, distinct from
//! the provider's intent. Written if and only if the provider reports the
//! charge succeeded; immutable once created.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::Amount;

/// Payment method label the ledger expects for card charges
pub const CARD_METHOD: &str = "Card (Stripe)";

/// Ledger entry status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TransactionStatus {
    Completed,
    Failed,
    Pending,
}

/// A platform ledger entry for one payment
#[derive(Clone, Debug, Serialize)]
pub struct TransactionRecord {
    /// Amount in major currency units (e.g. 9.99)
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Payment method label
    pub method: String,

    /// Ledger status
    pub status: TransactionStatus,

    /// Free text; carries the provider transaction id for reconciliation
    pub notes: String,
}

impl TransactionRecord {
    /// Record a completed card charge against the provider intent id.
    pub fn completed_card(amount: Amount, intent_id: &str) -> Self {
        Self {
            amount: amount.major(),
            method: CARD_METHOD.into(),
            status: TransactionStatus::Completed,
            notes: format!("Stripe transaction id: {intent_id}"),
        }
    }
}
