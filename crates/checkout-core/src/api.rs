//! Platform Backend Interface
//!
//! The fitness platform's REST backend, seen only through the two calls the
//! checkout makes: create a payment intent, and record a completed payment
//! on the ledger. Implementations carry the caller's bearer credential
//! internally; nothing here reads ambient token storage.

use async_trait::async_trait;

use crate::error::Result;
use crate::intent::{ClientSecret, IntentRequest};
use crate::transaction::TransactionRecord;

/// Authenticated client for the platform payment API
#[async_trait(?Send)]
pub trait PlatformClient {
    /// `POST /payment/create-payment-intent`: returns the intent's client secret
    async fn create_intent(&self, request: &IntentRequest) -> Result<ClientSecret>;

    /// `POST /payment`: write one completed transaction to the ledger.
    ///
    /// Fire-once: callers must not retry automatically, a second write for
    /// the same charge risks double-recording.
    async fn record_payment(&self, record: &TransactionRecord) -> Result<()>;
}
