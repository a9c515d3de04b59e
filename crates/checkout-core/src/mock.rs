//! Mock Collaborators
//!
//! Scripted stand-ins for the payment provider and the platform backend,
//! for tests and demos. Outcomes are queued up front; call counters let
//! tests assert exactly-once behavior.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::api::PlatformClient;
use crate::error::{CheckoutError, Result};
use crate::intent::{ClientSecret, IntentRequest, IntentStatus};
use crate::provider::{ConfirmOutcome, PaymentProvider, ProviderError};
use crate::transaction::TransactionRecord;

/// Mock payment provider with scripted confirm/retrieve outcomes
pub struct MockProvider {
    confirm_queue: RefCell<VecDeque<std::result::Result<ConfirmOutcome, ProviderError>>>,
    retrieve_status: Cell<IntentStatus>,
    confirm_calls: Cell<usize>,
    retrieve_calls: Cell<usize>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            confirm_queue: RefCell::new(VecDeque::new()),
            retrieve_status: Cell::new(IntentStatus::RequiresPaymentMethod),
            confirm_calls: Cell::new(0),
            retrieve_calls: Cell::new(0),
        }
    }

    /// Provider whose every confirmation succeeds with the given intent id
    pub fn succeeding(intent_id: &str) -> Self {
        let provider = Self::new();
        provider.push_confirm(Ok(ConfirmOutcome {
            intent_id: intent_id.into(),
            status: IntentStatus::Succeeded,
        }));
        provider
    }

    /// Queue the outcome of the next confirmation call
    pub fn push_confirm(&self, result: std::result::Result<ConfirmOutcome, ProviderError>) {
        self.confirm_queue.borrow_mut().push_back(result);
    }

    /// Set the status every retrieve call reports
    #[must_use]
    pub fn with_retrieve(self, status: IntentStatus) -> Self {
        self.retrieve_status.set(status);
        self
    }

    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.get()
    }

    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.get()
    }
}

#[async_trait(?Send)]
impl PaymentProvider for MockProvider {
    async fn confirm(&self) -> std::result::Result<ConfirmOutcome, ProviderError> {
        self.confirm_calls.set(self.confirm_calls.get() + 1);
        self.confirm_queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::api("no scripted confirm outcome left")))
    }

    async fn retrieve(
        &self,
        _secret: &ClientSecret,
    ) -> std::result::Result<IntentStatus, ProviderError> {
        self.retrieve_calls.set(self.retrieve_calls.get() + 1);
        Ok(self.retrieve_status.get())
    }
}

#[derive(Default)]
struct MockPlatformInner {
    fail_create: Cell<bool>,
    fail_record: Cell<bool>,
    create_calls: Cell<usize>,
    record_calls: Cell<usize>,
    records: RefCell<Vec<TransactionRecord>>,
}

/// Mock platform backend. Clones share state, so a test can keep a handle
/// while the flow owns another.
#[derive(Clone, Default)]
pub struct MockPlatformClient {
    inner: Rc<MockPlatformInner>,
}

impl MockPlatformClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every intent creation fails (setup-error path)
    #[must_use]
    pub fn failing_create(self) -> Self {
        self.inner.fail_create.set(true);
        self
    }

    /// Every ledger write fails (charged-but-unrecorded path)
    #[must_use]
    pub fn failing_record(self) -> Self {
        self.inner.fail_record.set(true);
        self
    }

    pub fn create_calls(&self) -> usize {
        self.inner.create_calls.get()
    }

    pub fn record_calls(&self) -> usize {
        self.inner.record_calls.get()
    }

    /// Ledger entries written so far
    pub fn records(&self) -> Vec<TransactionRecord> {
        self.inner.records.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PlatformClient for MockPlatformClient {
    async fn create_intent(&self, _request: &IntentRequest) -> Result<ClientSecret> {
        let call = self.inner.create_calls.get() + 1;
        self.inner.create_calls.set(call);

        if self.inner.fail_create.get() {
            return Err(CheckoutError::IntentCreation("scripted failure".into()));
        }
        ClientSecret::new(format!("pi_mock_{call}_secret_{call}"))
    }

    async fn record_payment(&self, record: &TransactionRecord) -> Result<()> {
        self.inner.record_calls.set(self.inner.record_calls.get() + 1);

        if self.inner.fail_record.get() {
            return Err(CheckoutError::Record("scripted network failure".into()));
        }
        self.inner.records.borrow_mut().push(record.clone());
        Ok(())
    }
}
