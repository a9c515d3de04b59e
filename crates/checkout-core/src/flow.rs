//! Payment Confirmation Flow
//!
//! Drives one payment attempt from "widget rendered" to a terminal outcome,
//! and records success on the platform ledger exactly once.
//!
//! ```text
//!          submit                 provider error        submit
//!  Idle ──────────> Submitting ──────────────────> Failed ────> Submitting ...
//!                       │
//!                       ├─ status: processing ───> Processing
//!                       ├─ status: requires_* ───> RequiresAction
//!                       └─ status: succeeded ─┬──> Succeeded   (ledger write ok)
//!                                             └──> RecordingFailed
//! ```
//!
//! `RecordingFailed` means the charge went through but the ledger write did
//! not: a distinct, user-visible state that must never be collapsed into an
//! ordinary failure, and never retried automatically.

use crate::api::PlatformClient;
use crate::intent::{ClientSecret, IntentStatus};
use crate::money::Amount;
use crate::provider::{PaymentProvider, ProviderErrorKind};
use crate::transaction::TransactionRecord;

pub const MSG_SUCCEEDED: &str = "Payment succeeded!";
pub const MSG_PROCESSING: &str = "Your payment is processing.";
pub const MSG_RETRY: &str = "Your payment was not successful, please try again.";
pub const MSG_ACTION_NEEDED: &str =
    "Your payment needs an additional step before it can complete.";
pub const MSG_UNEXPECTED: &str = "Something went wrong.";
pub const MSG_RECORDING_FAILED: &str = "Your payment went through, but we could not record \
     it on your account. Please contact support and do not pay again.";

/// Single-fire success continuation, invoked exactly once per recorded payment
pub type OnPaid = Box<dyn FnOnce(&TransactionRecord)>;

/// Tagged flow state; every transition is an exhaustive match on this
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowState {
    /// Widget rendered, secret present, awaiting submission
    Idle,
    /// Confirmation in flight; resubmission disabled
    Submitting,
    /// Provider wants more from the user before the charge can complete
    RequiresAction { message: String },
    /// Provider is settling the charge asynchronously
    Processing,
    /// Charge completed; `recorded` is true once the ledger write landed
    Succeeded { recorded: bool },
    /// Charge failed or was rejected; resubmission permitted
    Failed { message: String },
    /// Charge succeeded but the ledger write failed; manual follow-up needed
    RecordingFailed { intent_id: String },
}

impl FlowState {
    /// Whether a new confirmation attempt may start from this state.
    ///
    /// `Submitting` is the reentrancy guard; `Processing`, `Succeeded` and
    /// `RecordingFailed` block resubmission because a charge may exist.
    pub fn can_submit(&self) -> bool {
        matches!(
            self,
            FlowState::Idle | FlowState::Failed { .. } | FlowState::RequiresAction { .. }
        )
    }

    /// User-visible status text for this state, if any
    pub fn status_message(&self) -> Option<&str> {
        match self {
            FlowState::Idle | FlowState::Submitting => None,
            FlowState::RequiresAction { message } | FlowState::Failed { message } => {
                Some(message)
            }
            FlowState::Processing => Some(MSG_PROCESSING),
            FlowState::Succeeded { .. } => Some(MSG_SUCCEEDED),
            FlowState::RecordingFailed { .. } => Some(MSG_RECORDING_FAILED),
        }
    }
}

/// Map an intent status re-queried after a redirect return onto a flow state.
///
/// No confirmation is triggered and nothing is recorded; the message is all
/// the user gets (off-site completions are reconciled by the backend's
/// provider-webhook contract).
pub fn redirect_state(status: IntentStatus) -> FlowState {
    match status {
        IntentStatus::Succeeded => FlowState::Succeeded { recorded: false },
        IntentStatus::Processing => FlowState::Processing,
        IntentStatus::RequiresPaymentMethod => FlowState::RequiresAction {
            message: MSG_RETRY.into(),
        },
        _ => FlowState::Failed {
            message: MSG_UNEXPECTED.into(),
        },
    }
}

/// One payment attempt: a provider, an authenticated platform client, the
/// intent's secret, and the tagged state.
///
/// Constructing a flow requires a [`ClientSecret`], so confirmation can never
/// be attempted without a payment context. Each open dialog owns its own
/// flow; there is no cross-instance shared state.
pub struct CheckoutFlow<P, A> {
    provider: P,
    api: A,
    secret: ClientSecret,
    amount: Amount,
    state: FlowState,
    on_paid: Option<OnPaid>,
}

impl<P: PaymentProvider, A: PlatformClient> CheckoutFlow<P, A> {
    pub fn new(provider: P, api: A, secret: ClientSecret, amount: Amount) -> Self {
        Self {
            provider,
            api,
            secret,
            amount,
            state: FlowState::Idle,
            on_paid: None,
        }
    }

    /// Attach the success continuation. It fires at most once, after the
    /// ledger write lands.
    #[must_use]
    pub fn on_paid(mut self, callback: impl FnOnce(&TransactionRecord) + 'static) -> Self {
        self.on_paid = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Confirm the payment the user entered.
    ///
    /// No-op unless the current state permits submission, which makes
    /// concurrent duplicate confirmations from one dialog impossible.
    pub async fn submit(&mut self) -> &FlowState {
        if !self.state.can_submit() {
            return &self.state;
        }
        self.state = FlowState::Submitting;

        match self.provider.confirm().await {
            Err(err) => {
                match err.kind {
                    ProviderErrorKind::Card | ProviderErrorKind::Validation => {
                        tracing::info!(code = ?err.code, "payment rejected by provider");
                    }
                    ProviderErrorKind::Api | ProviderErrorKind::Unknown => {
                        tracing::error!(error = %err, "payment confirmation failed");
                    }
                }
                self.state = FlowState::Failed {
                    message: err.user_message(),
                };
            }
            Ok(outcome) => {
                tracing::info!(
                    intent = %outcome.intent_id,
                    status = ?outcome.status,
                    "payment confirmation returned"
                );
                match outcome.status {
                    IntentStatus::Succeeded => self.record(outcome.intent_id).await,
                    IntentStatus::Processing => self.state = FlowState::Processing,
                    IntentStatus::RequiresAction
                    | IntentStatus::RequiresConfirmation
                    | IntentStatus::RequiresCapture => {
                        self.state = FlowState::RequiresAction {
                            message: MSG_ACTION_NEEDED.into(),
                        };
                    }
                    IntentStatus::RequiresPaymentMethod => {
                        self.state = FlowState::Failed {
                            message: MSG_RETRY.into(),
                        };
                    }
                    IntentStatus::Canceled | IntentStatus::Unknown => {
                        self.state = FlowState::Failed {
                            message: MSG_UNEXPECTED.into(),
                        };
                    }
                }
            }
        }

        &self.state
    }

    /// Re-query the intent after a redirect return and map its status.
    pub async fn resume(&mut self) -> &FlowState {
        match self.provider.retrieve(&self.secret).await {
            Ok(status) => {
                tracing::info!(status = ?status, "resumed payment flow from redirect");
                self.state = redirect_state(status);
            }
            Err(err) => {
                tracing::warn!(error = %err, "intent status query failed");
                self.state = FlowState::Failed {
                    message: err.user_message(),
                };
            }
        }
        &self.state
    }

    /// Write the ledger record for a succeeded charge. Fire-once: a failure
    /// moves to `RecordingFailed` and is left for support/webhook
    /// reconciliation, never retried from the client.
    async fn record(&mut self, intent_id: String) {
        let record = TransactionRecord::completed_card(self.amount, &intent_id);

        match self.api.record_payment(&record).await {
            Ok(()) => {
                tracing::info!(intent = %intent_id, "transaction recorded");
                self.state = FlowState::Succeeded { recorded: true };
                if let Some(callback) = self.on_paid.take() {
                    callback(&record);
                }
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    intent = %intent_id,
                    "charge succeeded but ledger record failed"
                );
                self.state = FlowState::RecordingFailed { intent_id };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockPlatformClient, MockProvider};
    use crate::provider::{ConfirmOutcome, ProviderError, GENERIC_PROVIDER_MESSAGE};
    use rust_decimal_macros::dec;
    use std::cell::Cell;
    use std::rc::Rc;

    fn premium_flow(
        provider: MockProvider,
        api: MockPlatformClient,
    ) -> CheckoutFlow<MockProvider, MockPlatformClient> {
        CheckoutFlow::new(
            provider,
            api,
            ClientSecret::new("pi_123_secret_456").unwrap(),
            Amount::from_minor(999).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_success_records_ledger_once() {
        // Scenario: $9.99 Premium, valid card, provider returns succeeded.
        let api = MockPlatformClient::new();
        let fired = Rc::new(Cell::new(0));
        let fired_in_callback = fired.clone();

        let mut flow = premium_flow(MockProvider::succeeding("pi_abc"), api.clone())
            .on_paid(move |record| {
                assert_eq!(record.amount, dec!(9.99));
                fired_in_callback.set(fired_in_callback.get() + 1);
            });

        let state = flow.submit().await;
        assert_eq!(state, &FlowState::Succeeded { recorded: true });
        assert_eq!(api.record_calls(), 1);
        assert_eq!(fired.get(), 1);

        let recorded = api.records();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].amount, dec!(9.99));
        assert_eq!(recorded[0].method, "Card (Stripe)");
        assert!(recorded[0].notes.contains("pi_abc"));

        // A second submit from the recorded state is a no-op.
        flow.submit().await;
        assert_eq!(api.record_calls(), 1);
        assert_eq!(fired.get(), 1);
    }

    #[tokio::test]
    async fn test_card_decline_surfaces_verbatim_and_allows_retry() {
        let api = MockPlatformClient::new();
        let provider = MockProvider::new();
        provider.push_confirm(Err(ProviderError::from_parts(
            "Your card was declined.",
            Some("card_error"),
            Some("card_declined".into()),
        )));
        provider.push_confirm(Ok(ConfirmOutcome {
            intent_id: "pi_retry".into(),
            status: IntentStatus::Succeeded,
        }));

        let mut flow = premium_flow(provider, api.clone());

        let state = flow.submit().await.clone();
        assert_eq!(
            state,
            FlowState::Failed {
                message: "Your card was declined.".into()
            }
        );
        assert!(state.can_submit(), "decline must leave the flow resubmittable");
        assert_eq!(api.record_calls(), 0, "no ledger write for a failed charge");

        let state = flow.submit().await;
        assert_eq!(state, &FlowState::Succeeded { recorded: true });
        assert_eq!(api.record_calls(), 1);
    }

    #[tokio::test]
    async fn test_non_card_errors_stay_generic() {
        let api = MockPlatformClient::new();
        let provider = MockProvider::new();
        provider.push_confirm(Err(ProviderError::from_parts(
            "connection reset by peer at gateway 10.0.3.7",
            Some("api_error"),
            None,
        )));

        let mut flow = premium_flow(provider, api.clone());
        let state = flow.submit().await;

        assert_eq!(
            state.status_message(),
            Some(GENERIC_PROVIDER_MESSAGE),
            "provider internals must never leak"
        );
        assert_eq!(api.record_calls(), 0);
    }

    #[tokio::test]
    async fn test_recording_failure_is_distinct_terminal_state() {
        // Scenario: charge succeeds, ledger POST fails.
        let api = MockPlatformClient::new().failing_record();
        let fired = Rc::new(Cell::new(0));
        let fired_in_callback = fired.clone();

        let mut flow = premium_flow(MockProvider::succeeding("pi_abc"), api.clone())
            .on_paid(move |_| fired_in_callback.set(fired_in_callback.get() + 1));

        let state = flow.submit().await.clone();
        assert_eq!(
            state,
            FlowState::RecordingFailed {
                intent_id: "pi_abc".into()
            }
        );
        assert_eq!(
            state.status_message(),
            Some(MSG_RECORDING_FAILED),
            "must say the charge went through, not present a generic failure"
        );
        assert_eq!(fired.get(), 0, "success callback must not fire unrecorded");

        // No automatic retry, and no manual resubmission either: the charge
        // already exists.
        assert!(!state.can_submit());
        flow.submit().await;
        assert_eq!(api.record_calls(), 1);
    }

    #[tokio::test]
    async fn test_processing_is_non_terminal_without_record() {
        let api = MockPlatformClient::new();
        let provider = MockProvider::new();
        provider.push_confirm(Ok(ConfirmOutcome {
            intent_id: "pi_slow".into(),
            status: IntentStatus::Processing,
        }));

        let mut flow = premium_flow(provider, api.clone());
        let state = flow.submit().await;

        assert_eq!(state, &FlowState::Processing);
        assert_eq!(state.status_message(), Some(MSG_PROCESSING));
        assert_eq!(api.record_calls(), 0);
        assert!(!state.can_submit(), "a settling charge must not be resubmitted");
    }

    #[tokio::test]
    async fn test_resume_maps_redirect_statuses() {
        // Scenario: reload after an off-site redirect, intent still processing.
        let api = MockPlatformClient::new();
        let provider = MockProvider::new().with_retrieve(IntentStatus::Processing);

        let mut flow = premium_flow(provider, api.clone());
        let state = flow.resume().await;

        assert_eq!(state, &FlowState::Processing);
        assert_eq!(state.status_message(), Some(MSG_PROCESSING));
        assert_eq!(api.record_calls(), 0, "resume must not write the ledger");
    }

    #[tokio::test]
    async fn test_resume_succeeded_does_not_record() {
        let api = MockPlatformClient::new();
        let provider = MockProvider::new().with_retrieve(IntentStatus::Succeeded);

        let mut flow = premium_flow(provider, api.clone());
        let state = flow.resume().await;

        assert_eq!(state, &FlowState::Succeeded { recorded: false });
        assert_eq!(state.status_message(), Some(MSG_SUCCEEDED));
        assert_eq!(api.record_calls(), 0);
    }

    #[test]
    fn test_redirect_status_table() {
        assert_eq!(
            redirect_state(IntentStatus::RequiresPaymentMethod),
            FlowState::RequiresAction {
                message: MSG_RETRY.into()
            }
        );
        assert_eq!(
            redirect_state(IntentStatus::Canceled),
            FlowState::Failed {
                message: MSG_UNEXPECTED.into()
            }
        );
        assert_eq!(
            redirect_state(IntentStatus::Unknown),
            FlowState::Failed {
                message: MSG_UNEXPECTED.into()
            }
        );
    }

    #[test]
    fn test_submission_guard_table() {
        assert!(FlowState::Idle.can_submit());
        assert!(FlowState::Failed { message: "x".into() }.can_submit());
        assert!(FlowState::RequiresAction { message: "x".into() }.can_submit());

        assert!(!FlowState::Submitting.can_submit());
        assert!(!FlowState::Processing.can_submit());
        assert!(!FlowState::Succeeded { recorded: true }.can_submit());
        assert!(!FlowState::Succeeded { recorded: false }.can_submit());
        assert!(!FlowState::RecordingFailed { intent_id: "pi".into() }.can_submit());
    }
}
