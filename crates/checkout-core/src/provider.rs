//! Payment Provider Strategy Pattern
//!
//! Defines the interface the confirmation flow drives: confirm the payment
//! the user entered into the hosted widget, and re-query an intent's status
//! after a redirect return. The provider owns the intent's state; this side
//! only observes it.
//!
//! Implement this per provider integration (the Stripe.js payment element
//! lives in `checkout-stripe`; tests use `MockProvider`).

use async_trait::async_trait;
use thiserror::Error;

use crate::intent::{ClientSecret, IntentStatus};

/// Message shown when the provider fails for a reason the user cannot act on
pub const GENERIC_PROVIDER_MESSAGE: &str =
    "An unexpected error occurred while processing your payment.";

/// Classification of a provider error, driving what the user may see
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Card declined, expired, insufficient funds, ...
    Card,
    /// The entered payment details failed validation
    Validation,
    /// Provider API or network failure
    Api,
    /// Anything the provider did not classify
    Unknown,
}

/// Error reported by the payment provider
#[derive(Clone, Debug, Error)]
#[error("provider error ({kind:?}): {message}")]
pub struct ProviderError {
    /// Provider-supplied description
    pub message: String,

    /// Error class
    pub kind: ProviderErrorKind,

    /// Provider error code (e.g. "card_declined")
    pub code: Option<String>,
}

impl ProviderError {
    /// Build from the provider's raw `type`/`message`/`code` triple.
    pub fn from_parts(
        message: impl Into<String>,
        error_type: Option<&str>,
        code: Option<String>,
    ) -> Self {
        let kind = match error_type {
            Some("card_error") => ProviderErrorKind::Card,
            Some("validation_error") => ProviderErrorKind::Validation,
            Some(_) => ProviderErrorKind::Api,
            None => ProviderErrorKind::Unknown,
        };
        Self {
            message: message.into(),
            kind,
            code,
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ProviderErrorKind::Api,
            code: None,
        }
    }

    /// Text safe to show the user: card and validation errors surface the
    /// provider's own description verbatim, every other class gets a generic
    /// message so internal diagnostics never leak.
    pub fn user_message(&self) -> String {
        match self.kind {
            ProviderErrorKind::Card | ProviderErrorKind::Validation => self.message.clone(),
            ProviderErrorKind::Api | ProviderErrorKind::Unknown => {
                GENERIC_PROVIDER_MESSAGE.into()
            }
        }
    }
}

/// Result of a confirmation call that did not error
#[derive(Clone, Debug)]
pub struct ConfirmOutcome {
    /// Provider intent identifier (e.g. "pi_123")
    pub intent_id: String,

    /// Status the provider reported after confirmation
    pub status: IntentStatus,
}

/// Payment provider interface (Strategy pattern)
///
/// Futures are `?Send`: implementations drive browser APIs on the wasm
/// event loop.
#[async_trait(?Send)]
pub trait PaymentProvider {
    /// Submit the payment details the user entered and confirm the intent
    async fn confirm(&self) -> Result<ConfirmOutcome, ProviderError>;

    /// Re-query an intent's status (redirect-return path)
    async fn retrieve(&self, secret: &ClientSecret) -> Result<IntentStatus, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_errors_surface_verbatim() {
        let err = ProviderError::from_parts(
            "Your card was declined.",
            Some("card_error"),
            Some("card_declined".into()),
        );
        assert_eq!(err.kind, ProviderErrorKind::Card);
        assert_eq!(err.user_message(), "Your card was declined.");
    }

    #[test]
    fn test_validation_errors_surface_verbatim() {
        let err = ProviderError::from_parts(
            "Your card number is incomplete.",
            Some("validation_error"),
            None,
        );
        assert_eq!(err.user_message(), "Your card number is incomplete.");
    }

    #[test]
    fn test_other_errors_stay_generic() {
        let err = ProviderError::from_parts(
            "upstream gateway timeout in zone us-east-1",
            Some("api_error"),
            None,
        );
        assert_eq!(err.user_message(), GENERIC_PROVIDER_MESSAGE);

        let unknown = ProviderError::from_parts("stack trace ...", None, None);
        assert_eq!(unknown.user_message(), GENERIC_PROVIDER_MESSAGE);
    }
}
