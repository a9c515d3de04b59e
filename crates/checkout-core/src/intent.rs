//! Payment Intents
//!
//! The intent initiator: request a provider-issued payment intent from the
//! platform backend and hand its client secret to the confirmation flow.
//! The intent itself lives at the payment provider; this side only ever
//! holds the opaque secret and observes the status lifecycle.

use serde::{Deserialize, Serialize};

use crate::api::PlatformClient;
use crate::error::{CheckoutError, Result};
use crate::money::Amount;

/// Request to create a payment intent for a plan purchase
#[derive(Clone, Debug, Serialize)]
pub struct IntentRequest {
    /// Charge amount in minor units
    pub amount: Amount,

    /// Plan label shown on the platform (e.g. "Premium")
    #[serde(rename = "planType")]
    pub plan_type: String,
}

impl IntentRequest {
    /// Build a validated request. The plan label must be non-empty.
    pub fn new(amount: Amount, plan_type: impl Into<String>) -> Result<Self> {
        let plan_type = plan_type.into();
        if plan_type.trim().is_empty() {
            return Err(CheckoutError::EmptyPlan);
        }
        Ok(Self { amount, plan_type })
    }
}

/// Opaque client secret identifying a payment intent.
///
/// Construction rejects blank values, so a confirmation flow can never be
/// built around an undefined payment context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(CheckoutError::EmptySecret);
        }
        Ok(Self(secret))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Provider-side status of a payment intent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

/// Obtain a fresh payment intent for the given terms.
///
/// Called whenever the payment dialog opens or its amount/plan changes, so a
/// stale intent tied to different terms is never reused. Failures are logged
/// and surfaced as setup errors; no secret is produced.
pub async fn request_intent<A: PlatformClient + ?Sized>(
    api: &A,
    request: &IntentRequest,
) -> Result<ClientSecret> {
    tracing::debug!(
        amount = request.amount.minor(),
        plan = %request.plan_type,
        "creating payment intent"
    );

    match api.create_intent(request).await {
        Ok(secret) => Ok(secret),
        Err(e) => {
            tracing::warn!(error = %e, "payment intent creation failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPlatformClient;

    #[test]
    fn test_request_wire_format() {
        let request =
            IntentRequest::new(Amount::from_minor(999).unwrap(), "Premium").unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "amount": 999, "planType": "Premium" })
        );
    }

    #[test]
    fn test_rejects_blank_plan() {
        let amount = Amount::from_minor(999).unwrap();
        assert!(matches!(
            IntentRequest::new(amount, "   "),
            Err(CheckoutError::EmptyPlan)
        ));
    }

    #[test]
    fn test_rejects_blank_secret() {
        assert!(matches!(
            ClientSecret::new(""),
            Err(CheckoutError::EmptySecret)
        ));
        assert!(ClientSecret::new("pi_123_secret_456").is_ok());
    }

    #[test]
    fn test_status_parses_snake_case() {
        let status: IntentStatus =
            serde_json::from_value(serde_json::json!("requires_payment_method")).unwrap();
        assert_eq!(status, IntentStatus::RequiresPaymentMethod);

        let status: IntentStatus =
            serde_json::from_value(serde_json::json!("some_future_status")).unwrap();
        assert_eq!(status, IntentStatus::Unknown);
    }

    #[tokio::test]
    async fn test_reopening_creates_fresh_intent() {
        let api = MockPlatformClient::new();
        let request =
            IntentRequest::new(Amount::from_minor(999).unwrap(), "Premium").unwrap();

        let first = request_intent(&api, &request).await.unwrap();
        let second = request_intent(&api, &request).await.unwrap();

        assert_ne!(first, second, "a reopened dialog must not reuse a stale intent");
        assert_eq!(api.create_calls(), 2);
    }

    #[tokio::test]
    async fn test_creation_failure_produces_no_secret() {
        let api = MockPlatformClient::new().failing_create();
        let request =
            IntentRequest::new(Amount::from_minor(999).unwrap(), "Premium").unwrap();

        let result = request_intent(&api, &request).await;
        assert!(matches!(result, Err(CheckoutError::IntentCreation(_))));
    }
}
