//! Stripe Payment Provider
//!
//! Implements `checkout_core::PaymentProvider` on top of the Stripe.js
//! payment element: validate the entered details, confirm the intent with
//! `redirect: "if_required"`, and re-query intent status after a redirect
//! return.

use async_trait::async_trait;
use js_sys::{Object, Reflect};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use checkout_core::{
    ClientSecret, ConfirmOutcome, IntentStatus, PaymentProvider, ProviderError,
};

use crate::bindings;
use crate::element::{ConfirmParams, ElementsOptions, PaymentElementHandle, PaymentElementOptions};

/// Error object as Stripe.js reports it
#[derive(Debug, Deserialize)]
struct SdkError {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
}

impl From<SdkError> for ProviderError {
    fn from(err: SdkError) -> Self {
        ProviderError::from_parts(
            err.message.unwrap_or_else(|| "payment provider error".into()),
            err.error_type.as_deref(),
            err.code,
        )
    }
}

/// Intent fields this client reads back from Stripe.js
#[derive(Debug, Deserialize)]
struct SdkIntent {
    id: Option<String>,
    status: IntentStatus,
}

/// Resolved value of `confirmPayment` / `retrievePaymentIntent`
#[derive(Debug, Deserialize)]
struct SdkResult {
    error: Option<SdkError>,
    #[serde(rename = "paymentIntent")]
    payment_intent: Option<SdkIntent>,
}

/// Convert a thrown JS value or promise rejection into a `ProviderError`.
///
/// Reads `message`/`type`/`code` off the value directly, which covers both
/// plain Stripe error objects and `Error` instances.
pub(crate) fn js_error(value: &JsValue) -> ProviderError {
    let field = |key: &str| {
        Reflect::get(value, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
    };

    match field("message") {
        Some(message) => ProviderError::from_parts(message, field("type").as_deref(), field("code")),
        None => ProviderError::api(format!("{value:?}")),
    }
}

fn parse_result(value: JsValue) -> Result<SdkResult, ProviderError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| ProviderError::api(format!("malformed provider response: {e}")))
}

/// Stripe.js provider bound to one payment intent
pub struct StripeProvider {
    stripe: bindings::Stripe,
    elements: Option<bindings::Elements>,
    return_url: Option<String>,
}

impl StripeProvider {
    /// Connect to Stripe.js with the account's publishable key. Fails when
    /// the `js.stripe.com/v3` script tag has not loaded yet.
    pub fn connect(publishable_key: &str) -> Result<Self, ProviderError> {
        let stripe = bindings::stripe_connect(publishable_key).map_err(|e| js_error(&e))?;
        Ok(Self {
            stripe,
            elements: None,
            return_url: None,
        })
    }

    /// Where redirect-based payment methods should send the browser back to
    #[must_use]
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    /// Create the Elements group for the given intent
    pub fn init_elements(&mut self, secret: &ClientSecret) -> Result<(), ProviderError> {
        let options = ElementsOptions {
            client_secret: secret.as_str().into(),
            appearance: None,
        };
        let options = serde_wasm_bindgen::to_value(&options)
            .map_err(|e| ProviderError::api(e.to_string()))?;

        let elements = self.stripe.elements(options).map_err(|e| js_error(&e))?;
        self.elements = Some(elements);
        Ok(())
    }

    /// Create and mount the payment element into the given CSS selector
    pub fn mount_payment_element(
        &self,
        selector: &str,
        options: &PaymentElementOptions,
    ) -> Result<PaymentElementHandle, ProviderError> {
        let elements = self.require_elements()?;
        let options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| ProviderError::api(e.to_string()))?;

        let element = elements
            .create_element("payment", options)
            .map_err(|e| js_error(&e))?;
        element.mount(selector).map_err(|e| js_error(&e))?;

        tracing::debug!(selector, "payment element mounted");
        Ok(PaymentElementHandle::new(element))
    }

    fn require_elements(&self) -> Result<&bindings::Elements, ProviderError> {
        self.elements
            .as_ref()
            .ok_or_else(|| ProviderError::api("payment element is not mounted"))
    }

    /// `elements.submit()` resolves with `{ error }` on validation failure
    /// rather than rejecting.
    async fn validate(&self, elements: &bindings::Elements) -> Result<(), ProviderError> {
        let promise = elements.submit().map_err(|e| js_error(&e))?;
        let value = JsFuture::from(promise).await.map_err(|e| js_error(&e))?;

        if let Ok(result) = parse_result(value) {
            if let Some(error) = result.error {
                return Err(error.into());
            }
        }
        Ok(())
    }

    fn confirm_options(&self, elements: &bindings::Elements) -> Result<JsValue, ProviderError> {
        let params = ConfirmParams {
            return_url: self.return_url.clone(),
        };
        let params =
            serde_wasm_bindgen::to_value(&params).map_err(|e| ProviderError::api(e.to_string()))?;

        let options = Object::new();
        let set = |key: &str, value: &JsValue| {
            Reflect::set(&options, &JsValue::from_str(key), value)
                .map_err(|e| js_error(&e))
                .map(|_| ())
        };
        set("elements", elements.as_ref())?;
        set("confirmParams", &params)?;
        // Only leave the page for payment methods that require it
        set("redirect", &JsValue::from_str("if_required"))?;

        Ok(options.into())
    }
}

#[async_trait(?Send)]
impl PaymentProvider for StripeProvider {
    async fn confirm(&self) -> Result<ConfirmOutcome, ProviderError> {
        let elements = self.require_elements()?;
        self.validate(elements).await?;

        let options = self.confirm_options(elements)?;
        let promise = self.stripe.confirm_payment(options).map_err(|e| js_error(&e))?;
        let value = JsFuture::from(promise).await.map_err(|e| js_error(&e))?;

        let result = parse_result(value)?;
        if let Some(error) = result.error {
            return Err(error.into());
        }

        let intent = result
            .payment_intent
            .ok_or_else(|| ProviderError::api("confirmation returned no payment intent"))?;
        tracing::debug!(intent = ?intent.id, status = ?intent.status, "confirmPayment resolved");

        Ok(ConfirmOutcome {
            intent_id: intent.id.unwrap_or_default(),
            status: intent.status,
        })
    }

    async fn retrieve(&self, secret: &ClientSecret) -> Result<IntentStatus, ProviderError> {
        let promise = self
            .stripe
            .retrieve_payment_intent(secret.as_str())
            .map_err(|e| js_error(&e))?;
        let value = JsFuture::from(promise).await.map_err(|e| js_error(&e))?;

        let result = parse_result(value)?;
        if let Some(error) = result.error {
            return Err(error.into());
        }

        let intent = result
            .payment_intent
            .ok_or_else(|| ProviderError::api("retrieval returned no payment intent"))?;
        tracing::debug!(status = ?intent.status, "retrievePaymentIntent resolved");

        Ok(intent.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::ProviderErrorKind;

    #[test]
    fn test_sdk_error_maps_to_provider_error() {
        let sdk: SdkResult = serde_json::from_value(serde_json::json!({
            "error": {
                "type": "card_error",
                "code": "card_declined",
                "message": "Your card was declined."
            }
        }))
        .unwrap();

        let err: ProviderError = sdk.error.unwrap().into();
        assert_eq!(err.kind, ProviderErrorKind::Card);
        assert_eq!(err.message, "Your card was declined.");
        assert_eq!(err.code.as_deref(), Some("card_declined"));
    }

    #[test]
    fn test_sdk_result_parses_payment_intent() {
        let sdk: SdkResult = serde_json::from_value(serde_json::json!({
            "paymentIntent": {
                "id": "pi_123",
                "status": "succeeded",
                "amount": 999,
                "currency": "usd"
            }
        }))
        .unwrap();

        let intent = sdk.payment_intent.unwrap();
        assert_eq!(intent.id.as_deref(), Some("pi_123"));
        assert_eq!(intent.status, IntentStatus::Succeeded);
    }
}
