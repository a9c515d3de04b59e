//! Payment Element Configuration
//!
//! Option structs serialized across the JS boundary, and the handle that
//! owns a mounted payment element.

use serde::Serialize;

use checkout_core::ProviderError;

use crate::bindings::PaymentElement;
use crate::provider::js_error;

/// Configuration for `stripe.elements(...)`
#[derive(Debug, Serialize)]
pub struct ElementsOptions {
    /// Client secret of the intent this form confirms
    #[serde(rename = "clientSecret")]
    pub client_secret: String,

    /// Optional appearance settings (colors, fonts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<serde_json::Value>,
}

/// Customization for `elements.create("payment", ...)`
#[derive(Debug, Default, Serialize)]
pub struct PaymentElementOptions {
    /// Layout style: "tabs" or "accordion"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

/// Parameters for `stripe.confirmPayment({ confirmParams })`
#[derive(Debug, Default, Serialize)]
pub struct ConfirmParams {
    /// Where redirect-based payment methods return the browser to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

/// A mounted payment element. Unmount before mounting a replacement into
/// the same container.
pub struct PaymentElementHandle {
    element: PaymentElement,
}

impl PaymentElementHandle {
    pub(crate) fn new(element: PaymentElement) -> Self {
        Self { element }
    }

    pub fn unmount(&self) -> Result<(), ProviderError> {
        self.element.unmount().map_err(|e| js_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_options_wire_keys() {
        let options = ElementsOptions {
            client_secret: "pi_1_secret_2".into(),
            appearance: None,
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value, serde_json::json!({ "clientSecret": "pi_1_secret_2" }));
    }

    #[test]
    fn test_confirm_params_skip_absent_return_url() {
        let value = serde_json::to_value(ConfirmParams::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));

        let value = serde_json::to_value(ConfirmParams {
            return_url: Some("https://app.example/complete".into()),
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "return_url": "https://app.example/complete" })
        );
    }
}
