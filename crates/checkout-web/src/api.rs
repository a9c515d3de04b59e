//! Platform API Client
//!
//! Bearer-authenticated REST client for the fitness platform's payment
//! endpoints. The credential is injected at construction and travels with
//! the client; nothing in the checkout reaches into shared global state.

use async_trait::async_trait;
use serde::Deserialize;

use checkout_core::{
    CheckoutError, ClientSecret, IntentRequest, PlatformClient, Result, TransactionRecord,
};

/// Frontend checkout configuration
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Stripe publishable key (pk_...)
    pub publishable_key: String,

    /// Base URL of the platform REST API
    pub api_base: String,
}

impl CheckoutConfig {
    /// API base follows the current origin; the publishable key is baked in
    /// at build time.
    pub fn from_window() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".into());

        Self {
            publishable_key: option_env!("STRIPE_PUBLISHABLE_KEY")
                .unwrap_or("pk_test_placeholder")
                .into(),
            api_base: origin,
        }
    }
}

/// Bearer token handed over by the platform's auth flow after sign-in.
///
/// Read once at page construction and injected into [`ApiClient`]; the
/// checkout components themselves never touch storage.
pub fn auth_token() -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item("token").ok().flatten())
        .unwrap_or_default()
}

/// Authenticated client for the platform payment API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

#[derive(Deserialize)]
struct CreateIntentResponse {
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

#[async_trait(?Send)]
impl PlatformClient for ApiClient {
    async fn create_intent(&self, request: &IntentRequest) -> Result<ClientSecret> {
        let response = self
            .http
            .post(format!("{}/payment/create-payment-intent", self.base_url))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| CheckoutError::IntentCreation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CheckoutError::IntentCreation(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let body: CreateIntentResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::IntentCreation(e.to_string()))?;

        ClientSecret::new(body.client_secret)
    }

    async fn record_payment(&self, record: &TransactionRecord) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/payment", self.base_url))
            .bearer_auth(&self.token)
            .json(record)
            .send()
            .await
            .map_err(|e| CheckoutError::Record(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CheckoutError::Record(format!(
                "backend returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
