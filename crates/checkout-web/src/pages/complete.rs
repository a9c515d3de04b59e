//! Redirect Return Page
//!
//! Redirect-based payment methods send the browser off-site and back here
//! with the intent's client secret in the query string. The intent status
//! is re-queried once and mapped to a message; no new confirmation and no
//! ledger write happen on this path.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;

use checkout_core::{redirect_state, ClientSecret, PaymentProvider};
use checkout_stripe::StripeProvider;

use crate::api::CheckoutConfig;

#[component]
pub fn CompletePage() -> impl IntoView {
    let (message, set_message) = signal(String::from("Checking your payment…"));

    let query = use_query_map();
    let raw_secret = query.with_untracked(|q| q.get("payment_intent_client_secret"));

    match raw_secret {
        Some(raw) => {
            let config = CheckoutConfig::from_window();
            spawn_local(async move {
                let provider = match StripeProvider::connect(&config.publishable_key) {
                    Ok(provider) => provider,
                    Err(e) => {
                        set_message.set(e.user_message());
                        return;
                    }
                };
                match ClientSecret::new(raw) {
                    Ok(secret) => match provider.retrieve(&secret).await {
                        Ok(status) => {
                            let state = redirect_state(status);
                            if let Some(text) = state.status_message() {
                                set_message.set(text.to_string());
                            }
                        }
                        Err(e) => set_message.set(e.user_message()),
                    },
                    Err(e) => set_message.set(e.user_message().to_string()),
                }
            });
        }
        None => set_message.set("No payment to check.".into()),
    }

    view! {
        <div class="complete">
            <h1>"Payment status"</h1>
            <p class="status">{move || message.get()}</p>
            <a href="/" class="btn">"Back to membership plans"</a>
        </div>
    }
}
