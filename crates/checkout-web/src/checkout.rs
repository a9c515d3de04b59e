//! Payment Modal
//!
//! The membership payment dialog. Opening it (setting a plan selection)
//! requests a fresh payment intent; once the secret arrives the Stripe
//! payment element mounts and the confirmation flow takes over. Reopening
//! the dialog, or switching plans, always starts over with a new intent.

use leptos::prelude::*;
use leptos::task::spawn_local;

use checkout_core::{
    request_intent, Amount, CheckoutFlow, ClientSecret, FlowState, IntentRequest,
};
use checkout_stripe::{PaymentElementHandle, PaymentElementOptions, StripeProvider};

use crate::api::{ApiClient, CheckoutConfig};

/// The plan the user is paying for
#[derive(Clone, Debug, PartialEq)]
pub struct PlanSelection {
    pub label: String,
    pub amount: Amount,
}

type ModalFlow = CheckoutFlow<StripeProvider, ApiClient>;

/// Membership payment dialog
///
/// `selection` doubles as the open/closed switch: `Some(plan)` opens the
/// dialog, `None` closes it. `on_paid` fires exactly once per recorded
/// payment.
#[component]
pub fn PaymentModal(
    selection: RwSignal<Option<PlanSelection>>,
    #[prop(into)] on_paid: Callback<()>,
    api: ApiClient,
    config: CheckoutConfig,
) -> impl IntoView {
    let api = StoredValue::new_local(api);
    let flow_store = StoredValue::new_local(None::<ModalFlow>);
    let element_store = StoredValue::new_local(None::<PaymentElementHandle>);
    let intent_epoch = StoredValue::new(0_u32);

    let (secret, set_secret) = signal(None::<String>);
    let (flow_state, set_flow_state) = signal(None::<FlowState>);
    let (setup_error, set_setup_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);
    let (close_armed, set_close_armed) = signal(false);

    // Fresh intent on every open and on every change of terms; a secret
    // tied to a previous selection is discarded.
    Effect::new(move |_| {
        let current = selection.get();

        set_secret.set(None);
        set_flow_state.set(None);
        set_setup_error.set(None);
        set_close_armed.set(false);
        flow_store.set_value(None);
        element_store.update_value(|slot| {
            if let Some(handle) = slot.take() {
                let _ = handle.unmount();
            }
        });

        let Some(plan) = current else { return };

        // A response that arrives after the selection changed again belongs
        // to a superseded intent and is dropped.
        let epoch = intent_epoch.with_value(|e| e + 1);
        intent_epoch.set_value(epoch);

        let api = api.get_value();
        spawn_local(async move {
            let outcome = match IntentRequest::new(plan.amount, &plan.label) {
                Ok(request) => request_intent(&api, &request).await,
                Err(e) => Err(e),
            };
            if intent_epoch.get_value() != epoch {
                return;
            }
            match outcome {
                Ok(cs) => set_secret.set(Some(cs.as_str().to_string())),
                Err(e) => set_setup_error.set(Some(e.user_message().to_string())),
            }
        });
    });

    // Mount the payment element once a secret exists, and hand the provider
    // to a fresh confirmation flow.
    let mount_config = config;
    Effect::new(move |_| {
        let Some(raw) = secret.get() else { return };
        let Some(plan) = selection.get_untracked() else { return };
        let Ok(cs) = ClientSecret::new(raw) else { return };

        let config = mount_config.clone();
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        let return_url = format!("{origin}/complete");

        let mut provider = match StripeProvider::connect(&config.publishable_key) {
            Ok(provider) => provider.with_return_url(return_url),
            Err(e) => {
                set_setup_error.set(Some(e.user_message()));
                return;
            }
        };
        if let Err(e) = provider.init_elements(&cs) {
            set_setup_error.set(Some(e.user_message()));
            return;
        }

        match provider.mount_payment_element("#payment-element", &PaymentElementOptions::default())
        {
            Ok(handle) => {
                element_store.set_value(Some(handle));
                let flow = CheckoutFlow::new(provider, api.get_value(), cs, plan.amount)
                    .on_paid(move |_| on_paid.run(()));
                flow_store.set_value(Some(flow));
            }
            Err(e) => set_setup_error.set(Some(e.user_message())),
        }
    });

    // The flow is taken out for the duration of the call, so a second click
    // finds nothing and is a no-op: before the element mounts, and while a
    // confirmation is in flight.
    let on_submit = move |_| {
        let Some(mut flow) = flow_store.try_update_value(|slot| slot.take()).flatten() else {
            return;
        };
        set_submitting.set(true);
        set_close_armed.set(false);

        spawn_local(async move {
            let state = flow.submit().await.clone();
            set_flow_state.set(Some(state));
            flow_store.set_value(Some(flow));
            set_submitting.set(false);
        });
    };

    // Closing a dialog whose charge went through unrecorded first surfaces
    // the support message; only an explicit second click dismisses it.
    let on_close = move |_| {
        let recording_failed = matches!(
            flow_state.get_untracked(),
            Some(FlowState::RecordingFailed { .. })
        );
        if recording_failed && !close_armed.get_untracked() {
            set_close_armed.set(true);
            return;
        }
        selection.set(None);
    };

    let message = move || {
        setup_error
            .get()
            .or_else(|| flow_state.get().and_then(|s| s.status_message().map(String::from)))
    };
    let recording_failed =
        move || matches!(flow_state.get(), Some(FlowState::RecordingFailed { .. }));
    let can_pay = move || {
        secret.get().is_some()
            && !submitting.get()
            && flow_state.get().is_none_or(|s| s.can_submit())
    };

    view! {
        <div class="modal-overlay" class:open=move || selection.get().is_some()>
            <div class="modal">
                <header class="modal-header">
                    <h2>{move || selection.get().map(|p| p.label).unwrap_or_default()}</h2>
                    <span class="price">
                        {move || {
                            selection.get().map(|p| p.amount.to_string()).unwrap_or_default()
                        }}
                    </span>
                </header>

                <div id="payment-element"></div>

                <Show when=move || message().is_some()>
                    <p class="status" class:alert=recording_failed>
                        {move || message().unwrap_or_default()}
                    </p>
                </Show>

                <button class="btn btn-primary" on:click=on_submit disabled=move || !can_pay()>
                    {move || if submitting.get() { "Processing…" } else { "Pay now" }}
                </button>
                <button class="btn" on:click=on_close>
                    {move || {
                        if recording_failed() && close_armed.get() {
                            "Close anyway"
                        } else {
                            "Close"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
