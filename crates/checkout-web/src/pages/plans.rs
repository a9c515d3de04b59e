//! Membership Plans Page

use leptos::prelude::*;

use checkout_core::Amount;

use crate::api::{auth_token, ApiClient, CheckoutConfig};
use crate::checkout::{PaymentModal, PlanSelection};

#[component]
pub fn PlansPage() -> impl IntoView {
    let config = CheckoutConfig::from_window();
    let api = ApiClient::new(config.api_base.clone(), auth_token());

    let selection = RwSignal::new(None::<PlanSelection>);
    let (paid, set_paid) = signal(false);
    let on_paid = Callback::new(move |()| set_paid.set(true));

    let choose = move |label: &str, cents: i64| {
        if let Ok(amount) = Amount::from_minor(cents) {
            selection.set(Some(PlanSelection {
                label: label.into(),
                amount,
            }));
        }
    };

    view! {
        <div class="plans-page">
            <h1>"Membership"</h1>
            <p class="subtitle">"Train smarter with a plan that fits"</p>

            <Show when=move || paid.get()>
                <div class="banner">"Membership active. Welcome aboard!"</div>
            </Show>

            <div class="plans">
                <div class="plan">
                    <h2>"Basic"</h2>
                    <div class="price">"$9.99"<span>"/month"</span></div>
                    <ul>
                        <li>"Workout tracking"</li>
                        <li>"3 training programs"</li>
                    </ul>
                    <button class="btn" on:click=move |_| choose("Basic", 999)>
                        "Join"
                    </button>
                </div>

                <div class="plan featured">
                    <span class="badge">"Popular"</span>
                    <h2>"Premium"</h2>
                    <div class="price">"$19.99"<span>"/month"</span></div>
                    <ul>
                        <li>"All training programs"</li>
                        <li>"Nutrition tracking"</li>
                        <li>"Trainer chat"</li>
                    </ul>
                    <button class="btn btn-primary" on:click=move |_| choose("Premium", 1999)>
                        "Join"
                    </button>
                </div>

                <div class="plan">
                    <h2>"Pro"</h2>
                    <div class="price">"$49.99"<span>"/month"</span></div>
                    <ul>
                        <li>"Everything in Premium"</li>
                        <li>"1-on-1 coaching sessions"</li>
                        <li>"Personalized meal plans"</li>
                    </ul>
                    <button class="btn" on:click=move |_| choose("Pro", 4999)>
                        "Join"
                    </button>
                </div>
            </div>

            <PaymentModal selection=selection on_paid=on_paid api=api config=config />
        </div>
    }
}
