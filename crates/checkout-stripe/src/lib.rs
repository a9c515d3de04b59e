//! # checkout-stripe
//!
//! Stripe.js payment-element integration for fit-checkout.
//!
//! The page embeds the provider's hosted widget: card entry, validation,
//! and SCA/3DS challenges all happen inside Stripe's iframe, so no payment
//! details ever touch this code. This crate wraps the three calls the
//! confirmation flow needs (mount, confirm, retrieve) behind
//! `checkout_core::PaymentProvider`.
//!
//! Requires `<script src="https://js.stripe.com/v3/"></script>` on the
//! hosting page.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut provider = StripeProvider::connect("pk_test_xxx")?
//!     .with_return_url(format!("{origin}/complete"));
//! provider.init_elements(&secret)?;
//! let element = provider.mount_payment_element("#payment-element", &Default::default())?;
//!
//! // provider now drives a checkout_core::CheckoutFlow
//! ```

mod bindings;
mod element;
mod provider;

pub use element::{ConfirmParams, ElementsOptions, PaymentElementHandle, PaymentElementOptions};
pub use provider::StripeProvider;
