//! # checkout-core
//!
//! Domain model and confirmation flow for the fit-checkout payment dialog.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       CheckoutFlow                           │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌───────────────┐  │
//! │  │   FlowState  │  │  PaymentProvider │  │ PlatformClient│  │
//! │  │  (tagged)    │──│   (Strategy)     │──│  (REST seam)  │  │
//! │  └──────────────┘  └──────────────────┘  └───────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two operations make up the checkout:
//!
//! 1. **Intent initiation**: [`request_intent`] asks the platform backend
//!    for a provider-issued payment intent and returns its [`ClientSecret`].
//!    A fresh intent is requested every time the dialog opens or its terms
//!    change.
//! 2. **Confirmation**: [`CheckoutFlow`] drives the hosted payment widget
//!    to a terminal outcome and, only when the provider reports the charge
//!    succeeded, writes one [`TransactionRecord`] to the platform ledger and
//!    fires the success continuation exactly once.
//!
//! The `PaymentProvider` trait lets the same flow run against the Stripe.js
//! payment element (`checkout-stripe`) or the scripted mocks in [`mock`].

pub mod api;
pub mod error;
pub mod flow;
pub mod intent;
pub mod mock;
pub mod money;
pub mod provider;
pub mod transaction;

pub use api::PlatformClient;
pub use error::{CheckoutError, Result};
pub use flow::{redirect_state, CheckoutFlow, FlowState};
pub use intent::{request_intent, ClientSecret, IntentRequest, IntentStatus};
pub use money::Amount;
pub use provider::{ConfirmOutcome, PaymentProvider, ProviderError, ProviderErrorKind};
pub use transaction::{TransactionRecord, TransactionStatus};
