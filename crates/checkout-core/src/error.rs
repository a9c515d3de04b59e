//! Checkout Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout-related errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Amount was zero or negative (minor units)
    #[error("invalid amount: {0} minor units (must be positive)")]
    InvalidAmount(i64),

    /// Plan label was empty
    #[error("plan label must not be empty")]
    EmptyPlan,

    /// Client secret was empty or blank
    #[error("client secret must not be empty")]
    EmptySecret,

    /// Payment intent creation failed (network error or backend rejection)
    #[error("intent creation failed: {0}")]
    IntentCreation(String),

    /// Ledger record call failed after a successful charge
    #[error("transaction record failed: {0}")]
    Record(String),
}

impl CheckoutError {
    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            CheckoutError::InvalidAmount(_) | CheckoutError::EmptyPlan => {
                "Invalid payment details."
            }
            CheckoutError::EmptySecret => "The payment form is not ready yet.",
            CheckoutError::IntentCreation(_) => {
                "Could not start the payment. Please try again later."
            }
            CheckoutError::Record(_) => {
                "Your payment went through, but we could not record it. Please contact support."
            }
        }
    }
}
