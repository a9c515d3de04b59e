//! Stripe.js v3 Bindings
//!
//! Raw wasm-bindgen handles for the hosted payment-element widget. The page
//! must load `https://js.stripe.com/v3/` before any of these are called;
//! higher-level wrappers live in `element` and `provider`.

use js_sys::Promise;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Stripe.js client handle
    #[wasm_bindgen(js_name = Stripe, js_namespace = window)]
    #[derive(Debug, Clone)]
    pub type Stripe;

    /// Elements factory handle, bound to one client secret
    #[wasm_bindgen(js_name = Elements)]
    #[derive(Debug, Clone)]
    pub type Elements;

    /// Mounted payment-element UI handle
    #[wasm_bindgen(js_name = PaymentElement)]
    #[derive(Debug, Clone)]
    pub type PaymentElement;

    /// `Stripe(publishableKey)`; throws if Stripe.js has not loaded
    #[wasm_bindgen(catch, js_name = Stripe, js_namespace = window)]
    pub fn stripe_connect(publishable_key: &str) -> Result<Stripe, JsValue>;

    /// `stripe.elements({ clientSecret, appearance })`
    #[wasm_bindgen(method, catch)]
    pub fn elements(this: &Stripe, options: JsValue) -> Result<Elements, JsValue>;

    /// `elements.create("payment", options)`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create_element(
        this: &Elements,
        element_type: &str,
        options: JsValue,
    ) -> Result<PaymentElement, JsValue>;

    /// `paymentElement.mount(selector)`
    #[wasm_bindgen(method, catch)]
    pub fn mount(this: &PaymentElement, selector: &str) -> Result<(), JsValue>;

    /// `paymentElement.unmount()`
    #[wasm_bindgen(method, catch)]
    pub fn unmount(this: &PaymentElement) -> Result<(), JsValue>;

    /// `elements.submit()`, client-side validation of the entered details
    #[wasm_bindgen(method, catch)]
    pub fn submit(this: &Elements) -> Result<Promise, JsValue>;

    /// `stripe.confirmPayment({ elements, confirmParams, redirect })`
    #[wasm_bindgen(method, catch, js_name = confirmPayment)]
    pub fn confirm_payment(this: &Stripe, options: JsValue) -> Result<Promise, JsValue>;

    /// `stripe.retrievePaymentIntent(clientSecret)`
    #[wasm_bindgen(method, catch, js_name = retrievePaymentIntent)]
    pub fn retrieve_payment_intent(this: &Stripe, client_secret: &str)
        -> Result<Promise, JsValue>;
}
