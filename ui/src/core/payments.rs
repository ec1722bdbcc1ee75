//! Payment processor seam.
//!
//! The server only hands out payment intents; confirming one is up to the
//! processor. [`SimulatedCheckout`] stands in for a processor by waiting a
//! fixed settle time, which keeps the subscription flow exercisable end to
//! end without real card handling.

use api::{ApiClient, ApiError, AuthHeaders, PaymentIntent, PaymentMethod, PlanId};

use super::timing;

#[allow(async_fn_in_trait)]
pub trait PaymentProvider {
    async fn create_intent(
        &self,
        plan: PlanId,
        method: PaymentMethod,
        auth: &AuthHeaders,
    ) -> Result<PaymentIntent, ApiError>;

    async fn confirm(&self, intent: &PaymentIntent) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedCheckout {
    api: ApiClient,
    settle_ms: u64,
}

impl SimulatedCheckout {
    pub fn new(api: ApiClient, settle_ms: u64) -> Self {
        Self { api, settle_ms }
    }
}

impl PaymentProvider for SimulatedCheckout {
    async fn create_intent(
        &self,
        plan: PlanId,
        method: PaymentMethod,
        auth: &AuthHeaders,
    ) -> Result<PaymentIntent, ApiError> {
        self.api.create_payment_intent(plan, method, auth).await
    }

    async fn confirm(&self, intent: &PaymentIntent) -> Result<(), ApiError> {
        tracing::debug!(intent = intent.reference(), settle_ms = self.settle_ms, "simulating payment confirmation");
        timing::sleep_ms(self.settle_ms).await;
        Ok(())
    }
}

pub fn method_icon(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Stripe => "💳",
        PaymentMethod::Paypal => "🅿️",
        PaymentMethod::Revolut => "🏦",
        PaymentMethod::Klarna => "🛍️",
    }
}
