//! Checkout, plan changes and cancellation.

use api::{ApiClient, ApiError, PaymentMethod, PlanId, User};

use crate::core::config::SubscriptionFallback;
use crate::core::payments::PaymentProvider;
use crate::core::state::{AppState, Rejection, StateAccess};

#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionOutcome {
    /// The server accepted the change and returned the new profile.
    Confirmed(User),
    /// The server could not be reached or refused; the plan was applied
    /// locally only and will be overwritten by the next profile refresh.
    Optimistic(PlanId),
}

/// Move the signed-in user to `plan`.
pub async fn update_subscription(
    api: &ApiClient,
    state: &mut impl StateAccess,
    plan: PlanId,
    fallback: SubscriptionFallback,
) -> Result<SubscriptionOutcome, ApiError> {
    let headers = state.query(|s| s.session().auth_headers());

    match api.update_subscription(plan, &headers).await {
        Ok(user) => {
            tracing::info!(plan = %user.subscription_plan, "subscription updated");
            state.mutate(|s| s.apply_profile(user.clone()));
            let backends = api.list_backends().await;
            state.mutate(|s| s.set_backends(backends));
            Ok(SubscriptionOutcome::Confirmed(user))
        }
        Err(err) => match fallback {
            SubscriptionFallback::Optimistic => {
                tracing::warn!(error = %err, %plan, "subscription update failed, applying plan locally");
                state.mutate(|s| s.apply_plan_locally(plan));
                Ok(SubscriptionOutcome::Optimistic(plan))
            }
            SubscriptionFallback::Strict => {
                tracing::error!(error = %err, %plan, "subscription update failed");
                Err(err)
            }
        },
    }
}

/// Pay for the plan chosen in the plans modal with `method`.
pub async fn checkout(
    provider: &impl PaymentProvider,
    api: &ApiClient,
    state: &mut impl StateAccess,
    method: PaymentMethod,
    fallback: SubscriptionFallback,
) -> Result<(), Rejection> {
    let plan = state.mutate(AppState::begin_payment)?;
    let headers = state.query(|s| s.session().auth_headers());
    tracing::debug!(plan = %plan.id, ?method, "checkout started");

    let paid = async {
        let intent = provider.create_intent(plan.id, method, &headers).await?;
        provider.confirm(&intent).await?;
        update_subscription(api, state, plan.id, fallback).await
    }
    .await;

    let outcome = paid.map(|_| plan.name).map_err(|err| err.to_string());
    state.mutate(|s| s.finish_payment(outcome));
    Ok(())
}

/// Cancel the paid subscription and drop to the free plan.
pub async fn downgrade(api: &ApiClient, state: &mut impl StateAccess) -> bool {
    let headers = state.query(|s| s.session().auth_headers());
    let cancelled = api.cancel_subscription(&headers).await;
    state.mutate(|s| s.finish_downgrade(cancelled));
    cancelled
}
