use api::ApiClient;

use super::auth;
use crate::core::state::StateAccess;

/// Initial load: verify a restored session, then fetch backends and plans.
pub async fn bootstrap(api: &ApiClient, state: &mut impl StateAccess) {
    if state.query(|s| s.session().is_authenticated()) {
        auth::refresh_profile(api, state).await;
    }

    let backends = api.list_backends().await;
    tracing::info!(count = backends.len(), "backends loaded");
    state.mutate(|s| s.set_backends(backends));

    load_plans(api, state).await;
}

pub async fn load_plans(api: &ApiClient, state: &mut impl StateAccess) {
    let plans = api.list_plans().await;
    state.mutate(|s| s.set_plans(plans));
}
