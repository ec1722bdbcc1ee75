use api::ApiClient;

use crate::core::state::{StateAccess, ToastKind};
use crate::t;

/// Persist the settings draft of the selected backend.
pub async fn save_settings(api: &ApiClient, state: &mut impl StateAccess) -> bool {
    let Some(draft) = state.query(|s| s.settings_draft().cloned()) else {
        return false;
    };

    if api.save_backend_config(&draft).await {
        state.mutate(|s| {
            s.apply_saved_backend(draft);
            s.notify(t!("toast-settings-saved"), ToastKind::Success);
        });
        true
    } else {
        state.mutate(|s| s.notify(t!("toast-settings-failed"), ToastKind::Error));
        false
    }
}
