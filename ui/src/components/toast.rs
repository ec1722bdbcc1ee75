use dioxus::prelude::*;

use crate::core::config::ClientConfig;
use crate::core::state::{AppState, StateAccess, ToastKind};
use crate::core::timing;

/// Current toast. Each toast schedules its own dismissal; a newer toast is
/// never cleared by an older timer.
#[component]
pub fn ToastHost() -> Element {
    let state = use_context::<Signal<AppState>>();
    let delay = use_context::<ClientConfig>().toast_ms;

    let toast_id = use_memo(move || state.read().toast().map(|t| t.id));
    use_effect(move || {
        if let Some(id) = toast_id() {
            let mut state = state;
            spawn(async move {
                timing::sleep_ms(delay).await;
                state.mutate(|s| s.dismiss_toast(id));
            });
        }
    });

    let toast = state.read().toast().cloned();
    rsx! {
        if let Some(toast) = toast {
            div {
                class: toast_class(toast.kind),
                role: "status",
                aria_live: "polite",
                "{toast.message}"
            }
        }
    }
}

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "toast toast--success",
        ToastKind::Error => "toast toast--error",
    }
}
