use api::{Backend, PlanId};
use dioxus::prelude::*;

use super::use_language;
use crate::core::catalog::{self, Capability};
use crate::core::config::ClientConfig;
use crate::core::state::{AppState, Modal, StateAccess};
use crate::t;

/// Backends the current plan may use, plus the plan note and settings toggle.
#[component]
pub fn BackendList() -> Element {
    let _lang = use_language();
    let mut state = use_context::<Signal<AppState>>();
    let payments = use_context::<ClientConfig>().features.payments;

    let (backends, selected, plan, signed_in, show_settings) = {
        let s = state.read();
        (
            s.visible_backends().into_iter().cloned().collect::<Vec<_>>(),
            s.selected_backend_id().map(str::to_string),
            s.current_plan(),
            s.session().is_authenticated(),
            s.show_settings(),
        )
    };
    let tiers = catalog::plan_backends(plan).join(", ");

    rsx! {
        div { class: "backend-list",
            if backends.is_empty() {
                p { class: "backend-list__empty", {t!("backends-empty")} }
            }
            for backend in backends {
                BackendCard {
                    key: "{backend.id}",
                    selected: selected.as_deref() == Some(backend.id.as_str()),
                    backend: backend.clone(),
                }
            }
        }

        if signed_in && plan != PlanId::Enterprise {
            div { class: "plan-limitation",
                p { class: "plan-limitation__text", {plan_summary(plan)} }
                p { class: "plan-limitation__tiers", "{tiers}" }
                if payments {
                    button {
                        r#type: "button",
                        class: "button button--ghost button--block",
                        onclick: move |_| state.mutate(|s| s.open_modal(Modal::Plans)),
                        {t!("backends-upgrade")}
                    }
                }
            }
        }

        button {
            r#type: "button",
            class: "button button--secondary button--block",
            onclick: move |_| state.mutate(|s| s.toggle_settings()),
            if show_settings {
                {t!("backends-hide-settings")}
            } else {
                {t!("backends-configure")}
            }
        }
    }
}

#[component]
pub fn BackendCard(backend: Backend, selected: bool) -> Element {
    let mut state = use_context::<Signal<AppState>>();

    let caps = catalog::capabilities(&backend)
        .into_iter()
        .map(capability_label)
        .collect::<Vec<_>>()
        .join(" • ");
    let icon = catalog::backend_icon(&backend.id);
    let mut class = String::from("backend-item");
    if selected {
        class.push_str(" backend-item--selected");
    }
    if !backend.enabled {
        class.push_str(" backend-item--disabled");
    }
    let dot_class = if backend.enabled {
        "status-dot status-dot--on"
    } else {
        "status-dot"
    };
    let id = backend.id.clone();

    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            disabled: !backend.enabled,
            aria_pressed: "{selected}",
            onclick: move |_| {
                state.mutate(|s| s.select_backend(&id));
            },
            div { class: "backend-item__header",
                span { class: "backend-item__icon", aria_hidden: "true", "{icon}" }
                div { class: "backend-item__info",
                    h3 { "{backend.name}" }
                    p { class: "backend-item__caps", "{caps}" }
                    p { class: "backend-item__id", "{backend.id}" }
                }
            }
            div { class: "backend-item__status",
                span { class: "{dot_class}" }
                if backend.enabled {
                    span { {t!("backend-ready")} }
                } else {
                    span { {t!("backend-needs-config")} }
                }
                if selected {
                    span { class: "backend-item__check", "✓" }
                }
            }
        }
    }
}

fn capability_label(cap: Capability) -> String {
    match cap {
        Capability::Local => t!("capability-local"),
        Capability::Cloud => t!("capability-cloud"),
        Capability::Specialized => t!("capability-specialized"),
        Capability::Vision => t!("capability-vision"),
    }
}

pub(crate) fn plan_summary(plan: PlanId) -> String {
    match plan {
        PlanId::Free => t!("plan-summary-free"),
        PlanId::Basic => t!("plan-summary-basic"),
        PlanId::Pro => t!("plan-summary-pro"),
        PlanId::Enterprise => t!("plan-summary-enterprise"),
    }
}
