use api::PlanId;
use dioxus::prelude::*;

use super::use_language;
use crate::actions;
use crate::core::config::ClientConfig;
use crate::core::state::{AppState, Modal, StateAccess};
use crate::t;

/// Signed-in user card: plan badge, daily usage and account actions.
#[component]
pub fn UserProfile() -> Element {
    let _lang = use_language();
    let mut state = use_context::<Signal<AppState>>();
    let payments = use_context::<ClientConfig>().features.payments;

    let Some(user) = state.read().user().cloned() else {
        return rsx! {};
    };
    let plan = user.subscription_plan;
    let badge = plan.as_str().to_uppercase();
    let badge_class = format!("plan-badge plan-badge--{}", plan.as_str());
    let welcome = t!("profile-welcome", email = user.email.clone());

    rsx! {
        div { class: "user-profile",
            div { class: "user-profile__header",
                h3 { "{welcome}" }
                span { class: "{badge_class}", "{badge}" }
            }
            div { class: "usage-stats",
                div { class: "usage-stats__stat",
                    span { class: "usage-stats__value", "{user.translations_used_today}" }
                    span { class: "usage-stats__label", {t!("profile-used-today")} }
                }
                div { class: "usage-stats__stat",
                    span { class: "usage-stats__value", "{user.translations_remaining}" }
                    span { class: "usage-stats__label", {t!("profile-remaining")} }
                }
            }
            div { class: "user-profile__actions",
                if payments {
                    button {
                        r#type: "button",
                        class: "button button--secondary",
                        onclick: move |_| state.mutate(|s| s.open_modal(Modal::Plans)),
                        if plan == PlanId::Free {
                            {t!("profile-upgrade")}
                        } else {
                            {t!("profile-change-plan")}
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| actions::auth::logout(&mut state),
                    {t!("profile-logout")}
                }
            }
        }
    }
}
