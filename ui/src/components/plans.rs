use api::{ApiClient, Plan, PlanId};
use dioxus::prelude::*;

use super::use_language;
use crate::actions;
use crate::core::format;
use crate::core::state::{AppState, StateAccess};
use crate::t;

#[component]
pub fn PlanGrid() -> Element {
    let _lang = use_language();
    let mut state = use_context::<Signal<AppState>>();

    let (plans, current, pending_downgrade) = {
        let s = state.read();
        (
            s.plans().to_vec(),
            s.user().map(|u| u.subscription_plan),
            s.pending_downgrade(),
        )
    };

    rsx! {
        div { class: "plans",
            div { class: "plans__header",
                h2 { {t!("plans-title")} }
                p { {t!("plans-subtitle")} }
                button {
                    r#type: "button",
                    class: "modal__close",
                    aria_label: t!("modal-close"),
                    onclick: move |_| state.mutate(|s| s.close_modal()),
                    "×"
                }
            }
            if plans.is_empty() {
                p { class: "plans__empty", {t!("plans-unavailable")} }
            }
            div { class: "plans__grid",
                for plan in plans {
                    PlanCard {
                        key: "{plan.id}",
                        current: current == Some(plan.id),
                        confirming: pending_downgrade && plan.id == PlanId::Free,
                        plan: plan.clone(),
                    }
                }
            }
        }
    }
}

/// One tier. Paid tiers lead to the payment picker; the free tier asks for
/// confirmation before cancelling the subscription.
#[component]
pub fn PlanCard(plan: Plan, current: bool, confirming: bool) -> Element {
    let api = use_context::<ApiClient>();
    let mut state = use_context::<Signal<AppState>>();
    let mut cancelling = use_signal(|| false);

    let featured = plan.id == PlanId::Pro;
    let mut class = String::from("plan-card");
    if current {
        class.push_str(" plan-card--current");
    }
    if featured {
        class.push_str(" plan-card--featured");
    }
    let price = format::format_price(plan.price, &plan.currency);
    let is_free = plan.id == PlanId::Free;
    let chosen = plan.clone();

    let on_confirm = move |_| {
        if cancelling() {
            return;
        }
        cancelling.set(true);
        let api = api.clone();
        let mut state = state;
        spawn(async move {
            actions::billing::downgrade(&api, &mut state).await;
            cancelling.set(false);
        });
    };

    rsx! {
        div { class: "{class}",
            if featured {
                span { class: "plan-card__badge", {t!("plans-most-popular")} }
            }
            div { class: "plan-card__header",
                h3 { "{plan.name}" }
                div { class: "plan-card__price",
                    span { class: "plan-card__amount", "{price}" }
                    if !is_free {
                        span { class: "plan-card__period", {t!("plans-per-month")} }
                    }
                }
            }
            ul { class: "plan-card__features",
                for feature in plan.features.iter() {
                    li { class: "plan-card__feature",
                        span { class: "plan-card__tick", aria_hidden: "true", "✓" }
                        "{feature}"
                    }
                }
            }
            div { class: "plan-card__action",
                if current {
                    button { r#type: "button", class: "button button--ghost", disabled: true,
                        {t!("plans-current")}
                    }
                } else if is_free && confirming {
                    p { class: "plan-card__confirm", {t!("plans-downgrade-confirm")} }
                    div { class: "plan-card__confirm-actions",
                        button {
                            r#type: "button",
                            class: "button button--danger",
                            disabled: cancelling(),
                            onclick: on_confirm,
                            {t!("plans-downgrade-yes")}
                        }
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: move |_| state.mutate(|s| s.cancel_downgrade()),
                            {t!("plans-downgrade-no")}
                        }
                    }
                } else if is_free {
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| state.mutate(|s| s.request_downgrade()),
                        {t!("plans-downgrade")}
                    }
                } else {
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: move |_| state.mutate(|s| s.choose_plan(chosen.clone())),
                        {t!("plans-choose")}
                    }
                }
            }
        }
    }
}
