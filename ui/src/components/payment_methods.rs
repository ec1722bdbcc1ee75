use api::{ApiClient, PaymentMethod};
use dioxus::prelude::*;

use super::use_language;
use crate::actions;
use crate::core::config::ClientConfig;
use crate::core::format;
use crate::core::payments::{method_icon, SimulatedCheckout};
use crate::core::state::{AppState, StateAccess};
use crate::t;

#[component]
pub fn PaymentMethods() -> Element {
    let _lang = use_language();
    let api = use_context::<ApiClient>();
    let config = use_context::<ClientConfig>();
    let mut state = use_context::<Signal<AppState>>();

    let (plan, loading) = {
        let s = state.read();
        (s.selected_plan().cloned(), s.payment_loading())
    };
    let Some(plan) = plan else {
        return rsx! {};
    };
    let title = t!("payment-title", plan = plan.name.clone());
    let price = format::format_price(plan.price, &plan.currency);

    let pay = move |method: PaymentMethod| {
        let provider = SimulatedCheckout::new(api.clone(), config.payment_settle_ms);
        let api = api.clone();
        let fallback = config.subscription_fallback;
        let mut state = state;
        spawn(async move {
            if let Err(rejection) =
                actions::billing::checkout(&provider, &api, &mut state, method, fallback).await
            {
                tracing::debug!(?rejection, "checkout not started");
            }
        });
    };

    rsx! {
        div { class: "payment-methods",
            div { class: "payment-methods__header",
                h3 { "{title}" }
                p { "{price}" {t!("plans-per-month")} }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: loading,
                    onclick: move |_| state.mutate(|s| s.back_to_plans()),
                    {t!("payment-back")}
                }
            }
            if loading {
                p { class: "payment-methods__status", {t!("payment-processing")} }
            }
            div { class: "payment-methods__grid",
                {PaymentMethod::ALL.into_iter().map(|method| {
                    let pay = pay.clone();
                    rsx! {
                        button {
                            key: "{method:?}",
                            r#type: "button",
                            class: "payment-method",
                            disabled: loading,
                            onclick: move |_| pay(method),
                            span { class: "payment-method__icon", aria_hidden: "true", {method_icon(method)} }
                            span { class: "payment-method__name", {method_name(method)} }
                            span { class: "payment-method__description", {method_description(method)} }
                        }
                    }
                })}
            }
        }
    }
}

fn method_name(method: PaymentMethod) -> String {
    match method {
        PaymentMethod::Stripe => t!("payment-card"),
        PaymentMethod::Paypal => t!("payment-paypal"),
        PaymentMethod::Revolut => t!("payment-revolut"),
        PaymentMethod::Klarna => t!("payment-klarna"),
    }
}

fn method_description(method: PaymentMethod) -> String {
    match method {
        PaymentMethod::Stripe => t!("payment-card-description"),
        PaymentMethod::Paypal => t!("payment-paypal-description"),
        PaymentMethod::Revolut => t!("payment-revolut-description"),
        PaymentMethod::Klarna => t!("payment-klarna-description"),
    }
}
