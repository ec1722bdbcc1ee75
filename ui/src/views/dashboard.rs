use api::ApiClient;
use dioxus::prelude::*;

use crate::actions;
use crate::components::{
    AppHeader, AuthForm, BackendList, BackendSettings, PaymentMethods, PlanGrid, ToastHost,
    TranslationWorkspace,
};
use crate::core::config::ClientConfig;
use crate::core::session::SessionManager;
use crate::core::state::{AppState, Modal, StateAccess};
use crate::core::storage::default_store;
use crate::i18n;
use crate::t;

/// Root view. Provides the API client, configuration, application state and
/// language code to everything below it, then runs the startup load once.
#[component]
pub fn Dashboard(config: ClientConfig) -> Element {
    let api = use_context_provider(|| ApiClient::new(config.api_base_url.clone()));
    use_context_provider(|| config.clone());
    let mut state = use_context_provider(|| {
        Signal::new(AppState::new(SessionManager::restore(default_store())))
    });
    let lang = use_context_provider(|| Signal::new(i18n::current_language()));

    use_hook(move || {
        let api = api.clone();
        let mut state = state;
        spawn(async move {
            actions::startup::bootstrap(&api, &mut state).await;
        });
    });

    let (show_settings, modal) = {
        let s = state.read();
        (s.show_settings(), s.modal())
    };
    let dialog = modal.map(|modal| {
        let body = match modal {
            Modal::Auth => rsx! { AuthForm {} },
            Modal::Plans => rsx! { PlanGrid {} },
            Modal::PaymentMethods => rsx! { PaymentMethods {} },
        };
        (modal_class(modal), body)
    });

    rsx! {
        div { class: "app", lang: "{lang}",
            ToastHost {}
            AppHeader {}

            main { class: "dashboard",
                section { class: "card card--backends",
                    h2 { class: "card__title", {t!("dashboard-backends")} }
                    BackendList {}
                }
                section { class: "card card--workspace",
                    h2 { class: "card__title", {t!("dashboard-translate")} }
                    TranslationWorkspace {}
                }
            }

            if show_settings {
                BackendSettings {}
            }

            if let Some((class, body)) = dialog {
                div {
                    class: "modal",
                    onclick: move |_| state.mutate(|s| s.close_modal()),
                    div {
                        class: "{class}",
                        role: "dialog",
                        aria_modal: "true",
                        onclick: move |evt| evt.stop_propagation(),
                        {body}
                    }
                }
            }
        }
    }
}

fn modal_class(modal: Modal) -> &'static str {
    match modal {
        Modal::Auth => "modal__content",
        Modal::Plans | Modal::PaymentMethods => "modal__content modal__content--wide",
    }
}
