use api::ApiClient;
use dioxus::prelude::*;

use super::use_language;
use crate::actions;
use crate::core::state::{AppState, AuthMode, StateAccess};
use crate::t;

#[component]
pub fn AuthForm() -> Element {
    let _lang = use_language();
    let api = use_context::<ApiClient>();
    let mut state = use_context::<Signal<AppState>>();

    let (mode, email, password, loading) = {
        let s = state.read();
        (
            s.auth_mode(),
            s.auth_email().to_string(),
            s.auth_password().to_string(),
            s.auth_loading(),
        )
    };
    let tab_class = |tab: AuthMode| {
        if tab == mode {
            "auth-tab auth-tab--active"
        } else {
            "auth-tab"
        }
    };
    let submit_label = match (loading, mode) {
        (true, _) => t!("auth-wait"),
        (false, AuthMode::Login) => t!("auth-login"),
        (false, AuthMode::Register) => t!("auth-register"),
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let mut state = state;
        spawn(async move {
            if let Err(rejection) = actions::auth::authenticate(&api, &mut state).await {
                tracing::debug!(?rejection, "sign-in not started");
            }
        });
    };

    rsx! {
        div { class: "auth-form",
            div { class: "auth-tabs", role: "tablist",
                button {
                    r#type: "button",
                    class: tab_class(AuthMode::Login),
                    onclick: move |_| state.mutate(|s| s.set_auth_mode(AuthMode::Login)),
                    {t!("auth-login")}
                }
                button {
                    r#type: "button",
                    class: tab_class(AuthMode::Register),
                    onclick: move |_| state.mutate(|s| s.set_auth_mode(AuthMode::Register)),
                    {t!("auth-register")}
                }
            }
            form { class: "auth-form__content", onsubmit: on_submit,
                input {
                    class: "input",
                    r#type: "email",
                    placeholder: t!("auth-email"),
                    value: "{email}",
                    required: true,
                    oninput: move |evt: FormEvent| state.mutate(|s| s.set_auth_email(evt.value())),
                }
                input {
                    class: "input",
                    r#type: "password",
                    placeholder: t!("auth-password"),
                    value: "{password}",
                    required: true,
                    oninput: move |evt: FormEvent| state.mutate(|s| s.set_auth_password(evt.value())),
                }
                button {
                    r#type: "submit",
                    class: "button button--primary button--block",
                    disabled: loading,
                    "{submit_label}"
                }
            }
        }
    }
}
