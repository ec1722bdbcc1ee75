use dioxus::prelude::*;

use super::UserProfile;
use crate::core::state::{AppState, Modal, StateAccess};
use crate::i18n;
use crate::t;

/// Brand, locale switcher and the account area.
///
/// Switching the locale writes the shared `Signal<String>` language code so
/// every component that called [`super::use_language`] re-renders with the
/// new bundle.
#[component]
pub fn AppHeader() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let current = lang_code.as_ref().map(|c| c()).unwrap_or_else(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let signed_in = state.read().session().is_authenticated();

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                if let Some(mut code) = lang_code {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(error = %err, lang = %val, "language switch failed"),
        }
    };

    rsx! {
        header { class: "header",
            div { class: "header__brand",
                h1 { class: "header__title",
                    span { class: "header__spark", aria_hidden: "true" }
                    {t!("header-title")}
                }
                p { class: "header__tagline", {t!("header-tagline")} }
            }

            div { class: "header__actions",
                if show_switcher {
                    div { class: "header__locale",
                        label { class: "visually-hidden", r#for: "locale-select",
                            {t!("header-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current}",
                            oninput: on_change,
                            {langs().into_iter().map(|code| rsx! {
                                option { key: "{code}", value: "{code}", "{code}" }
                            })}
                        }
                    }
                }

                if signed_in {
                    UserProfile {}
                } else {
                    button {
                        r#type: "button",
                        class: "button button--accent",
                        onclick: move |_| state.mutate(|s| s.open_modal(Modal::Auth)),
                        {t!("header-login")}
                    }
                }
            }
        }
    }
}
