use api::ApiClient;
use dioxus::prelude::*;

use super::use_language;
use crate::actions;
use crate::core::state::{AppState, StateAccess};
use crate::t;

/// Config editor for the selected backend. Edits go to a draft that is
/// only written back once the server accepts it.
#[component]
pub fn BackendSettings() -> Element {
    let _lang = use_language();
    let api = use_context::<ApiClient>();
    let state = use_context::<Signal<AppState>>();
    let mut saving = use_signal(|| false);

    let Some(draft) = state.read().settings_draft().cloned() else {
        return rsx! {};
    };
    let title = t!("settings-title", name = draft.name.clone());
    let fields = draft.config.into_iter().collect::<Vec<_>>();
    let has_fields = !fields.is_empty();

    let on_save = move |_| {
        if saving() {
            return;
        }
        saving.set(true);
        let api = api.clone();
        let mut state = state;
        spawn(async move {
            actions::settings::save_settings(&api, &mut state).await;
            saving.set(false);
        });
    };

    rsx! {
        section { class: "card settings-panel",
            h3 { "{title}" }
            if !has_fields {
                p { class: "settings-panel__empty", {t!("settings-no-options")} }
            }
            {fields.into_iter().map(|(key, value)| {
                let input_type = if key.contains("key") { "password" } else { "text" };
                let label = setting_label(&key);
                let placeholder = t!("settings-placeholder", key = key.clone());
                let field = key.clone();
                let mut state = state;
                rsx! {
                    div { key: "{key}", class: "settings-panel__field",
                        label { r#for: "setting-{key}", "{label}" }
                        input {
                            id: "setting-{key}",
                            class: "input",
                            r#type: input_type,
                            value: "{value}",
                            placeholder: "{placeholder}",
                            autocomplete: "off",
                            oninput: move |evt: FormEvent| {
                                state.mutate(|s| s.edit_setting(&field, evt.value()));
                            },
                        }
                    }
                }
            })}
            button {
                r#type: "button",
                class: "button button--primary",
                disabled: saving(),
                onclick: on_save,
                {t!("settings-save")}
            }
        }
    }
}

/// `api_key` → `API KEY`.
fn setting_label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}
