use api::{ApiClient, ExportLayout};
use dioxus::prelude::*;

use super::{use_language, FileUpload};
use crate::actions;
use crate::core::catalog::{self, AUTO_DETECT};
use crate::core::config::ClientConfig;
use crate::core::format;
use crate::core::state::{AppState, InputMode, StateAccess};
use crate::t;

/// Language pickers, input (text or document), translate/export controls and
/// the result pane.
#[component]
pub fn TranslationWorkspace() -> Element {
    let _lang = use_language();
    let api = use_context::<ApiClient>();
    let features = use_context::<ClientConfig>().features;
    let mut state = use_context::<Signal<AppState>>();

    let snapshot = {
        let s = state.read();
        Snapshot {
            source: s.source_lang().to_string(),
            target: s.target_lang().to_string(),
            mode: s.input_mode(),
            text: s.input_text().to_string(),
            translated: s.translated_text().to_string(),
            file: s
                .uploaded_file()
                .map(|f| (f.name.clone(), format::format_size(f.bytes.len()))),
            preview: s.preview_url().map(str::to_string),
            loading: s.is_loading(),
            exporting: s.is_exporting(),
            layout: s.export_layout(),
            can_export: s.can_export(),
            has_backend: s.selected_backend().is_some(),
        }
    };
    let mode = if features.ocr {
        snapshot.mode
    } else {
        InputMode::Text
    };

    let swap_disabled = snapshot.source == AUTO_DETECT;
    let translate_disabled = snapshot.loading || !snapshot.has_backend;
    let text_tab = tab_class(mode == InputMode::Text);
    let file_tab = tab_class(mode == InputMode::File);
    let layout_value = snapshot.layout.as_str();

    let translate_api = api.clone();
    let on_translate = move |_| {
        let api = translate_api.clone();
        let mut state = state;
        spawn(async move {
            if let Err(rejection) = actions::translate::translate(&api, &mut state).await {
                tracing::debug!(?rejection, "translation not started");
            }
        });
    };

    let on_export = move |_| {
        let api = api.clone();
        let mut state = state;
        spawn(async move {
            if let Err(rejection) = actions::export::export_image(&api, &mut state).await {
                tracing::debug!(?rejection, "export not started");
            }
        });
    };

    let on_copy = move |_| {
        let mut state = state;
        spawn(async move {
            actions::export::copy_translation(&mut state).await;
        });
    };

    rsx! {
        div { class: "workspace",
            div { class: "language-selector",
                div { class: "language-selector__field",
                    label { r#for: "source-lang", {t!("workspace-from")} }
                    select {
                        id: "source-lang",
                        value: "{snapshot.source}",
                        oninput: move |evt: FormEvent| state.mutate(|s| s.set_source_lang(&evt.value())),
                        for (code, name) in catalog::LANGUAGES.iter() {
                            option { key: "{code}", value: "{code}", selected: *code == snapshot.source, "{name}" }
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "swap-button",
                    title: t!("workspace-swap"),
                    disabled: swap_disabled,
                    onclick: move |_| {
                        state.mutate(|s| s.swap_languages());
                    },
                    "⇄"
                }
                div { class: "language-selector__field",
                    label { r#for: "target-lang", {t!("workspace-to")} }
                    select {
                        id: "target-lang",
                        value: "{snapshot.target}",
                        oninput: move |evt: FormEvent| state.mutate(|s| s.set_target_lang(&evt.value())),
                        for (code, name) in catalog::target_languages() {
                            option { key: "{code}", value: "{code}", selected: *code == snapshot.target, "{name}" }
                        }
                    }
                }
            }

            div { class: "input-tabs", role: "tablist",
                button {
                    r#type: "button",
                    class: "{text_tab}",
                    onclick: move |_| state.mutate(|s| s.set_input_mode(InputMode::Text)),
                    {t!("workspace-tab-text")}
                }
                if features.ocr {
                    button {
                        r#type: "button",
                        class: "{file_tab}",
                        onclick: move |_| state.mutate(|s| s.set_input_mode(InputMode::File)),
                        {t!("workspace-tab-file")}
                    }
                }
            }

            if mode == InputMode::Text {
                textarea {
                    class: "text-input",
                    placeholder: t!("workspace-text-placeholder"),
                    value: "{snapshot.text}",
                    oninput: move |evt: FormEvent| state.mutate(|s| s.set_input_text(evt.value())),
                }
            } else {
                FileUpload {}
                if let Some(url) = snapshot.preview.as_deref() {
                    div { class: "image-preview",
                        img { src: "{url}", alt: t!("workspace-preview-alt") }
                    }
                }
                if let Some((name, size)) = snapshot.file.as_ref() {
                    div { class: "file-info",
                        span { class: "file-info__name", "{name}" }
                        span { class: "file-info__size", "{size}" }
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: move |_| state.mutate(|s| s.remove_uploaded_file()),
                            {t!("workspace-remove-file")}
                        }
                    }
                }
            }

            div { class: "workspace__actions",
                button {
                    r#type: "button",
                    class: "button button--primary button--block",
                    disabled: translate_disabled,
                    onclick: on_translate,
                    if snapshot.loading {
                        span { class: "spinner", aria_hidden: "true" }
                        {t!("workspace-translating")}
                    } else {
                        {t!("workspace-translate")}
                    }
                }

                if features.export && snapshot.can_export {
                    div { class: "export-controls",
                        label { r#for: "export-layout", {t!("workspace-layout")} }
                        select {
                            id: "export-layout",
                            value: "{layout_value}",
                            oninput: move |evt: FormEvent| {
                                let layout = parse_layout(&evt.value());
                                state.mutate(|s| s.set_export_layout(layout));
                            },
                            option { value: "overlay", selected: snapshot.layout == ExportLayout::Overlay,
                                {t!("layout-overlay")}
                            }
                            option { value: "sidebyside", selected: snapshot.layout == ExportLayout::SideBySide,
                                {t!("layout-side-by-side")}
                            }
                        }
                        button {
                            r#type: "button",
                            class: "button button--accent",
                            disabled: snapshot.exporting,
                            onclick: on_export,
                            if snapshot.exporting {
                                {t!("workspace-exporting")}
                            } else {
                                {t!("workspace-export")}
                            }
                        }
                    }
                }
            }

            div { class: "output",
                div { class: "output__header",
                    h3 { {t!("workspace-result")} }
                    if !snapshot.translated.is_empty() {
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: on_copy,
                            {t!("workspace-copy")}
                        }
                    }
                }
                if snapshot.translated.is_empty() {
                    p { class: "output__placeholder", {t!("workspace-output-placeholder")} }
                } else {
                    div { class: "output__text", "{snapshot.translated}" }
                }
            }
        }
    }
}

struct Snapshot {
    source: String,
    target: String,
    mode: InputMode,
    text: String,
    translated: String,
    file: Option<(String, String)>,
    preview: Option<String>,
    loading: bool,
    exporting: bool,
    layout: ExportLayout,
    can_export: bool,
    has_backend: bool,
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "input-tab input-tab--active"
    } else {
        "input-tab"
    }
}

fn parse_layout(value: &str) -> ExportLayout {
    match value {
        "sidebyside" => ExportLayout::SideBySide,
        _ => ExportLayout::Overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_values_match_wire_names() {
        for layout in [ExportLayout::Overlay, ExportLayout::SideBySide] {
            assert_eq!(parse_layout(layout.as_str()), layout);
        }
        assert_eq!(parse_layout("bogus"), ExportLayout::Overlay);
    }
}
