use std::sync::Arc;

use api::FilePayload;
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;

use super::use_language;
use crate::core::format;
use crate::core::state::{AppState, StateAccess};
use crate::t;

const ACCEPT: &str = "image/*,.pdf,.docx,.txt";

/// Drop zone and picker. A new file replaces the previous one.
#[component]
pub fn FileUpload() -> Element {
    let _lang = use_language();
    let state = use_context::<Signal<AppState>>();
    let mut dragging = use_signal(|| false);

    let current = state
        .read()
        .uploaded_file()
        .map(|f| (f.name.clone(), format::format_size(f.bytes.len())));

    let class = if dragging() {
        "upload-area upload-area--dragover"
    } else {
        "upload-area"
    };

    rsx! {
        label {
            class: "{class}",
            r#for: "file-input",
            ondragover: move |evt: DragEvent| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: move |evt: DragEvent| {
                evt.prevent_default();
                dragging.set(false);
                if let Some(engine) = evt.files() {
                    spawn(store_first(engine, state));
                }
            },
            span { class: "upload-area__icon", aria_hidden: "true", "📄" }
            if let Some((name, size)) = current {
                span { class: "upload-area__text", "{name}" }
                span { class: "upload-area__subtext", "{size}" }
            } else {
                span { class: "upload-area__text", {t!("upload-prompt")} }
                span { class: "upload-area__subtext", {t!("upload-formats")} }
            }
            input {
                id: "file-input",
                class: "upload-area__input",
                r#type: "file",
                accept: ACCEPT,
                onchange: move |evt: FormEvent| async move {
                    if let Some(engine) = evt.files() {
                        store_first(engine, state).await;
                    }
                },
            }
        }
    }
}

async fn store_first(engine: Arc<dyn FileEngine>, mut state: Signal<AppState>) {
    let Some(name) = engine.files().into_iter().next() else {
        return;
    };
    match engine.read_file(&name).await {
        Some(bytes) => {
            let file = FilePayload::from_upload(name, bytes);
            state.mutate(|s| s.set_uploaded_file(file));
        }
        None => tracing::warn!(file = %name, "could not read dropped file"),
    }
}
