use api::ApiClient;

use crate::core::platform;
use crate::core::state::{AppState, ExportFailure, Rejection, StateAccess, ToastKind};
use crate::t;

/// Render the translation onto the uploaded image server-side and hand the
/// result to the user.
pub async fn export_image(api: &ApiClient, state: &mut impl StateAccess) -> Result<(), Rejection> {
    let job = state.mutate(AppState::begin_export)?;

    let outcome = match api
        .export_translated_image(&job.file, &job.translated_text, &job.target_lang, job.layout)
        .await
    {
        Ok(bytes) => platform::download_bytes(&job.filename(), "image/png", bytes)
            .await
            .map_err(ExportFailure::Delivery),
        Err(err) => Err(ExportFailure::Api(err)),
    };

    state.mutate(|s| s.finish_export(outcome));
    Ok(())
}

pub async fn copy_translation(state: &mut impl StateAccess) {
    let text = state.query(|s| s.translated_text().to_string());
    if text.trim().is_empty() {
        return;
    }
    match platform::copy_to_clipboard(text).await {
        Ok(()) => {
            state.mutate(|s| s.notify(t!("toast-copied"), ToastKind::Success));
        }
        Err(error) => {
            tracing::warn!(%error, "clipboard copy failed");
            state.mutate(|s| s.notify(t!("toast-copy-failed", error = error), ToastKind::Error));
        }
    }
}
