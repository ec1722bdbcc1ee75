use api::ApiClient;

use super::auth;
use crate::core::state::{AppState, Rejection, StateAccess, TranslationInput};

/// Translate the uploaded file, or the typed text when no file is attached.
/// Invalid input is rejected before any request goes out.
pub async fn translate(api: &ApiClient, state: &mut impl StateAccess) -> Result<(), Rejection> {
    let job = state.mutate(AppState::begin_translation)?;
    tracing::debug!(backend = %job.backend_id, target = %job.target_lang, "translation started");

    let result = match &job.input {
        TranslationInput::File(file) => {
            api.upload_and_translate(file, &job.source_lang, &job.target_lang, &job.backend_id)
                .await
        }
        TranslationInput::Text(text) => {
            api.translate_text(text, &job.source_lang, &job.target_lang, &job.backend_id)
                .await
        }
    };

    let succeeded = result.is_ok();
    state.mutate(|s| s.finish_translation(result));

    // Usage counters moved on the server.
    if succeeded {
        auth::refresh_profile(api, state).await;
    }
    Ok(())
}
