//! Application state and the named operations that change it.
//!
//! Dioxus keeps one [`AppState`] in a `Signal` provided by the dashboard.
//! Actions and tests go through [`StateAccess`] so the same controller code
//! runs against a plain value without a renderer.

use api::{
    ApiError, AuthResponse, Backend, Credentials, ExportLayout, FilePayload, Plan, PlanId,
    TranslationResult, User,
};
use dioxus::prelude::*;

use super::catalog::{self, AUTO_DETECT};
use super::format;
use super::session::SessionManager;
use crate::{i18n, t};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Text,
    File,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// The one overlay that may be open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Auth,
    Plans,
    PaymentMethods,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Why an operation refused to start. Every variant except `Busy` has
/// already raised an error toast by the time it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Busy,
    NoBackend,
    EmptyInput,
    NothingToExport,
    MissingCredentials,
    SignInRequired,
    NoPlanSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationInput {
    Text(String),
    File(FilePayload),
}

/// Snapshot of everything a translation request needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub backend_id: String,
    pub source_lang: String,
    pub target_lang: String,
    pub input: TranslationInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub file: FilePayload,
    pub translated_text: String,
    pub target_lang: String,
    pub layout: ExportLayout,
}

/// Where an export broke: at the server or while handing the file over.
#[derive(Debug)]
pub enum ExportFailure {
    Api(ApiError),
    Delivery(String),
}

impl ExportJob {
    pub fn filename(&self) -> String {
        format::export_filename(&self.file.name)
    }
}

#[derive(Debug)]
pub struct AppState {
    backends: Vec<Backend>,
    selected_backend: Option<String>,
    source_lang: String,
    target_lang: String,
    input_text: String,
    translated_text: String,
    input_mode: InputMode,
    uploaded_file: Option<FilePayload>,
    preview_url: Option<String>,
    is_loading: bool,
    is_exporting: bool,
    export_layout: ExportLayout,
    show_settings: bool,
    settings_draft: Option<Backend>,
    toast: Option<Toast>,
    next_toast_id: u64,
    session: SessionManager,
    auth_mode: AuthMode,
    auth_email: String,
    auth_password: String,
    auth_loading: bool,
    modal: Option<Modal>,
    plans: Vec<Plan>,
    selected_plan: Option<Plan>,
    payment_loading: bool,
    pending_downgrade: bool,
}

impl AppState {
    pub fn new(session: SessionManager) -> Self {
        i18n::init();
        Self {
            backends: Vec::new(),
            selected_backend: None,
            source_lang: AUTO_DETECT.to_string(),
            target_lang: "en".to_string(),
            input_text: String::new(),
            translated_text: String::new(),
            input_mode: InputMode::default(),
            uploaded_file: None,
            preview_url: None,
            is_loading: false,
            is_exporting: false,
            export_layout: ExportLayout::default(),
            show_settings: false,
            settings_draft: None,
            toast: None,
            next_toast_id: 0,
            session,
            auth_mode: AuthMode::default(),
            auth_email: String::new(),
            auth_password: String::new(),
            auth_loading: false,
            modal: None,
            plans: Vec::new(),
            selected_plan: None,
            payment_loading: false,
            pending_downgrade: false,
        }
    }

    // --- reads ---------------------------------------------------------

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn current_plan(&self) -> PlanId {
        self.session.current_plan()
    }

    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    pub fn visible_backends(&self) -> Vec<&Backend> {
        catalog::available_backends(&self.backends, self.current_plan())
    }

    pub fn selected_backend(&self) -> Option<&Backend> {
        let id = self.selected_backend.as_deref()?;
        self.backends.iter().find(|b| b.id == id)
    }

    pub fn selected_backend_id(&self) -> Option<&str> {
        self.selected_backend.as_deref()
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn has_translation(&self) -> bool {
        !self.translated_text.trim().is_empty()
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn uploaded_file(&self) -> Option<&FilePayload> {
        self.uploaded_file.as_ref()
    }

    /// `data:` URL of the uploaded image, built once on upload.
    pub fn preview_url(&self) -> Option<&str> {
        self.preview_url.as_deref()
    }

    pub fn has_image(&self) -> bool {
        self.uploaded_file.as_ref().is_some_and(FilePayload::is_image)
    }

    /// Export is offered only for an uploaded image that has been translated.
    pub fn can_export(&self) -> bool {
        self.has_image() && self.has_translation()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_exporting(&self) -> bool {
        self.is_exporting
    }

    pub fn export_layout(&self) -> ExportLayout {
        self.export_layout
    }

    pub fn show_settings(&self) -> bool {
        self.show_settings
    }

    pub fn settings_draft(&self) -> Option<&Backend> {
        self.settings_draft.as_ref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    pub fn auth_email(&self) -> &str {
        &self.auth_email
    }

    pub fn auth_password(&self) -> &str {
        &self.auth_password
    }

    pub fn auth_loading(&self) -> bool {
        self.auth_loading
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn selected_plan(&self) -> Option<&Plan> {
        self.selected_plan.as_ref()
    }

    pub fn payment_loading(&self) -> bool {
        self.payment_loading
    }

    pub fn pending_downgrade(&self) -> bool {
        self.pending_downgrade
    }

    // --- backends ------------------------------------------------------

    pub fn set_backends(&mut self, backends: Vec<Backend>) {
        self.backends = backends;
        self.reconcile_selection();
    }

    /// Select `id` if it is enabled and allowed on the current plan.
    pub fn select_backend(&mut self, id: &str) -> bool {
        let visible = self.visible_backends().iter().any(|b| b.id == id);
        if !visible {
            tracing::debug!(backend = id, "ignoring selection of unavailable backend");
            return false;
        }
        self.set_selection(Some(id.to_string()));
        true
    }

    pub fn select_default_backend(&mut self) {
        let first = self.visible_backends().first().map(|b| b.id.clone());
        self.set_selection(first);
    }

    /// Keep the selection while it stays visible, otherwise fall back to the
    /// first visible backend (or none).
    pub fn reconcile_selection(&mut self) {
        let still_visible = self
            .selected_backend
            .as_deref()
            .is_some_and(|id| self.visible_backends().iter().any(|b| b.id == id));
        if !still_visible {
            self.select_default_backend();
        }
    }

    fn set_selection(&mut self, id: Option<String>) {
        if self.selected_backend != id {
            tracing::debug!(from = ?self.selected_backend, to = ?id, "backend selection changed");
        }
        self.selected_backend = id;
        self.settings_draft = self.selected_backend().cloned();
    }

    // --- languages & inputs --------------------------------------------

    pub fn set_source_lang(&mut self, code: &str) {
        if catalog::language_name(code).is_some() {
            self.source_lang = code.to_string();
        }
    }

    /// `auto` is never a valid target.
    pub fn set_target_lang(&mut self, code: &str) {
        if code != AUTO_DETECT && catalog::language_name(code).is_some() {
            self.target_lang = code.to_string();
        }
    }

    /// Swap source and target. Refused while the source is `auto`.
    pub fn swap_languages(&mut self) -> bool {
        if self.source_lang == AUTO_DETECT {
            return false;
        }
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
        true
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    /// The latest file wins; there is never more than one.
    pub fn set_uploaded_file(&mut self, file: FilePayload) {
        tracing::debug!(name = %file.name, mime = %file.mime, size = file.bytes.len(), "file attached");
        self.preview_url = file.is_image().then(|| format::data_url(&file));
        self.uploaded_file = Some(file);
    }

    pub fn remove_uploaded_file(&mut self) {
        self.uploaded_file = None;
        self.preview_url = None;
        self.translated_text.clear();
    }

    pub fn set_export_layout(&mut self, layout: ExportLayout) {
        self.export_layout = layout;
    }

    // --- toasts --------------------------------------------------------

    /// Replace the current toast and return its id for later dismissal.
    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.next_toast_id += 1;
        let toast = Toast {
            id: self.next_toast_id,
            message: message.into(),
            kind,
        };
        if kind == ToastKind::Error {
            tracing::warn!(message = %toast.message, "error toast");
        }
        self.toast = Some(toast);
        self.next_toast_id
    }

    /// Clear the toast only if it is still the one with `id`.
    pub fn dismiss_toast(&mut self, id: u64) -> bool {
        if self.toast.as_ref().is_some_and(|t| t.id == id) {
            self.toast = None;
            true
        } else {
            false
        }
    }

    fn reject(&mut self, rejection: Rejection, message: String) -> Rejection {
        self.notify(message, ToastKind::Error);
        rejection
    }

    // --- modals --------------------------------------------------------

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.selected_plan = None;
        self.pending_downgrade = false;
    }

    // --- settings ------------------------------------------------------

    pub fn toggle_settings(&mut self) {
        self.show_settings = !self.show_settings;
        if self.show_settings {
            self.settings_draft = self.selected_backend().cloned();
        }
    }

    /// Update an existing key of the draft; unknown keys are ignored.
    pub fn edit_setting(&mut self, key: &str, value: impl Into<String>) {
        if let Some(slot) = self
            .settings_draft
            .as_mut()
            .and_then(|draft| draft.config.get_mut(key))
        {
            *slot = value.into();
        }
    }

    pub fn apply_saved_backend(&mut self, backend: Backend) {
        if let Some(slot) = self.backends.iter_mut().find(|b| b.id == backend.id) {
            *slot = backend.clone();
        }
        if self.selected_backend.as_deref() == Some(backend.id.as_str()) {
            self.settings_draft = Some(backend);
        }
        self.reconcile_selection();
    }

    // --- plans ---------------------------------------------------------

    pub fn set_plans(&mut self, plans: Vec<Plan>) {
        self.plans = plans;
    }

    pub fn choose_plan(&mut self, plan: Plan) {
        self.selected_plan = Some(plan);
        self.pending_downgrade = false;
        self.modal = Some(Modal::PaymentMethods);
    }

    pub fn back_to_plans(&mut self) {
        self.selected_plan = None;
        self.modal = Some(Modal::Plans);
    }

    pub fn request_downgrade(&mut self) {
        self.pending_downgrade = true;
    }

    pub fn cancel_downgrade(&mut self) {
        self.pending_downgrade = false;
    }

    /// Move the in-memory user to `plan` without a server round-trip.
    pub fn apply_plan_locally(&mut self, plan: PlanId) -> bool {
        let applied = self.session.assume_plan(plan).is_some();
        self.reconcile_selection();
        applied
    }

    pub fn begin_payment(&mut self) -> Result<Plan, Rejection> {
        if !self.session.is_authenticated() {
            let message = t!("toast-login-to-subscribe");
            return Err(self.reject(Rejection::SignInRequired, message));
        }
        if self.payment_loading {
            return Err(Rejection::Busy);
        }
        let Some(plan) = self.selected_plan.clone() else {
            let message = t!("toast-no-plan");
            return Err(self.reject(Rejection::NoPlanSelected, message));
        };
        self.payment_loading = true;
        Ok(plan)
    }

    /// `Ok` carries the plan name shown in the confirmation.
    pub fn finish_payment(&mut self, outcome: Result<String, String>) {
        self.payment_loading = false;
        match outcome {
            Ok(name) => {
                self.notify(t!("toast-subscribed", plan = name), ToastKind::Success);
                self.close_modal();
            }
            Err(error) => {
                self.notify(t!("toast-payment-failed", error = error), ToastKind::Error);
            }
        }
    }

    pub fn finish_downgrade(&mut self, cancelled: bool) {
        self.pending_downgrade = false;
        if cancelled {
            self.apply_plan_locally(PlanId::Free);
            self.notify(t!("toast-cancelled"), ToastKind::Success);
            self.close_modal();
        } else {
            self.notify(t!("toast-cancel-failed"), ToastKind::Error);
        }
    }

    // --- translation ---------------------------------------------------

    /// Validate inputs and mark a translation as in flight. A file takes
    /// priority over typed text.
    pub fn begin_translation(&mut self) -> Result<TranslationJob, Rejection> {
        if self.is_loading {
            return Err(Rejection::Busy);
        }
        let Some(backend_id) = self.selected_backend.clone() else {
            let message = t!("toast-select-backend");
            return Err(self.reject(Rejection::NoBackend, message));
        };
        let input = if let Some(file) = self.uploaded_file.clone() {
            TranslationInput::File(file)
        } else if !self.input_text.trim().is_empty() {
            TranslationInput::Text(self.input_text.clone())
        } else {
            let message = t!("toast-empty-input");
            return Err(self.reject(Rejection::EmptyInput, message));
        };
        self.is_loading = true;
        Ok(TranslationJob {
            backend_id,
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            input,
        })
    }

    pub fn finish_translation(&mut self, result: Result<TranslationResult, ApiError>) {
        self.is_loading = false;
        match result {
            Ok(result) => {
                self.translated_text = result.translated_text;
                let message = t!("toast-translated", backend = result.backend_used);
                self.notify(message, ToastKind::Success);
            }
            Err(err) => {
                let message =
                    failure_message(&err, |error| t!("toast-translation-failed", error = error));
                self.notify(message, ToastKind::Error);
            }
        }
    }

    // --- export --------------------------------------------------------

    pub fn begin_export(&mut self) -> Result<ExportJob, Rejection> {
        if self.is_exporting {
            return Err(Rejection::Busy);
        }
        let translated = self.has_translation();
        let Some(file) = self
            .uploaded_file
            .clone()
            .filter(|file| translated && file.is_image())
        else {
            let message = t!("toast-export-needs-image");
            return Err(self.reject(Rejection::NothingToExport, message));
        };
        self.is_exporting = true;
        Ok(ExportJob {
            file,
            translated_text: self.translated_text.clone(),
            target_lang: self.target_lang.clone(),
            layout: self.export_layout,
        })
    }

    /// `Ok(Some(path))` when the file was written locally, `Ok(None)` when
    /// the browser handled the download.
    pub fn finish_export(&mut self, outcome: Result<Option<String>, ExportFailure>) {
        self.is_exporting = false;
        match outcome {
            Ok(None) => {
                self.notify(t!("toast-export-downloaded"), ToastKind::Success);
            }
            Ok(Some(path)) => {
                self.notify(t!("toast-export-saved", path = path), ToastKind::Success);
            }
            Err(ExportFailure::Api(err)) => {
                let message = failure_message(&err, |error| t!("toast-export-failed", error = error));
                self.notify(message, ToastKind::Error);
            }
            Err(ExportFailure::Delivery(error)) => {
                self.notify(t!("toast-export-failed", error = error), ToastKind::Error);
            }
        }
    }

    // --- auth ----------------------------------------------------------

    pub fn set_auth_mode(&mut self, mode: AuthMode) {
        self.auth_mode = mode;
    }

    pub fn set_auth_email(&mut self, email: impl Into<String>) {
        self.auth_email = email.into();
    }

    pub fn set_auth_password(&mut self, password: impl Into<String>) {
        self.auth_password = password.into();
    }

    pub fn begin_auth(&mut self) -> Result<(AuthMode, Credentials), Rejection> {
        if self.auth_loading {
            return Err(Rejection::Busy);
        }
        let email = self.auth_email.trim().to_string();
        if email.is_empty() || self.auth_password.is_empty() {
            let message = t!("toast-credentials-required");
            return Err(self.reject(Rejection::MissingCredentials, message));
        }
        self.auth_loading = true;
        Ok((
            self.auth_mode,
            Credentials {
                email,
                password: self.auth_password.clone(),
            },
        ))
    }

    /// Form fields are cleared whatever the outcome.
    pub fn finish_auth(&mut self) {
        self.auth_loading = false;
        self.auth_email.clear();
        self.auth_password.clear();
    }

    /// Anonymous → Authenticated.
    pub fn sign_in(&mut self, auth: AuthResponse) {
        tracing::debug!(email = %auth.user.email, plan = %auth.user.subscription_plan, "signed in");
        self.session.set_auth(auth.token, auth.user);
        if self.modal == Some(Modal::Auth) {
            self.close_modal();
        }
        self.reconcile_selection();
    }

    pub fn apply_profile(&mut self, user: User) {
        self.session.refresh_user(user);
        self.reconcile_selection();
    }

    /// Back to anonymous; billing overlays make no sense without a session.
    pub fn sign_out(&mut self) {
        self.session.logout();
        self.payment_loading = false;
        if matches!(self.modal, Some(Modal::Plans | Modal::PaymentMethods)) {
            self.close_modal();
        }
        self.reconcile_selection();
    }
}

/// Status errors already read "<action> failed: ..."; everything else gets
/// the caller's prefix.
fn failure_message(err: &ApiError, prefixed: impl FnOnce(String) -> String) -> String {
    match err {
        ApiError::Status { .. } => err.to_string(),
        other => prefixed(other.to_string()),
    }
}

/// Somewhere an [`AppState`] lives: a plain value in tests, a Dioxus signal
/// in the running app.
pub trait StateAccess {
    fn query<R>(&self, f: impl FnOnce(&AppState) -> R) -> R;
    fn mutate<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R;
}

impl StateAccess for AppState {
    fn query<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(self)
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(self)
    }
}

impl StateAccess for Signal<AppState> {
    fn query<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        self.with(f)
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        self.with_mut(f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use api::BackendType;

    use super::*;
    use crate::core::storage::MemoryStore;

    fn backend(id: &str, enabled: bool) -> Backend {
        let mut config = BTreeMap::new();
        config.insert("api_key".to_string(), String::new());
        Backend {
            id: id.into(),
            name: id.to_uppercase(),
            backend_type: BackendType::Api,
            enabled,
            config,
        }
    }

    fn user(plan: PlanId) -> User {
        User {
            id: None,
            email: "ana@example.com".into(),
            subscription_plan: plan,
            translations_used_today: 3,
            translations_remaining: 7,
        }
    }

    fn anonymous() -> AppState {
        AppState::new(SessionManager::restore(Box::new(MemoryStore::new())))
    }

    fn signed_in(plan: PlanId) -> AppState {
        let mut state = anonymous();
        state.sign_in(AuthResponse {
            token: "tok".into(),
            user: user(plan),
        });
        state
    }

    #[test]
    fn default_selection_is_first_eligible() {
        let mut state = anonymous();
        state.set_backends(vec![
            backend("gemini", true),
            backend("ollama", false),
            backend("llama_cpp", true),
        ]);
        assert_eq!(state.selected_backend_id(), Some("llama_cpp"));
        assert_eq!(state.settings_draft().map(|b| b.id.as_str()), Some("llama_cpp"));
    }

    #[test]
    fn selecting_disabled_backend_is_a_no_op() {
        let mut state = anonymous();
        state.set_backends(vec![backend("ollama", true), backend("llama_cpp", false)]);
        assert!(!state.select_backend("llama_cpp"));
        assert_eq!(state.selected_backend_id(), Some("ollama"));
    }

    #[test]
    fn free_plan_excludes_gemini() {
        let mut state = signed_in(PlanId::Free);
        state.set_backends(vec![backend("gemini", true), backend("ollama", true)]);
        let ids: Vec<_> = state.visible_backends().iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids, vec!["ollama"]);
        assert!(!state.select_backend("gemini"));
    }

    #[test]
    fn downgrade_moves_selection_off_premium_backend() {
        let mut state = signed_in(PlanId::Pro);
        state.set_backends(vec![backend("ollama", true), backend("gemini", true)]);
        assert!(state.select_backend("gemini"));

        state.apply_plan_locally(PlanId::Free);
        assert_eq!(state.selected_backend_id(), Some("ollama"));
    }

    #[test]
    fn sign_out_reconciles_to_nothing_when_nothing_is_free() {
        let mut state = signed_in(PlanId::Enterprise);
        state.set_backends(vec![backend("anthropic", true)]);
        assert_eq!(state.selected_backend_id(), Some("anthropic"));

        state.sign_out();
        assert_eq!(state.selected_backend_id(), None);
        assert!(!state.session().is_authenticated());
    }

    #[test]
    fn empty_submission_is_rejected_with_toast() {
        let mut state = anonymous();
        state.set_backends(vec![backend("ollama", true)]);
        state.set_input_text("   ");
        assert_eq!(state.begin_translation(), Err(Rejection::EmptyInput));
        assert!(!state.is_loading());
        assert_eq!(state.toast().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn translation_requires_a_backend() {
        let mut state = anonymous();
        state.set_input_text("Hola");
        assert_eq!(state.begin_translation(), Err(Rejection::NoBackend));
    }

    #[test]
    fn file_takes_priority_over_text() {
        let mut state = anonymous();
        state.set_backends(vec![backend("ollama", true)]);
        state.set_input_text("Hola");
        state.set_uploaded_file(FilePayload::new("a.png", "image/png", vec![1]));

        let job = state.begin_translation().unwrap();
        assert!(matches!(job.input, TranslationInput::File(ref f) if f.name == "a.png"));
        assert_eq!(job.source_lang, "auto");
        assert!(state.is_loading());
        assert_eq!(state.begin_translation(), Err(Rejection::Busy));
    }

    #[test]
    fn finish_translation_writes_text_and_clears_loading() {
        let mut state = anonymous();
        state.set_backends(vec![backend("ollama", true)]);
        state.set_input_text("Hola");
        state.begin_translation().unwrap();

        state.finish_translation(Ok(TranslationResult {
            translated_text: "Hello".into(),
            backend_used: "ollama".into(),
        }));
        assert_eq!(state.translated_text(), "Hello");
        assert!(!state.is_loading());
        let toast = state.toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert!(toast.message.contains("ollama"));
    }

    #[test]
    fn status_errors_are_not_prefixed_twice() {
        let mut state = anonymous();
        state.finish_translation(Err(ApiError::Status {
            action: "Translation",
            status: 500,
            reason: "Internal Server Error".into(),
            body: None,
        }));
        let toast = state.toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Translation failed: Internal Server Error");
    }

    #[test]
    fn export_without_translation_is_rejected() {
        let mut state = anonymous();
        state.set_uploaded_file(FilePayload::from_upload("menu.png", vec![1, 2]));
        assert_eq!(state.begin_export(), Err(Rejection::NothingToExport));
        assert!(!state.is_exporting());
        assert_eq!(state.toast().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn export_requires_an_image() {
        let mut state = anonymous();
        state.set_uploaded_file(FilePayload::from_upload("doc.pdf", vec![1]));
        state.translated_text = "done".into();
        assert_eq!(state.begin_export(), Err(Rejection::NothingToExport));

        state.set_uploaded_file(FilePayload::from_upload("pic.jpg", vec![1]));
        state.set_export_layout(ExportLayout::SideBySide);
        let job = state.begin_export().unwrap();
        assert_eq!(job.layout, ExportLayout::SideBySide);
        assert_eq!(job.filename(), "translated_pic.jpg.png");
    }

    #[test]
    fn upload_replaces_previous_file() {
        let mut state = anonymous();
        state.set_uploaded_file(FilePayload::from_upload("one.png", vec![1]));
        assert!(state.preview_url().is_some());
        state.set_uploaded_file(FilePayload::from_upload("two.pdf", vec![2]));
        assert_eq!(state.uploaded_file().map(|f| f.name.as_str()), Some("two.pdf"));
        assert!(state.preview_url().is_none());
    }

    #[test]
    fn removing_file_clears_translation() {
        let mut state = anonymous();
        state.set_uploaded_file(FilePayload::from_upload("one.png", vec![1]));
        state.translated_text = "hi".into();
        state.remove_uploaded_file();
        assert!(state.uploaded_file().is_none());
        assert!(!state.has_translation());
    }

    #[test]
    fn only_one_modal_is_open() {
        let mut state = anonymous();
        state.open_modal(Modal::Auth);
        state.open_modal(Modal::Plans);
        assert_eq!(state.modal(), Some(Modal::Plans));

        let plan = Plan {
            id: PlanId::Pro,
            name: "Pro".into(),
            price: 29.0,
            currency: "usd".into(),
            features: vec![],
            translation_limit: Some(1000),
        };
        state.choose_plan(plan);
        assert_eq!(state.modal(), Some(Modal::PaymentMethods));
        state.back_to_plans();
        assert_eq!(state.modal(), Some(Modal::Plans));
        assert!(state.selected_plan().is_none());
        state.close_modal();
        assert_eq!(state.modal(), None);
    }

    #[test]
    fn stale_dismissal_keeps_newer_toast() {
        let mut state = anonymous();
        let first = state.notify("one", ToastKind::Success);
        let second = state.notify("two", ToastKind::Error);
        assert!(!state.dismiss_toast(first));
        assert_eq!(state.toast().map(|t| t.id), Some(second));
        assert!(state.dismiss_toast(second));
        assert!(state.toast().is_none());
    }

    #[test]
    fn swap_never_targets_auto() {
        let mut state = anonymous();
        assert!(!state.swap_languages());
        assert_eq!(state.target_lang(), "en");

        state.set_source_lang("es");
        assert!(state.swap_languages());
        assert_eq!((state.source_lang(), state.target_lang()), ("en", "es"));

        state.set_target_lang("auto");
        assert_eq!(state.target_lang(), "es");
    }

    #[test]
    fn settings_draft_edits_known_keys_only() {
        let mut state = anonymous();
        state.set_backends(vec![backend("ollama", true)]);
        state.toggle_settings();
        state.edit_setting("api_key", "secret");
        state.edit_setting("unknown", "x");

        let draft = state.settings_draft().cloned().unwrap();
        assert_eq!(draft.config.get("api_key").map(String::as_str), Some("secret"));
        assert!(!draft.config.contains_key("unknown"));
        assert_eq!(state.backends()[0].config["api_key"], "");

        state.apply_saved_backend(draft);
        assert_eq!(state.backends()[0].config["api_key"], "secret");
    }

    #[test]
    fn payment_needs_a_session() {
        let mut state = anonymous();
        assert_eq!(state.begin_payment(), Err(Rejection::SignInRequired));
        assert!(!state.payment_loading());
    }

    #[test]
    fn auth_form_clears_after_attempt() {
        let mut state = anonymous();
        assert_eq!(state.begin_auth(), Err(Rejection::MissingCredentials));

        state.set_auth_email(" ana@example.com ");
        state.set_auth_password("pw");
        let (mode, creds) = state.begin_auth().unwrap();
        assert_eq!(mode, AuthMode::Login);
        assert_eq!(creds.email, "ana@example.com");
        assert!(state.auth_loading());

        state.finish_auth();
        assert!(!state.auth_loading());
        assert!(state.auth_email().is_empty());
        assert!(state.auth_password().is_empty());
    }

    #[test]
    fn cancelled_subscription_lands_on_free() {
        let mut state = signed_in(PlanId::Basic);
        state.open_modal(Modal::Plans);
        state.request_downgrade();
        state.finish_downgrade(true);
        assert_eq!(state.current_plan(), PlanId::Free);
        assert_eq!(state.modal(), None);
        assert!(!state.pending_downgrade());
    }
}
