//! Dioxus components. Each reads `Signal<AppState>`, `ApiClient` and
//! `ClientConfig` from context; the dashboard provides all three.

use dioxus::prelude::*;

mod auth_form;
mod backend_list;
mod file_upload;
mod header;
mod payment_methods;
mod plans;
mod profile;
mod settings;
mod toast;
mod workspace;

pub use auth_form::AuthForm;
pub use backend_list::{BackendCard, BackendList};
pub use file_upload::FileUpload;
pub use header::AppHeader;
pub use payment_methods::PaymentMethods;
pub use plans::{PlanCard, PlanGrid};
pub use profile::UserProfile;
pub use settings::BackendSettings;
pub use toast::ToastHost;
pub use workspace::TranslationWorkspace;

/// Subscribe the calling component to locale switches so its `t!` lookups
/// are redone after a change.
pub fn use_language() -> String {
    try_use_context::<Signal<String>>()
        .map(|code| code())
        .unwrap_or_default()
}
