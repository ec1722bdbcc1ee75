//! Internationalization for `transloom-ui`.
//!
//! - `i18n-embed` picks the language and loads bundles
//! - `rust-embed` compiles the `.ftl` files into the binary
//! - `i18n-embed-fl` checks every `t!` key against the fallback at compile time
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/transloom-ui.ftl   (fallback/reference)
//!   es-ES/transloom-ui.ftl
//! ```
//!
//! Usage in a component:
//! ```ignore
//! use crate::t;
//! let label = t!("header-login");
//! let toast = t!("toast-welcome", email = user.email.clone());
//! ```
//!
//! To add a locale, copy `en-US/transloom-ui.ftl` to
//! `i18n/<lang-id>/transloom-ui.ftl` and translate each value, keeping IDs and
//! placeholders identical. The completeness tests fail on any missing key.
//!
//! Desktop builds ask the OS for preferred languages; web builds read
//! `navigator.languages`. Assets are always embedded on WASM (`debug-embed`).
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Shorthand for `fl!(&*LOADER, ...)`:
///     t!("header-login")
///     t!("toast-welcome", email = "ana@example.com")
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the fallback file is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "transloom-ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = unic_langid::langid!("en-US");
    let loader = FluentLanguageLoader::new(DOMAIN, fallback);
    // Toast text is plain; bidi isolation marks would leak into it.
    loader.set_use_isolating(false);
    loader
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!(error = %err, "failed selecting languages, using fallback");
        }
    });
}

/// Switch language at runtime. An unparseable `tag` is ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Tag of the language currently in use, e.g. `en-US`.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
