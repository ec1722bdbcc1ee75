//! Wire types shared by the client and the UI crate.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Extra request headers (currently only `Authorization`).
pub type AuthHeaders = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    Local,
    Api,
    Translation,
}

/// A translation provider the user can pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backend {
    pub id: String,
    pub name: String,
    pub backend_type: BackendType,
    pub enabled: bool,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// Subscription tier identifiers as used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Free,
    Basic,
    Pro,
    Enterprise,
}

impl PlanId {
    pub const ALL: [PlanId; 4] = [PlanId::Free, PlanId::Basic, PlanId::Pro, PlanId::Enterprise];

    pub fn as_str(self) -> &'static str {
        match self {
            PlanId::Free => "free",
            PlanId::Basic => "basic",
            PlanId::Pro => "pro",
            PlanId::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub subscription_plan: PlanId,
    #[serde(default)]
    pub translations_used_today: i64,
    #[serde(default)]
    pub translations_remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_limit: Option<i64>,
}

fn default_currency() -> String {
    "usd".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslateTextRequest<'a> {
    pub text: &'a str,
    pub source_lang: Option<&'a str>,
    pub target_lang: &'a str,
    pub backend_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub backend_used: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    Revolut,
    Klarna,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Stripe,
        PaymentMethod::Paypal,
        PaymentMethod::Revolut,
        PaymentMethod::Klarna,
    ];
}

/// Processor intent handed out by the server.
///
/// Each processor answers with its own shape: card intents carry an `id`
/// and an integer amount in cents, Revolut a fractional amount, Klarna a
/// `session_id`/`client_token` pair with no `id`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentIntent {
    pub id: Option<String>,
    pub session_id: Option<String>,
    pub client_secret: Option<String>,
    pub client_token: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
}

impl PaymentIntent {
    /// Identifier for logs: the intent id, else the processor session id.
    pub fn reference(&self) -> &str {
        self.id
            .as_deref()
            .or(self.session_id.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PaymentIntentRequest {
    pub plan: PlanId,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PlanChangeRequest {
    pub plan: PlanId,
}

/// How the server should compose the exported image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportLayout {
    #[default]
    #[serde(rename = "overlay")]
    Overlay,
    #[serde(rename = "sidebyside")]
    SideBySide,
}

impl ExportLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportLayout::Overlay => "overlay",
            ExportLayout::SideBySide => "sidebyside",
        }
    }
}

/// A file picked or dropped by the user, held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Build a payload when the picker did not report a MIME type.
    pub fn from_upload(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_for_name(&name).to_string();
        Self { name, mime, bytes }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

fn mime_for_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
