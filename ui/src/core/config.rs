//! Client configuration: API origin, feature flags and timings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::storage::{self, KeyValueStore};

/// Store key holding a JSON override document.
pub const CONFIG_KEY: &str = "transloom_config";

/// What to do when the server refuses or cannot be reached during a plan change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionFallback {
    /// Apply the new plan locally and recompute the quota from the static table.
    #[default]
    Optimistic,
    /// Leave the local state alone and report the failure.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub payments: bool,
    pub ocr: bool,
    pub export: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            payments: true,
            ocr: true,
            export: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub features: FeatureFlags,
    pub subscription_fallback: SubscriptionFallback,
    pub toast_ms: u64,
    pub payment_settle_ms: u64,
}

const LOCAL_API: &str = "http://localhost:3000";

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: LOCAL_API.to_string(),
            features: FeatureFlags::default(),
            subscription_fallback: SubscriptionFallback::default(),
            toast_ms: 3_000,
            payment_settle_ms: 2_000,
        }
    }
}

impl ClientConfig {
    /// Configuration for the running platform. A base URL baked in through
    /// `TRANSLOOM_API_BASE` wins; web builds otherwise talk to their own
    /// origin. Overrides then apply from `TRANSLOOM_CONFIG` and the store.
    pub fn detect() -> Self {
        Self::detect_with(&*storage::default_store())
    }

    pub fn detect_with(store: &dyn KeyValueStore) -> Self {
        let api_base_url = option_env!("TRANSLOOM_API_BASE")
            .map(str::to_string)
            .or_else(page_origin)
            .unwrap_or_else(|| LOCAL_API.to_string());
        let mut config = Self {
            api_base_url,
            ..Self::default()
        };

        let sources = [
            ("build", option_env!("TRANSLOOM_CONFIG").map(str::to_string)),
            ("store", store.get(CONFIG_KEY)),
        ];
        for (source, raw) in sources {
            let Some(raw) = raw else { continue };
            match config.clone().with_overrides(&raw) {
                Ok(merged) => config = merged,
                Err(err) => tracing::warn!(source, error = %err, "ignoring malformed config override"),
            }
        }
        tracing::debug!(api = %config.api_base_url, fallback = ?config.subscription_fallback, "client config ready");
        config
    }

    /// Parse an override document; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Self::default().with_overrides(raw)
    }

    /// Overlay a JSON document on this configuration. Nested objects merge
    /// field by field; absent fields keep their current values.
    pub fn with_overrides(self, raw: &str) -> Result<Self, serde_json::Error> {
        let overlay: Value = serde_json::from_str(raw)?;
        let mut merged = serde_json::to_value(self)?;
        overlay_json(&mut merged, overlay);
        serde_json::from_value(merged)
    }
}

fn overlay_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => overlay_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}
