//! Static lookup tables: plan eligibility, quota fallback, languages, icons.

use api::{Backend, BackendType, PlanId};

const ALL_PLANS: &[PlanId] = &[PlanId::Free, PlanId::Basic, PlanId::Pro, PlanId::Enterprise];
const BASIC_UP: &[PlanId] = &[PlanId::Basic, PlanId::Pro, PlanId::Enterprise];
const PRO_UP: &[PlanId] = &[PlanId::Pro, PlanId::Enterprise];
const ENTERPRISE_ONLY: &[PlanId] = &[PlanId::Enterprise];
const FREE_ONLY: &[PlanId] = &[PlanId::Free];

/// Plans allowed to use a backend. Unlisted backends are free-tier only.
pub fn allowed_plans(backend_id: &str) -> &'static [PlanId] {
    match backend_id {
        "ollama" | "llama_cpp" => ALL_PLANS,
        "deepl" => BASIC_UP,
        "openai" | "gemini" | "mistral" | "ratchet" | "kalosm" => PRO_UP,
        "anthropic" => ENTERPRISE_ONLY,
        _ => FREE_ONLY,
    }
}

pub fn is_eligible(backend: &Backend, plan: PlanId) -> bool {
    backend.enabled && allowed_plans(&backend.id).contains(&plan)
}

/// Backends a user on `plan` may pick, in server order.
pub fn available_backends(backends: &[Backend], plan: PlanId) -> Vec<&Backend> {
    backends.iter().filter(|b| is_eligible(b, plan)).collect()
}

/// Daily translation quota assumed when the server cannot be asked.
pub fn daily_quota(plan: PlanId) -> i64 {
    match plan {
        PlanId::Basic => 100,
        PlanId::Pro => 1000,
        PlanId::Enterprise => 10000,
        PlanId::Free => 10,
    }
}

/// Human summary of what each tier unlocks (shown under the backend list).
pub fn plan_backends(plan: PlanId) -> &'static [&'static str] {
    match plan {
        PlanId::Free => &["Ollama (Local)", "llama.cpp (Local)"],
        PlanId::Basic => &["Ollama", "llama.cpp", "DeepL API"],
        PlanId::Pro => &["All Local", "DeepL", "OpenAI GPT", "Google Gemini", "Mistral"],
        PlanId::Enterprise => &["All Available Models"],
    }
}

/// Supported language codes with English display names. `auto` is only
/// valid as a source language.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("auto", "Auto-detect"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("pl", "Polish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
];

pub const AUTO_DETECT: &str = "auto";

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn target_languages() -> impl Iterator<Item = &'static (&'static str, &'static str)> {
    LANGUAGES.iter().filter(|(code, _)| *code != AUTO_DETECT)
}

pub fn backend_icon(backend_id: &str) -> &'static str {
    match backend_id {
        "gemini" => "💎",
        "mistral" => "🌪️",
        "anthropic" => "🧠",
        "ollama" => "🦙",
        "llama_cpp" => "🚀",
        "deepl" => "🌍",
        "ratchet" => "⚡",
        "kalosm" => "🔮",
        _ => "🤖",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Local,
    Cloud,
    Specialized,
    Vision,
}

pub fn capabilities(backend: &Backend) -> Vec<Capability> {
    let mut caps = vec![match backend.backend_type {
        BackendType::Local => Capability::Local,
        BackendType::Api => Capability::Cloud,
        BackendType::Translation => Capability::Specialized,
    }];
    if matches!(backend.id.as_str(), "gemini" | "openai") {
        caps.push(Capability::Vision);
    }
    caps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn backend(id: &str, enabled: bool) -> Backend {
        Backend {
            id: id.into(),
            name: id.to_uppercase(),
            backend_type: BackendType::Api,
            enabled,
            config: BTreeMap::new(),
        }
    }

    #[test]
    fn free_plan_hides_premium_backends() {
        let backends = vec![backend("gemini", true), backend("ollama", true)];
        let visible = available_backends(&backends, PlanId::Free);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "ollama");
    }

    #[test]
    fn eligibility_matches_table_for_every_plan() {
        let ids = [
            "ollama", "llama_cpp", "deepl", "openai", "gemini", "mistral", "ratchet", "kalosm",
            "anthropic", "custom",
        ];
        for id in ids {
            for plan in PlanId::ALL {
                let on = backend(id, true);
                let off = backend(id, false);
                assert_eq!(is_eligible(&on, plan), allowed_plans(id).contains(&plan));
                assert!(!is_eligible(&off, plan), "{id} disabled must never be eligible");
            }
        }
    }

    #[test]
    fn unlisted_backend_is_free_only() {
        assert_eq!(allowed_plans("custom"), &[PlanId::Free]);
        assert!(!is_eligible(&backend("custom", true), PlanId::Pro));
    }

    #[test]
    fn language_table_has_twenty_entries() {
        assert_eq!(LANGUAGES.len(), 20);
        assert_eq!(language_name("auto"), Some("Auto-detect"));
        assert_eq!(target_languages().count(), 19);
    }

    #[test]
    fn quota_fallback() {
        assert_eq!(daily_quota(PlanId::Basic), 100);
        assert_eq!(daily_quota(PlanId::Pro), 1000);
        assert_eq!(daily_quota(PlanId::Enterprise), 10000);
        assert_eq!(daily_quota(PlanId::Free), 10);
    }

    #[test]
    fn vision_tag_for_multimodal_backends() {
        let caps = capabilities(&backend("openai", true));
        assert_eq!(caps, vec![Capability::Cloud, Capability::Vision]);
    }
}
