use thiserror::Error;

/// Failures surfaced by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{action} failed: {reason}{}", detail_suffix(.body))]
    Status {
        action: &'static str,
        status: u16,
        reason: String,
        body: Option<String>,
    },

    /// Auth endpoints answer with a plain-text explanation.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to create payment intent")]
    PaymentIntent,

    #[error("No original file provided")]
    MissingFile,

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for errors produced by a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn detail_suffix(body: &Option<String>) -> String {
    match body.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!(" - {text}"),
        _ => String::new(),
    }
}
