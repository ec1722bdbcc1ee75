//! HTTP client wrapper around the translation service endpoints.
//!
//! Every call is "send, await, map": no retries, no timeouts beyond what the
//! transport enforces, no deduplication. Read-only listings degrade to empty
//! results; everything else hands an [`ApiError`] back to the caller.

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{
    AuthHeaders, AuthResponse, Backend, Credentials, ExportLayout, FilePayload, PaymentIntent,
    PaymentIntentRequest, PaymentMethod, Plan, PlanChangeRequest, PlanId, TranslateTextRequest,
    TranslationResult, User,
};

/// Thin handle over a shared `reqwest::Client`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_backends(&self) -> Vec<Backend> {
        let result = async {
            let response = self.http.get(self.url("/api/backends")).send().await?;
            decode::<Vec<Backend>>(response, "Backend listing").await
        }
        .await;

        result.unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to fetch backends");
            Vec::new()
        })
    }

    pub async fn save_backend_config(&self, backend: &Backend) -> bool {
        let result = self
            .http
            .post(self.url("/api/backends"))
            .json(backend)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::error!(status = %response.status(), backend = %backend.id, "backend save rejected");
                false
            }
            Err(err) => {
                tracing::error!(error = %err, backend = %backend.id, "failed to save backend");
                false
            }
        }
    }

    /// Translate plain text. A source language of `"auto"` is sent as `null`
    /// so the backend detects it.
    pub async fn translate_text(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        backend_id: &str,
    ) -> Result<TranslationResult, ApiError> {
        let body = TranslateTextRequest {
            text,
            source_lang: (source_lang != "auto").then_some(source_lang),
            target_lang,
            backend_id,
        };

        let result = async {
            let response = self
                .http
                .post(self.url("/api/translate"))
                .json(&body)
                .send()
                .await?;
            decode(response, "Translation").await
        }
        .await;

        if let Err(err) = &result {
            tracing::error!(error = %err, backend = backend_id, "translation failed");
        }
        result
    }

    pub async fn upload_and_translate(
        &self,
        file: &FilePayload,
        source_lang: &str,
        target_lang: &str,
        backend_id: &str,
    ) -> Result<TranslationResult, ApiError> {
        let form = Form::new()
            .part("file", file_part(file)?)
            .text("source_lang", source_lang.to_string())
            .text("target_lang", target_lang.to_string())
            .text("backend_id", backend_id.to_string());

        let result = async {
            let response = self
                .http
                .post(self.url("/api/upload"))
                .multipart(form)
                .send()
                .await?;
            decode(response, "Upload").await
        }
        .await;

        if let Err(err) = &result {
            tracing::error!(error = %err, file = %file.name, "upload and translate failed");
        }
        result
    }

    /// Ask the server to render the translation onto the original image.
    /// Returns the encoded image bytes.
    pub async fn export_translated_image(
        &self,
        original: &FilePayload,
        translated_text: &str,
        target_lang: &str,
        layout: ExportLayout,
    ) -> Result<Vec<u8>, ApiError> {
        if original.bytes.is_empty() {
            return Err(ApiError::MissingFile);
        }

        let form = Form::new()
            .part("original_image", file_part(original)?)
            .text("translated_text", translated_text.to_string())
            .text("target_lang", target_lang.to_string())
            .text("export_type", layout.as_str());

        tracing::debug!(file = %original.name, layout = layout.as_str(), "sending export request");

        let result = async {
            let response = self
                .http
                .post(self.url("/api/export"))
                .multipart(form)
                .send()
                .await?;
            let response = ensure_success(response, "Export", true).await?;
            Ok::<_, ApiError>(response.bytes().await?.to_vec())
        }
        .await;

        match &result {
            Ok(bytes) => tracing::debug!(size = bytes.len(), "export succeeded"),
            Err(err) => tracing::error!(error = %err, "image export failed"),
        }
        result
    }

    pub async fn list_plans(&self) -> Vec<Plan> {
        let result = async {
            let response = self.http.get(self.url("/api/plans")).send().await?;
            decode::<Vec<Plan>>(response, "Plan listing").await
        }
        .await;

        result.unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to fetch plans");
            Vec::new()
        })
    }

    pub async fn create_payment_intent(
        &self,
        plan: PlanId,
        payment_method: PaymentMethod,
        auth: &AuthHeaders,
    ) -> Result<PaymentIntent, ApiError> {
        let body = PaymentIntentRequest {
            plan,
            payment_method,
        };
        let request = with_auth(self.http.post(self.url("/api/payment/intent")), auth).json(&body);

        let response = request.send().await.map_err(|err| {
            tracing::error!(error = %err, "payment creation failed");
            err
        })?;
        if !response.status().is_success() {
            tracing::error!(status = %response.status(), plan = %plan, "payment intent rejected");
            return Err(ApiError::PaymentIntent);
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn cancel_subscription(&self, auth: &AuthHeaders) -> bool {
        let result = with_auth(self.http.post(self.url("/api/subscription/cancel")), auth)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::error!(error = %err, "subscription cancellation failed");
                false
            }
        }
    }

    pub async fn update_subscription(
        &self,
        plan: PlanId,
        auth: &AuthHeaders,
    ) -> Result<User, ApiError> {
        let response = with_auth(self.http.post(self.url("/api/subscription/update")), auth)
            .json(&PlanChangeRequest { plan })
            .send()
            .await?;
        decode(response, "Subscription update").await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.authenticate("/api/auth/login", credentials).await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.authenticate("/api/auth/register", credentials).await
    }

    async fn authenticate(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<AuthResponse, ApiError> {
        let response = self.http.post(self.url(path)).json(credentials).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                reason_of(status)
            } else {
                text
            };
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn profile(&self, auth: &AuthHeaders) -> Result<User, ApiError> {
        let response = with_auth(self.http.get(self.url("/api/auth/profile")), auth)
            .send()
            .await?;
        decode(response, "Profile").await
    }
}

fn with_auth(builder: RequestBuilder, auth: &AuthHeaders) -> RequestBuilder {
    auth.iter()
        .fold(builder, |builder, (name, value)| {
            builder.header(name.as_str(), value.as_str())
        })
}

fn file_part(file: &FilePayload) -> Result<Part, ApiError> {
    Ok(Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(&file.mime)?)
}

fn reason_of(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}

async fn ensure_success(
    response: Response,
    action: &'static str,
    with_body: bool,
) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = if with_body {
        response.text().await.ok()
    } else {
        None
    };
    Err(ApiError::Status {
        action,
        status: status.as_u16(),
        reason: reason_of(status),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response, action: &'static str) -> Result<T, ApiError> {
    let response = ensure_success(response, action, false).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/api/plans"), "http://localhost:3000/api/plans");
    }
}
