//! Session transitions that need the network.

use api::{ApiClient, ApiError};

use crate::core::state::{AppState, AuthMode, Rejection, StateAccess, ToastKind};
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRefresh {
    /// No token, nothing was asked.
    Anonymous,
    Refreshed,
    /// The server refused the token; the session was cleared.
    SignedOut,
    /// Transport or decode failure; the session is kept as is.
    Unreachable,
}

/// Submit the auth form in its current mode (login or register).
pub async fn authenticate(api: &ApiClient, state: &mut impl StateAccess) -> Result<(), Rejection> {
    let (mode, credentials) = state.mutate(AppState::begin_auth)?;

    let result = match mode {
        AuthMode::Login => api.login(&credentials).await,
        AuthMode::Register => api.register(&credentials).await,
    };

    match result {
        Ok(auth) => {
            let welcome = t!("toast-welcome", email = auth.user.email.clone());
            state.mutate(|s| {
                s.sign_in(auth);
                s.finish_auth();
                s.notify(welcome, ToastKind::Success);
            });
            let backends = api.list_backends().await;
            state.mutate(|s| s.set_backends(backends));
        }
        Err(err) => {
            tracing::warn!(error = %err, ?mode, "authentication failed");
            let message = match err {
                ApiError::Rejected { message, .. } => message,
                _ => match mode {
                    AuthMode::Login => t!("toast-login-failed"),
                    AuthMode::Register => t!("toast-register-failed"),
                },
            };
            state.mutate(|s| {
                s.finish_auth();
                s.notify(message, ToastKind::Error);
            });
        }
    }
    Ok(())
}

/// Re-read the profile. A non-success answer ends the session; a request
/// that never got an answer leaves it alone.
pub async fn refresh_profile(api: &ApiClient, state: &mut impl StateAccess) -> ProfileRefresh {
    let headers = state.query(|s| {
        s.session()
            .is_authenticated()
            .then(|| s.session().auth_headers())
    });
    let Some(headers) = headers else {
        return ProfileRefresh::Anonymous;
    };

    match api.profile(&headers).await {
        Ok(user) => {
            state.mutate(|s| s.apply_profile(user));
            ProfileRefresh::Refreshed
        }
        Err(err @ ApiError::Status { .. }) => {
            tracing::warn!(error = %err, "stored session rejected, signing out");
            state.mutate(AppState::sign_out);
            ProfileRefresh::SignedOut
        }
        Err(err) => {
            tracing::warn!(error = %err, "profile refresh failed, keeping session");
            ProfileRefresh::Unreachable
        }
    }
}

pub fn logout(state: &mut impl StateAccess) {
    state.mutate(|s| {
        s.sign_out();
        s.notify(t!("toast-logged-out"), ToastKind::Success);
    });
}
