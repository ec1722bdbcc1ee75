//! Session state machine (anonymous / authenticated) with durable backing.
//!
//! The manager is synchronous: network calls live in `crate::actions::auth`
//! and feed their results in through [`SessionManager::set_auth`],
//! [`SessionManager::refresh_user`] and [`SessionManager::logout`].

use api::{AuthHeaders, PlanId, User};

use super::catalog;
use super::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "auth_token";
pub const PROFILE_KEY: &str = "user_profile";

pub struct SessionManager {
    token: Option<String>,
    user: Option<User>,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.token.is_some())
            .field("user", &self.user)
            .finish()
    }
}

impl SessionManager {
    /// Rebuild the session from durable storage. Nothing is verified against
    /// the server until the first profile refresh.
    pub fn restore(store: Box<dyn KeyValueStore>) -> Self {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = store
            .get(PROFILE_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable stored profile");
                    None
                }
            });
        tracing::debug!(authenticated = token.is_some(), "session restored");
        Self { token, user, store }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Plan used for backend eligibility; anonymous visitors are on free.
    pub fn current_plan(&self) -> PlanId {
        self.user
            .as_ref()
            .map(|u| u.subscription_plan)
            .unwrap_or(PlanId::Free)
    }

    pub fn auth_headers(&self) -> AuthHeaders {
        let mut headers = AuthHeaders::new();
        if let Some(token) = &self.token {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        headers
    }

    /// Anonymous → Authenticated after a successful login or registration.
    pub fn set_auth(&mut self, token: String, user: User) {
        if let Err(err) = self.store.set(TOKEN_KEY, &token) {
            tracing::error!(error = %err, "failed to persist session token");
        }
        self.token = Some(token);
        self.persist_user(&user);
        self.user = Some(user);
    }

    /// Authenticated → Authenticated with a fresh profile.
    pub fn refresh_user(&mut self, user: User) {
        if !self.is_authenticated() {
            tracing::debug!("ignoring profile for anonymous session");
            return;
        }
        self.persist_user(&user);
        self.user = Some(user);
    }

    /// Move the in-memory profile to `plan` without consulting the server.
    /// The durable copy is left untouched so the next profile refresh wins.
    pub fn assume_plan(&mut self, plan: PlanId) -> Option<&User> {
        let user = self.user.as_mut()?;
        user.subscription_plan = plan;
        user.translations_remaining = catalog::daily_quota(plan) - user.translations_used_today;
        Some(user)
    }

    /// Back to anonymous; both durable keys are removed unconditionally.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        for key in [TOKEN_KEY, PROFILE_KEY] {
            if let Err(err) = self.store.remove(key) {
                tracing::error!(error = %err, key, "failed to clear session key");
            }
        }
    }

    fn persist_user(&mut self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                if let Err(err) = self.store.set(PROFILE_KEY, &raw) {
                    tracing::error!(error = %err, "failed to persist profile");
                }
            }
            Err(err) => tracing::error!(error = %err, "failed to serialise profile"),
        }
    }
}
