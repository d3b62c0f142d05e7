//! Authentication service
//!
//! In-process stand-in for the hosted authentication backend:
//! email/password credential records, and a login-state stream exposing
//! the current account. Components that need identity take an explicit
//! [`Session`] value instead of reading the stream ambiently.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
};

/// The currently signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
}

/// Stored credential record.
#[derive(Debug, Clone)]
struct Credential {
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AuthService {
    inner: Arc<Inner>,
}

struct Inner {
    config: AuthConfig,
    accounts: DashMap<String, Credential>,
    session: watch::Sender<Option<Session>>,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                config,
                accounts: DashMap::new(),
                session,
            }),
        }
    }

    /// Create a credential record for a new account. Does not change
    /// the login state.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<()> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::Validation("email must not be empty".to_string()));
        }
        if password.len() < self.inner.config.password_min_length {
            return Err(AppError::Validation(format!(
                "password must be at least {} characters",
                self.inner.config.password_min_length
            )));
        }
        if self.inner.accounts.contains_key(&email) {
            return Err(AppError::Conflict(format!(
                "account {} already exists",
                email
            )));
        }

        let password_hash = hash_password(password)?;
        self.inner.accounts.insert(
            email.clone(),
            Credential {
                password_hash,
                created_at: Utc::now(),
            },
        );
        tracing::info!(%email, "account registered");
        Ok(())
    }

    /// Authenticate and publish the new login state.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let email = normalize_email(email);
        let credential = self
            .inner
            .accounts
            .get(&email)
            .map(|c| c.value().clone())
            .ok_or_else(|| AppError::Authentication("invalid email or password".to_string()))?;

        if !verify_password(&credential.password_hash, password)? {
            return Err(AppError::Authentication(
                "invalid email or password".to_string(),
            ));
        }

        let session = Session { email };
        self.inner.session.send_replace(Some(session.clone()));
        tracing::info!(email = %session.email, "signed in");
        Ok(session)
    }

    /// Clear the login state.
    pub async fn sign_out(&self) {
        if let Some(session) = self.inner.session.send_replace(None) {
            tracing::info!(email = %session.email, "signed out");
        }
    }

    /// Current login state, if any.
    pub fn current(&self) -> Option<Session> {
        self.inner.session.borrow().clone()
    }

    /// Subscribe to login-state changes.
    pub fn watch(&self) -> watch::Receiver<Option<Session>> {
        self.inner.session.subscribe()
    }

    /// When the account was registered, if it exists.
    pub fn registered_at(&self, email: &str) -> Option<DateTime<Utc>> {
        self.inner
            .accounts
            .get(&normalize_email(email))
            .map(|c| c.created_at)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("stored hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
