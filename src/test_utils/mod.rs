//! In-memory implementations of the application ports, for pipeline and
//! HTTP-level tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use url::Url;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    infra::config::AppConfig,
    token::TokenDecoder,
    use_cases::{
        auth::{AuthPipeline, IdentityVerifier, User, UserRepo, VerifiedAccount},
        user::ProfileUseCases,
    },
};

/// What a [`StaticVerifier`] answers for every lookup.
#[derive(Debug, Clone, Copy)]
pub enum VerifierResponse {
    Active,
    Inactive,
    NotFound,
    Unavailable,
    AuthError,
}

pub struct StaticVerifier {
    response: VerifierResponse,
    pub calls: AtomicUsize,
}

impl StaticVerifier {
    pub fn new(response: VerifierResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, subject: &str) -> AppResult<VerifiedAccount> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.response {
            VerifierResponse::Active => Ok(VerifiedAccount {
                subject: subject.to_string(),
                active: true,
            }),
            VerifierResponse::Inactive => Ok(VerifiedAccount {
                subject: subject.to_string(),
                active: false,
            }),
            VerifierResponse::NotFound => Err(AppError::AccountNotFound(subject.to_string())),
            VerifierResponse::Unavailable => Err(AppError::ProviderUnavailable {
                subject: subject.to_string(),
                reason: "connection refused".into(),
            }),
            VerifierResponse::AuthError => {
                Err(AppError::ProviderAuthError("invalid service credential".into()))
            }
        }
    }
}

/// In-memory [`UserRepo`] honoring the one-row-per-subject contract.
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<String, User>>,
    pub store_calls: AtomicUsize,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn get_or_create(&self, external_id: &str) -> AppResult<User> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.get(external_id) {
            return Ok(existing.clone());
        }
        let now = Utc::now().naive_utc();
        let user = User {
            id: Uuid::new_v4(),
            external_id: external_id.to_string(),
            telegram_handle: None,
            reminder_days: 0,
            created_at: now,
            updated_at: now,
        };
        users.insert(external_id.to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(external_id).cloned())
    }

    async fn update_profile(
        &self,
        external_id: &str,
        telegram_handle: Option<&str>,
        reminder_days: Option<i32>,
    ) -> AppResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(external_id) else {
            return Ok(None);
        };
        if let Some(handle) = telegram_handle {
            user.telegram_handle = Some(handle.to_string());
        }
        if let Some(days) = reminder_days {
            user.reminder_days = days;
        }
        user.updated_at = Utc::now().naive_utc();
        Ok(Some(user.clone()))
    }

    async fn delete_by_external_id(&self, external_id: &str) -> AppResult<bool> {
        Ok(self.users.lock().unwrap().remove(external_id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://localhost/unused".into(),
        clerk_secret_key: SecretString::new("sk_test_unused".into()),
        clerk_api_url: Url::parse("https://api.clerk.test").unwrap(),
        provider_timeout: Duration::from_secs(5),
    }
}

/// Minimal `AppState` over in-memory ports.
pub fn test_app_state(verifier: Arc<StaticVerifier>, repo: Arc<InMemoryUserRepo>) -> AppState {
    let users = repo as Arc<dyn UserRepo>;
    let auth = AuthPipeline::new(TokenDecoder::new(), verifier, users.clone());
    let profiles = ProfileUseCases::new(users.clone());
    AppState {
        config: Arc::new(test_config()),
        auth: Arc::new(auth),
        profiles: Arc::new(profiles),
        users,
    }
}
