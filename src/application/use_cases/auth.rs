use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    token::TokenDecoder,
};

// User row as synchronized from the identity provider.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub telegram_handle: Option<String>,
    pub reminder_days: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Provider's answer for one subject lookup. Ephemeral; discarded once the
/// local row is reconciled.
#[derive(Debug, Clone)]
pub struct VerifiedAccount {
    pub subject: String,
    pub active: bool,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// One account lookup against the identity provider. No retries at this
    /// layer; the error kind tells the caller whether a retry could help.
    async fn verify(&self, subject: &str) -> AppResult<VerifiedAccount>;
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Returns the row for `external_id`, creating it on first sight.
    /// Must be race-safe under concurrent first logins for the same subject:
    /// all callers get the same row, exactly one row is ever persisted.
    async fn get_or_create(&self, external_id: &str) -> AppResult<User>;

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>>;

    /// Applies the provided fields, leaves absent ones unchanged. Returns
    /// `None` when no row exists for `external_id`.
    async fn update_profile(
        &self,
        external_id: &str,
        telegram_handle: Option<&str>,
        reminder_days: Option<i32>,
    ) -> AppResult<Option<User>>;

    async fn delete_by_external_id(&self, external_id: &str) -> AppResult<bool>;

    /// Connectivity probe for the operational ping route.
    async fn ping(&self) -> AppResult<()>;
}

/// Per-request authentication pipeline: bearer extraction → unverified
/// subject decode → provider confirmation → get-or-create reconciliation.
///
/// Holds no state across calls; arbitrarily many requests may run it
/// concurrently. Verification strictly precedes reconciliation, so a
/// provider failure never leaves a partial store write behind.
#[derive(Clone)]
pub struct AuthPipeline {
    decoder: TokenDecoder,
    verifier: Arc<dyn IdentityVerifier>,
    users: Arc<dyn UserRepo>,
}

impl AuthPipeline {
    pub fn new(
        decoder: TokenDecoder,
        verifier: Arc<dyn IdentityVerifier>,
        users: Arc<dyn UserRepo>,
    ) -> Self {
        Self {
            decoder,
            verifier,
            users,
        }
    }

    #[instrument(skip_all)]
    pub async fn authenticate(&self, authorization: Option<&str>) -> AppResult<User> {
        let credential = bearer_credential(authorization)?;
        let subject = self.decoder.decode(credential)?;
        tracing::debug!(%subject, "credential decoded");

        let account = self.verifier.verify(&subject).await?;
        if !account.active {
            return Err(AppError::AccountNotFound(subject));
        }

        self.users.get_or_create(&subject).await
    }
}

fn bearer_credential(authorization: Option<&str>) -> AppResult<&str> {
    let credential = authorization
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::MissingCredential)?;
    if credential.is_empty() {
        return Err(AppError::MissingCredential);
    }
    Ok(credential)
}
