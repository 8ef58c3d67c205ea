use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::auth::{IdentityVerifier, VerifiedAccount},
};

// Account object from Clerk's backend API, reduced to what the verifier needs.
#[derive(Debug, Deserialize)]
struct ClerkUser {
    id: String,
    #[serde(default)]
    banned: bool,
    #[serde(default)]
    locked: bool,
}

/// Account lookup against Clerk's backend API, authenticated with the
/// service-level secret key. Timeouts come from the injected client; a
/// timed-out call surfaces as `ProviderUnavailable` before any store write
/// has happened.
#[derive(Clone)]
pub struct ClerkVerifier {
    client: Client,
    base_url: Url,
    secret_key: SecretString,
}

impl ClerkVerifier {
    pub fn new(client: Client, base_url: Url, secret_key: SecretString) -> Self {
        Self {
            client,
            base_url,
            secret_key,
        }
    }

    fn user_url(&self, subject: &str) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("provider base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["v1", "users", subject]);
        Ok(url)
    }
}

#[async_trait]
impl IdentityVerifier for ClerkVerifier {
    async fn verify(&self, subject: &str) -> AppResult<VerifiedAccount> {
        let url = self.user_url(subject)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(self.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| provider_unavailable(subject, &e))?;

        match response.status() {
            StatusCode::OK => {
                let account: ClerkUser = response
                    .json()
                    .await
                    .map_err(|e| provider_unavailable(subject, &e))?;
                Ok(VerifiedAccount {
                    active: !account.banned && !account.locked,
                    subject: account.id,
                })
            }
            StatusCode::NOT_FOUND => Err(AppError::AccountNotFound(subject.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                // A rejected service secret affects every request, not one
                // user; keep it loud and distinct.
                tracing::error!(
                    status = %response.status(),
                    "identity provider rejected the service credential"
                );
                Err(AppError::ProviderAuthError(format!(
                    "provider responded {}",
                    response.status()
                )))
            }
            status => Err(AppError::ProviderUnavailable {
                subject: subject.to_string(),
                reason: format!("provider responded {status}"),
            }),
        }
    }
}

fn provider_unavailable(subject: &str, err: &reqwest::Error) -> AppError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    AppError::ProviderUnavailable {
        subject: subject.to_string(),
        reason,
    }
}
