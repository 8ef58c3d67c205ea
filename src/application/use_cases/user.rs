use std::sync::Arc;

use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::auth::{User, UserRepo},
};

const REMINDER_DAYS_MAX: i32 = 30;

/// Profile operations for an already-authenticated subject. The pipeline
/// reconciles the row; these only touch the mutable attributes.
#[derive(Clone)]
pub struct ProfileUseCases {
    repo: Arc<dyn UserRepo>,
}

impl ProfileUseCases {
    pub fn new(repo: Arc<dyn UserRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        external_id: &str,
        telegram_handle: Option<&str>,
        reminder_days: Option<i32>,
    ) -> AppResult<User> {
        let telegram_handle = telegram_handle.map(normalize_telegram_handle).transpose()?;
        if let Some(days) = reminder_days
            && !(0..=REMINDER_DAYS_MAX).contains(&days)
        {
            return Err(AppError::InvalidInput(format!(
                "reminder_days must be between 0 and {REMINDER_DAYS_MAX}"
            )));
        }

        self.repo
            .update_profile(external_id, telegram_handle.as_deref(), reminder_days)
            .await?
            .ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_account(&self, external_id: &str) -> AppResult<()> {
        // Removes the local row only; the provider account is untouched.
        if self.repo.delete_by_external_id(external_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}

// Handles look like "@username": 5 to 32 word characters after the at sign.
fn normalize_telegram_handle(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    let name = trimmed
        .strip_prefix('@')
        .ok_or_else(|| AppError::InvalidInput("telegram handle must start with '@'".into()))?;
    let valid = (5..=32).contains(&name.len())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(AppError::InvalidInput(
            "telegram handle must be 5-32 word characters after '@'".into(),
        ));
    }
    Ok(trimmed.to_string())
}
