use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    adapters::persistence::{PostgresPersistence, is_unique_violation},
    app_error::{AppError, AppResult},
    use_cases::auth::{User, UserRepo},
};

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn get_or_create(&self, external_id: &str) -> AppResult<User> {
        // Lookup and first insert run in one transaction; the conflict path
        // below is a second, independent read.
        let mut tx = self.pool().begin().await.map_err(AppError::from)?;

        if let Some(user) = sqlx::query_as::<_, User>(
            r#"SELECT id, external_id, telegram_handle, reminder_days, created_at, updated_at
               FROM users WHERE external_id = $1"#,
        )
        .bind(external_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from)?
        {
            tx.commit().await.map_err(AppError::from)?;
            return Ok(user);
        }

        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();
        let inserted = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, external_id, created_at, updated_at)
               VALUES ($1, $2, $3, $3)
               RETURNING id, external_id, telegram_handle, reminder_days, created_at, updated_at"#,
        )
        .bind(id)
        .bind(external_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(user) => {
                tx.commit().await.map_err(AppError::from)?;
                Ok(user)
            }
            Err(err) if is_unique_violation(&err) => {
                // A concurrent first login inserted the row between our
                // lookup and our insert; read the winner's row instead.
                tx.rollback().await.ok();
                self.find_by_external_id(external_id).await?.ok_or_else(|| {
                    AppError::StoreUnavailable(format!(
                        "user row for {external_id} vanished after insert conflict"
                    ))
                })
            }
            Err(err) => {
                tx.rollback().await.ok();
                Err(AppError::from(err))
            }
        }
    }

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, external_id, telegram_handle, reminder_days, created_at, updated_at
               FROM users WHERE external_id = $1"#,
        )
        .bind(external_id)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(user)
    }

    async fn update_profile(
        &self,
        external_id: &str,
        telegram_handle: Option<&str>,
        reminder_days: Option<i32>,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET telegram_handle = COALESCE($2, telegram_handle),
                   reminder_days = COALESCE($3, reminder_days),
                   updated_at = $4
               WHERE external_id = $1
               RETURNING id, external_id, telegram_handle, reminder_days, created_at, updated_at"#,
        )
        .bind(external_id)
        .bind(telegram_handle)
        .bind(reminder_days)
        .bind(Utc::now().naive_utc())
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(user)
    }

    async fn delete_by_external_id(&self, external_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE external_id = $1")
            .bind(external_id)
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
