use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use crate::{
    adapters::http::{app_state::AppState, middleware::CurrentUser},
    app_error::AppResult,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfilePayload {
    telegram_handle: Option<String>,
    reminder_days: Option<i32>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me).patch(update_me).delete(delete_me))
}

// The auth middleware already reconciled the row; just hand it back.
async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> AppResult<impl IntoResponse> {
    Ok(Json(user))
}

async fn update_me(
    State(app_state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfilePayload>,
) -> AppResult<impl IntoResponse> {
    let updated = app_state
        .profiles
        .update_profile(
            &user.external_id,
            payload.telegram_handle.as_deref(),
            payload.reminder_days,
        )
        .await?;
    Ok(Json(updated))
}

async fn delete_me(
    State(app_state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    app_state.profiles.delete_account(&user.external_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
