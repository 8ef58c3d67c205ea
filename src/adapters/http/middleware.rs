use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{adapters::http::app_state::AppState, app_error::AppError, use_cases::auth::User};

/// Reconciled user for the current request, injected by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Runs the authentication pipeline on the `Authorization` header and makes
/// the reconciled user available to downstream handlers. Applied to the
/// protected route subtree only; failures short-circuit into the error
/// mapping before any handler runs.
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user = app_state.auth.authenticate(authorization).await?;
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
