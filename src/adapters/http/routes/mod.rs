pub mod health;
pub mod user;

use axum::{Router, middleware};

use crate::adapters::http::{app_state::AppState, middleware::require_auth};

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new().merge(health::router()).nest(
        "/users",
        user::router().route_layer(middleware::from_fn_with_state(app_state, require_auth)),
    )
}
