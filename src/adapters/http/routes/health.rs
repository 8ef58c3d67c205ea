use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{adapters::http::app_state::AppState, app_error::AppResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/db-test/ping", get(db_ping))
}

async fn root() -> impl IntoResponse {
    Json(json!({"message": "idgate identity synchronization service"}))
}

// Liveness only; touches no dependencies.
async fn health() -> impl IntoResponse {
    Json(json!({"status": "healthy"}))
}

async fn db_ping(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    app_state.users.ping().await?;
    Ok(Json(json!({"status": "connected"})))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, http::StatusCode};
    use axum_test::TestServer;

    use crate::adapters::http::routes;
    use crate::test_utils::{InMemoryUserRepo, StaticVerifier, VerifierResponse, test_app_state};

    fn server() -> TestServer {
        let app_state = test_app_state(
            Arc::new(StaticVerifier::new(VerifierResponse::Active)),
            Arc::new(InMemoryUserRepo::new()),
        );
        let router: Router = routes::router(app_state.clone()).with_state(app_state);
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_credentials() {
        let response = server().get("/health").await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn root_returns_the_banner() {
        server().get("/").await.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn db_ping_reports_connectivity() {
        let response = server().get("/db-test/ping").await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>()["status"], "connected");
    }
}
