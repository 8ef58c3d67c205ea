use std::fs::File;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        http::app_state::AppState, identity::clerk::ClerkVerifier,
        persistence::PostgresPersistence,
    },
    infra::{config::AppConfig, db::init_db, http_client::build_client},
    token::TokenDecoder,
    use_cases::{
        auth::{AuthPipeline, IdentityVerifier, UserRepo},
        user::ProfileUseCases,
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let pool = init_db(&config.database_url).await?;
    let persistence = Arc::new(PostgresPersistence::new(pool));

    let verifier = Arc::new(ClerkVerifier::new(
        build_client(config.provider_timeout)?,
        config.clerk_api_url.clone(),
        SecretString::new(config.clerk_secret_key.expose_secret().into()),
    )) as Arc<dyn IdentityVerifier>;

    let users = persistence as Arc<dyn UserRepo>;
    let auth = AuthPipeline::new(TokenDecoder::new(), verifier, users.clone());
    let profiles = ProfileUseCases::new(users.clone());

    Ok(AppState {
        config: Arc::new(config),
        auth: Arc::new(auth),
        profiles: Arc::new(profiles),
        users,
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "idgate=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
