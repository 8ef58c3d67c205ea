use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Service-level secret for the identity provider's backend API.
    pub clerk_secret_key: SecretString,
    pub clerk_api_url: Url,
    /// Upper bound for one provider call. Deployment-tunable; a timed-out
    /// call is treated as a transient provider failure.
    pub provider_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let clerk_secret_key = SecretString::new(
            env::var("CLERK_SECRET_KEY")
                .expect("CLERK_SECRET_KEY must be set")
                .into(),
        );

        let clerk_api_url: Url = env::var("CLERK_API_URL")
            .unwrap_or("https://api.clerk.com".to_string())
            .parse()
            .expect("CLERK_API_URL must be a valid URL");

        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or("127.0.0.1:8000".to_string())
            .parse()
            .expect("BIND_ADDR must be a valid socket address");

        let provider_timeout_secs: u64 = env::var("PROVIDER_TIMEOUT_SECS")
            .unwrap_or("10".to_string())
            .parse()
            .expect("PROVIDER_TIMEOUT_SECS must be a valid number");

        Self {
            bind_addr,
            database_url,
            clerk_secret_key,
            clerk_api_url,
            provider_timeout: Duration::from_secs(provider_timeout_secs),
        }
    }
}
