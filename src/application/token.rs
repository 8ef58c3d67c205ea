use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::app_error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Extracts the subject claim from a compact JWT without checking signature,
/// expiry, or issuer. The decoded subject is only a lookup key; trust is
/// established by the provider lookup that follows.
#[derive(Debug, Clone, Default)]
pub struct TokenDecoder;

impl TokenDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, credential: &str) -> AppResult<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        // Tokens are not required to carry exp here; the provider decides
        // whether the account is still live.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(
            credential,
            &DecodingKey::from_secret(b"ignored"), // Key is ignored when validation is disabled
            &validation,
        )
        .map_err(|e| AppError::MalformedCredential(e.to_string()))?;

        if token_data.claims.sub.is_empty() {
            return Err(AppError::MalformedCredential(
                "empty subject claim".to_string(),
            ));
        }

        Ok(token_data.claims.sub)
    }
}
