use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::{
    config::{AdminSecret, AppConfig},
    dto::auth::{AdminLoginRequest, AdminLoginResponse, Claims},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
};

/// Shared-password gate: a correct password yields a bearer token with a
/// fixed time-to-live. There is no refresh and no revocation; the token
/// simply expires.
pub fn login(
    config: &AppConfig,
    payload: AdminLoginRequest,
) -> AppResult<ApiResponse<AdminLoginResponse>> {
    if !password_matches(&config.admin_secret, &payload.password)? {
        return Err(AppError::BadRequest("Invalid password".into()));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.admin_session_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: "admin".to_string(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok(ApiResponse::success(
        "Logged in",
        AdminLoginResponse {
            token: format!("Bearer {token}"),
        },
        Some(Meta::empty()),
    ))
}

pub fn password_matches(secret: &AdminSecret, input: &str) -> AppResult<bool> {
    match secret {
        AdminSecret::Plain(expected) => Ok(expected == input),
        AdminSecret::Argon2Hash(hash) => {
            let parsed = PasswordHash::new(hash)
                .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid ADMIN_PASSWORD_HASH")))?;
            Ok(Argon2::default()
                .verify_password(input.as_bytes(), &parsed)
                .is_ok())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHasher, password_hash::SaltString};
    use password_hash::rand_core::OsRng;

    #[test]
    fn plain_secret_compares_exactly() {
        let secret = AdminSecret::Plain("hunter2".into());
        assert!(password_matches(&secret, "hunter2").unwrap());
        assert!(!password_matches(&secret, "hunter").unwrap());
        assert!(!password_matches(&secret, "HUNTER2").unwrap());
    }

    #[test]
    fn hashed_secret_verifies_with_argon2() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"hunter2", &salt)
            .expect("hash")
            .to_string();

        let secret = AdminSecret::Argon2Hash(hash);
        assert!(password_matches(&secret, "hunter2").unwrap());
        assert!(!password_matches(&secret, "wrong").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let secret = AdminSecret::Argon2Hash("not-a-phc-string".into());
        assert!(password_matches(&secret, "anything").is_err());
    }
}
