use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::session::SessionUser;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // user_id
    pub role: String,
    pub sid: String,  // session_id
    pub exp: i64,
    pub iat: i64,
}

pub struct AuthService {
    config: Config,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn generate_access_token(&self, user: &SessionUser, session_id: uuid::Uuid) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.jwt_access_expiry);

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.as_str().to_string(),
            sid: session_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(AppError::from)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
    }

    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("stored hash is invalid: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use uuid::Uuid;

    fn user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            name: "Imobiliária ABC".to_string(),
            email: "locador@example.com".to_string(),
            role: UserRole::Landlord,
            profile_image: None,
        }
    }

    #[test]
    fn test_token_carries_role_and_session() {
        let service = AuthService::new(Config::with_secret("test-secret"));
        let user = user();
        let sid = Uuid::new_v4();

        let token = service.generate_access_token(&user, sid).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, "landlord");
        assert_eq!(claims.sid, sid.to_string());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = AuthService::new(Config::with_secret("secret-a"));
        let verifier = AuthService::new(Config::with_secret("secret-b"));

        let token = issuer.generate_access_token(&user(), Uuid::new_v4()).unwrap();
        assert!(matches!(verifier.verify_token(&token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = AuthService::hash_password("123456").unwrap();
        assert!(AuthService::verify_password("123456", &hash).unwrap());
        assert!(!AuthService::verify_password("654321", &hash).unwrap());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Locatario@Example.com "), "locatario@example.com");
    }
}
