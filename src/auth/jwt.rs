use crate::types::{AppError, Claims, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

/// Authentication service for JWT session tokens and password hashing.
///
/// Tokens are HS256-signed and carry the numeric user id as `sub`. Passwords
/// are hashed with Argon2id. The signing secret and token lifetime are
/// injected here rather than read from ambient state, so every test can run
/// with its own configuration.
pub struct AuthService {
    jwt_secret: String,
    token_ttl: i64,
}

impl AuthService {
    /// Creates a new AuthService.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing JWTs (should be at least 32 chars)
    /// * `token_ttl` - Session token validity in seconds
    pub fn new(jwt_secret: String, token_ttl: i64) -> Self {
        Self {
            jwt_secret,
            token_ttl,
        }
    }

    /// Hashes a password using Argon2id.
    ///
    /// Returns a PHC-formatted hash string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Verifies a password against an Argon2 hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Issues a session token for a user.
    pub fn encode_token(&self, user_id: i64) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.token_ttl,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a session token's signature and expiry and returns its claims.
    ///
    /// Revocation is deliberately not checked here: the gate consults the
    /// revoked-token ledger only after this call succeeds, so the ledger is
    /// never probed with a token that fails signature or expiry checks.
    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::ExpiredToken,
            _ => AppError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> AuthService {
        AuthService::new(
            "test-secret-key-that-is-at-least-32-chars".to_string(),
            3600,
        )
    }

    #[test]
    fn test_password_hashing() {
        let service = create_test_service();
        let password = "test_password_123";

        let hash = service
            .hash_password(password)
            .expect("should hash password");

        // Hash should not equal the original password
        assert_ne!(hash, password);

        // Hash should be in PHC format (starts with $argon2)
        assert!(hash.starts_with("$argon2"), "hash should be in PHC format");
    }

    #[test]
    fn test_password_verification_success() {
        let service = create_test_service();
        let password = "secure_password_456";

        let hash = service
            .hash_password(password)
            .expect("should hash password");
        let is_valid = service
            .verify_password(password, &hash)
            .expect("should verify");

        assert!(is_valid, "correct password should verify successfully");
    }

    #[test]
    fn test_password_verification_failure() {
        let service = create_test_service();
        let password = "correct_password";
        let wrong_password = "wrong_password";

        let hash = service
            .hash_password(password)
            .expect("should hash password");
        let is_valid = service
            .verify_password(wrong_password, &hash)
            .expect("should verify");

        assert!(!is_valid, "wrong password should fail verification");
    }

    #[test]
    fn test_token_round_trip() {
        let service = create_test_service();

        let token = service.encode_token(42).expect("should encode token");
        let claims = service.decode_token(&token).expect("should decode token");

        assert_eq!(claims.sub, 42, "subject should match user id");
    }

    #[test]
    fn test_token_expiry_claims() {
        let service = create_test_service();
        let token = service.encode_token(7).expect("should encode");
        let claims = service.decode_token(&token).expect("should decode");

        let now = Utc::now().timestamp();
        assert!(
            claims.iat <= now && claims.iat >= now - 5,
            "iat should be current timestamp"
        );
        assert_eq!(claims.exp, claims.iat + 3600, "exp should be iat + ttl");
    }

    #[test]
    fn test_expired_token_rejected() {
        // A negative ttl puts exp in the past at issuance
        let service =
            AuthService::new("test-secret-key-that-is-at-least-32-chars".to_string(), -10);

        let token = service.encode_token(1).expect("should encode");
        let err = service.decode_token(&token).unwrap_err();

        assert!(
            matches!(err, AppError::ExpiredToken),
            "expired token should map to ExpiredToken, got {:?}",
            err
        );
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = create_test_service();

        let err = service.decode_token("invalid.token.here").unwrap_err();

        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = create_test_service();
        let token = service.encode_token(9).expect("should encode");

        // Flip one byte of the payload segment
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).expect("still utf8");

        let err = service.decode_token(&tampered).unwrap_err();
        assert!(
            matches!(err, AppError::InvalidToken),
            "tampered token should map to InvalidToken, got {:?}",
            err
        );
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let service1 = AuthService::new("secret-one-that-is-32-chars-long".to_string(), 3600);
        let service2 = AuthService::new("secret-two-that-is-32-chars-long".to_string(), 3600);

        let token = service1.encode_token(5).expect("should encode");
        let err = service2.decode_token(&token).unwrap_err();

        assert!(matches!(err, AppError::InvalidToken));
    }
}
