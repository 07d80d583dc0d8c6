use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived API token
    Access,
    /// Long-lived token exchanged for a new pair; backed by a session row
    Refresh,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub token_type: TokenType,
    /// Unique token id, keeps two refresh tokens issued in the same second distinct
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, token_type: TokenType, expiration_hours: i64) -> AppResult<Self> {
        let now = Timestamp::now();
        let exp = expires_after(now, expiration_hours)?;

        Ok(Self {
            sub: user_id.to_string(),
            token_type,
            jti: Uuid::new_v4().to_string(),
            iat: now.as_second(),
            exp: exp.as_second(),
        })
    }

    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub
            .parse()
            .map_err(|_| AppError::not_authenticated("Invalid token subject"))
    }
}

/// Issued access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// When the refresh token stops being accepted
    pub refresh_expires_at: Timestamp,
}

/// `now` shifted by `hours`, failing on timestamp overflow.
pub fn expires_after(now: Timestamp, hours: i64) -> AppResult<Timestamp> {
    now.checked_add(SignedDuration::from_hours(hours))
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to compute token expiry: {}", e),
        })
}

pub fn generate_token(
    user_id: i32,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, token_type, expiration_hours)?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates an access and a refresh token for `user_id`.
pub fn generate_token_pair(user_id: i32, config: &JwtConfig) -> AppResult<TokenPair> {
    let access_token = generate_token(
        user_id,
        TokenType::Access,
        &config.secret,
        config.access_token_expiration,
    )?;
    let refresh_token = generate_token(
        user_id,
        TokenType::Refresh,
        &config.secret,
        config.refresh_token_expiration,
    )?;
    let refresh_expires_at = expires_after(Timestamp::now(), config.refresh_token_expiration)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        refresh_expires_at,
    })
}

/// Validates and decodes a JWT, optionally checking its type.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::not_authenticated("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::not_authenticated("Invalid token signature")
        }
        _ => AppError::not_authenticated("Invalid token"),
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::not_authenticated(format!(
            "Invalid token type: expected {:?}, got {:?}",
            expected, claims.token_type
        )));
    }

    Ok(claims)
}

pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing_0123";

    fn config() -> JwtConfig {
        JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiration: 1,
            refresh_token_expiration: 168,
        }
    }

    fn message_of(err: AppError) -> String {
        match err {
            AppError::NotAuthenticated { message } => message,
            other => panic!("Expected NotAuthenticated, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_token_pair() {
        let pair = generate_token_pair(1, &config()).unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);
        assert!(pair.refresh_expires_at > Timestamp::now());
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let a = generate_token(1, TokenType::Refresh, TEST_SECRET, 1).unwrap();
        let b = generate_token(1, TokenType::Refresh, TEST_SECRET, 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_validate_access_token() {
        let pair = generate_token_pair(42, &config()).unwrap();
        let claims = validate_access_token(&pair.access_token, TEST_SECRET).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_wrong_token_type() {
        let pair = generate_token_pair(1, &config()).unwrap();
        let err = validate_refresh_token(&pair.access_token, TEST_SECRET).unwrap_err();
        assert!(message_of(err).contains("Invalid token type"));
    }

    #[test]
    fn test_validate_token_invalid_secret() {
        let token = generate_token(1, TokenType::Access, TEST_SECRET, 1).unwrap();
        let err = validate_token(&token, "another_secret_that_is_long_enough", None).unwrap_err();
        assert!(message_of(err).contains("signature"));
    }

    #[test]
    fn test_validate_token_garbage() {
        let err = validate_token("invalid.token.format", TEST_SECRET, None).unwrap_err();
        assert_eq!(message_of(err), "Invalid token");
    }

    #[test]
    fn test_expired_token() {
        let token = generate_token(1, TokenType::Access, TEST_SECRET, -1).unwrap();
        let err = validate_token(&token, TEST_SECRET, None).unwrap_err();
        assert!(message_of(err).contains("expired"));
    }

    #[test]
    fn test_token_type_serialization() {
        let claims = Claims::new(1, TokenType::Refresh, 1).unwrap();
        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"token_type\":\"refresh\""));
    }
}
