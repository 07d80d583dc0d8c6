//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::services::Registration;
use crate::utils::jwt::TokenPair;

/// Register request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Login (unique)
    #[validate(length(min = 3, max = 30, message = "Login must be between 3 and 30 characters"))]
    #[schema(example = "john_doe", min_length = 3, max_length = 30)]
    pub login: String,
    /// Email address (unique), receives the verification link
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters"))]
    #[schema(example = "password123", format = "password", min_length = 6, max_length = 64)]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            login: req.login,
            email: req.email,
            password: req.password,
        }
    }
}

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 30, message = "Login must be between 3 and 30 characters"))]
    #[schema(example = "john_doe")]
    pub login: String,
    #[validate(length(min = 6, max = 64, message = "Password must be between 6 and 64 characters"))]
    #[schema(example = "password123", format = "password")]
    pub password: String,
}

/// Refresh or logout payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// Issued token pair
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
        }
    }
}
