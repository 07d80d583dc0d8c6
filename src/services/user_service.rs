//! Registration, authentication and email verification.

use std::sync::Arc;

use jiff_diesel::ToDiesel;
use uuid::Uuid;

use crate::config::{JwtConfig, MailConfig};
use crate::db::TxContext;
use crate::error::{AppError, AppResult};
use crate::models::{NewSession, NewUser, User};
use crate::repositories::{SessionRepository, UserRepository, VerificationRepository};
use crate::services::mail::{MailMessage, Mailer};
use crate::utils::jwt::{self, TokenPair};
use crate::utils::password::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "invalid login or password";

/// Account data accepted at registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub login: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    sessions: SessionRepository,
    verification: VerificationRepository,
    mailer: Arc<dyn Mailer>,
    jwt: JwtConfig,
    verification_url: String,
}

impl UserService {
    pub fn new(
        users: UserRepository,
        sessions: SessionRepository,
        verification: VerificationRepository,
        mailer: Arc<dyn Mailer>,
        jwt: JwtConfig,
        mail: &MailConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            verification,
            mailer,
            jwt,
            verification_url: mail.verification_url.clone(),
        }
    }

    /// Creates an account and mails a verification link.
    ///
    /// The mail goes out after the user row is stored. A delivery failure is
    /// logged; the account stays and can be verified once a link arrives.
    pub async fn register(&self, ctx: &TxContext, registration: Registration) -> AppResult<i32> {
        let password_hash = hash_password(&registration.password)?;
        let user = self
            .users
            .create(
                ctx,
                NewUser {
                    login: registration.login,
                    email: registration.email,
                    password_hash,
                },
            )
            .await?;

        let token = Uuid::new_v4().to_string();
        self.verification.store(&token, user.id).await?;

        let link = format!("{}/{}", self.verification_url.trim_end_matches('/'), token);
        if let Err(err) = self
            .mailer
            .send(&MailMessage::verification(&user.email, &link))
            .await
        {
            tracing::error!(user_id = user.id, error = %err, "Failed to send verification mail");
        }

        tracing::info!(user_id = user.id, login = %user.login, "User registered");
        Ok(user.id)
    }

    /// Checks credentials and opens a session backed by the refresh token.
    pub async fn login(&self, ctx: &TxContext, login: &str, password: &str) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_by_login(ctx, login)
            .await?
            .ok_or_else(|| AppError::not_authenticated(INVALID_CREDENTIALS))?;

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Err(AppError::not_authenticated(INVALID_CREDENTIALS));
        }

        let pair = self.open_session(ctx, user.id).await?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok(pair)
    }

    /// Exchanges a live refresh token for a new pair, revoking the old one.
    pub async fn refresh(&self, ctx: &TxContext, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = jwt::validate_refresh_token(refresh_token, &self.jwt.secret)?;
        let user_id = claims.user_id()?;

        self.sessions
            .run_in_transaction(ctx, |tx| async move {
                let session = self
                    .sessions
                    .find_valid(&tx, refresh_token)
                    .await?
                    .filter(|session| session.user_id == user_id)
                    .ok_or_else(|| AppError::not_authenticated("Session expired or revoked"))?;

                self.sessions.delete_by_token(&tx, &session.refresh_token).await?;
                self.open_session(&tx, user_id).await
            })
            .await
    }

    /// Revokes the session behind `refresh_token`. Unknown tokens are ignored.
    pub async fn logout(&self, ctx: &TxContext, refresh_token: &str) -> AppResult<()> {
        let removed = self.sessions.delete_by_token(ctx, refresh_token).await?;
        tracing::debug!(removed, "Session revoked");
        Ok(())
    }

    /// Marks the token's user as completed and consumes the token.
    pub async fn verify_email(&self, ctx: &TxContext, token: &str) -> AppResult<()> {
        let user_id = self
            .verification
            .find(token)
            .await?
            .ok_or_else(|| AppError::invalid_input("invalid or expired verification token"))?;

        if self.users.set_completed(ctx, user_id).await? == 0 {
            return Err(AppError::id_not_found("user", user_id));
        }
        self.verification.remove(token).await?;

        tracing::info!(user_id, "Email verified");
        Ok(())
    }

    pub async fn get_user(&self, ctx: &TxContext, id: i32) -> AppResult<User> {
        self.users
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| AppError::id_not_found("user", id))
    }

    /// Resolves the user id carried by an access token.
    pub fn authenticate(&self, access_token: &str) -> AppResult<i32> {
        jwt::validate_access_token(access_token, &self.jwt.secret)?.user_id()
    }

    async fn open_session(&self, ctx: &TxContext, user_id: i32) -> AppResult<TokenPair> {
        let pair = jwt::generate_token_pair(user_id, &self.jwt)?;
        self.sessions
            .create(
                ctx,
                NewSession {
                    user_id,
                    refresh_token: pair.refresh_token.clone(),
                    expires_at: pair.refresh_expires_at.to_diesel(),
                },
            )
            .await?;
        Ok(pair)
    }
}
