//! Authentication service: login by email or employee code, bearer tokens,
//! password changes and admin-side account registration.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Account, AccountResponse, Password, Role, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

use crate::config::Config;
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Returned by a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 864000)]
    pub expires_in: i64,
    pub user: AccountResponse,
}

/// Input for `POST /auth/register`.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// `identifier` is an email, or an employee code when no account has
    /// that email.
    async fn login(&self, identifier: String, password: String) -> AppResult<LoginResponse>;

    /// Verify a bearer token and extract its claims.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// The account behind a verified token.
    async fn me(&self, account_id: Uuid) -> AppResult<Account>;

    async fn change_password(
        &self,
        account_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()>;

    /// Create a bare account with no employee record.
    async fn register(&self, input: NewAccount) -> AppResult<Account>;
}

/// Real hash verified when the identifier is unknown, so both failure
/// paths cost one Argon2 verification.
static DUMMY_HASH: Lazy<Password> = Lazy::new(|| {
    Password::new("timing-equalizer-not-a-real-password")
        .unwrap_or_else(|_| Password::from_hash(String::new()))
});

fn generate_token(account: &Account, config: &Config) -> AppResult<LoginResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt.expiration_hours);

    let claims = Claims {
        sub: account.id,
        email: account.email.clone(),
        role: account.role,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(LoginResponse {
        token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt.expiration_hours * SECONDS_PER_HOUR,
        user: AccountResponse::from(account),
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    async fn resolve_identifier(&self, identifier: &str) -> AppResult<Option<Account>> {
        if let Some(account) = self.uow.accounts().find_by_email(identifier).await? {
            return Ok(Some(account));
        }
        match self.uow.employees().find_by_code(identifier).await? {
            Some(employee) => self.uow.accounts().find_by_id(employee.account_id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, identifier: String, password: String) -> AppResult<LoginResponse> {
        let account = self.resolve_identifier(identifier.trim()).await?;

        let stored = match &account {
            Some(account) => Password::from_hash(account.password_hash.clone()),
            None => DUMMY_HASH.clone(),
        };
        let password_valid = stored.verify(&password);

        match account {
            Some(account) if password_valid => {
                tracing::info!(account_id = %account.id, role = %account.role, "Login succeeded");
                generate_token(&account, &self.config)
            }
            _ => {
                tracing::debug!("Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn me(&self, account_id: Uuid) -> AppResult<Account> {
        self.uow
            .accounts()
            .find_by_id(account_id)
            .await?
            .ok_or_not_found("User")
    }

    async fn change_password(
        &self,
        account_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let mut account = self.me(account_id).await?;

        if !Password::from_hash(account.password_hash.clone()).verify(&current_password) {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        let hash = Password::new(&new_password)?.into_string();
        account.set_password_hash(hash);
        self.uow.accounts().update(account).await?;

        tracing::info!(account_id = %account_id, "Password changed");
        Ok(())
    }

    async fn register(&self, input: NewAccount) -> AppResult<Account> {
        if self.uow.accounts().find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("email"));
        }

        let hash = Password::new(&input.password)?.into_string();
        let account = self
            .uow
            .accounts()
            .create(Account::new(input.name, input.email, hash, input.role))
            .await?;

        tracing::info!(account_id = %account.id, role = %account.role, "Account registered");
        Ok(account)
    }
}
