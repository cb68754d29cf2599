// Authentication service - business logic layer

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::{
    error::AuthError,
    models::{AuthPayload, NewUser, RegisterRequest, Role, User, UserResponse},
    password::PasswordService,
    repository::UserStore,
    token::TokenService,
    verification,
};
use crate::notifications::Mailer;
use crate::validation;

/// Authentication service coordinating registration, login and verification
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, mailer: Arc<dyn Mailer>, tokens: TokenService) -> Self {
        Self { users, mailer, tokens }
    }

    /// Register a new user
    ///
    /// The duplicate check runs before input validation. The verification
    /// email is best-effort; a delivery failure never fails registration.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthPayload, AuthError> {
        let email = request.email.trim().to_string();

        if self.users.find_by_email(&email).await?.is_some() {
            debug!("Registration rejected, email already in use: {}", email);
            return Err(AuthError::DuplicateUser);
        }

        validation::validate_email(&email).map_err(AuthError::InvalidInput)?;
        validation::validate_password(&request.password).map_err(AuthError::InvalidInput)?;
        validation::validate_required(&request.first_name, "first_name").map_err(AuthError::InvalidInput)?;
        validation::validate_required(&request.last_name, "last_name").map_err(AuthError::InvalidInput)?;

        let role = match request.role.unwrap_or_default() {
            Role::Admin => {
                warn!("Self-registration as admin refused for {}", email);
                return Err(AuthError::InvalidInput(
                    "admin role cannot be self-assigned".to_string(),
                ));
            }
            role => role,
        };

        let password_hash = PasswordService::hash_password(&request.password)?;
        let code = verification::generate_code();

        let user = self
            .users
            .create_user(NewUser {
                email,
                password_hash,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                phone: request.phone.filter(|p| !p.trim().is_empty()),
                role,
                verification_code: code.clone(),
            })
            .await?;

        info!("Registered user id={} role={}", user.id, user.role);

        if let Err(e) = self.mailer.send_verification(&user.email, &user.first_name, &code).await {
            warn!("Failed to send verification email to {}: {}", user.email, e);
        }

        self.issue(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, AuthError> {
        let user = match self.users.find_by_email(email.trim()).await? {
            Some(user) => user,
            None => {
                debug!("Login failed: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !PasswordService::verify_password(password, &user.password_hash)? {
            debug!("Login failed: wrong password for user id={}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        info!("User id={} logged in", user.id);
        self.issue(user)
    }

    /// Returns the user id carried by a valid token
    pub fn validate_token(&self, token: &str) -> Result<i32, AuthError> {
        self.tokens.validate_token(token).map(|claims| claims.user_id)
    }

    /// Consumes the verification code. A second call with the same code fails.
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() || code.trim().is_empty() {
            return Err(AuthError::InvalidInput("email and code are required".to_string()));
        }

        if !self.users.verify_email(email, code.trim()).await? {
            debug!("Verification failed for {}", email);
            return Err(AuthError::VerificationFailed);
        }

        info!("Email verified: {}", email);

        if let Some(user) = self.users.find_by_email(email).await? {
            if let Err(e) = self.mailer.send_welcome(&user.email, &user.first_name).await {
                warn!("Failed to send welcome email to {}: {}", user.email, e);
            }
        }

        Ok(())
    }

    pub async fn resend_verification(&self, email: &str) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_verified {
            return Err(AuthError::AlreadyVerified);
        }

        let code = verification::generate_code();
        self.users.update_verification_code(user.id, &code).await?;

        if let Err(e) = self.mailer.send_verification(&user.email, &user.first_name, &code).await {
            warn!("Failed to resend verification email to {}: {}", user.email, e);
        }

        info!("Verification code reissued for user id={}", user.id);
        Ok(())
    }

    pub async fn current_user(&self, user_id: i32) -> Result<UserResponse, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or(AuthError::UserNotFound)
    }

    fn issue(&self, user: User) -> Result<AuthPayload, AuthError> {
        let token = self.tokens.generate_token(user.id)?;
        let email_verified = user.email_verified;
        Ok(AuthPayload {
            token,
            user: user.into(),
            email_verified,
        })
    }
}
