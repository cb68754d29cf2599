// Role-gated access for protected route groups

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{
    error::AuthError,
    models::{Role, User},
    repository::UserStore,
    service::AuthService,
};

/// The user resolved by [`RequireRole`], attached to request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Set of roles a route group admits. There is no hierarchy between roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowedRoles {
    pub user: bool,
    pub provider: bool,
    pub admin: bool,
}

impl AllowedRoles {
    pub fn of(roles: &[Role]) -> Self {
        roles.iter().fold(Self::default(), |mut set, role| {
            match role {
                Role::User => set.user = true,
                Role::Provider => set.provider = true,
                Role::Admin => set.admin = true,
            }
            set
        })
    }

    pub fn permits(&self, role: Role) -> bool {
        match role {
            Role::User => self.user,
            Role::Provider => self.provider,
            Role::Admin => self.admin,
        }
    }
}

/// Authorization gate: bearer token, then user lookup, then role check
///
/// `Unauthenticated -> TokenParsed -> TokenValidated -> RoleChecked -> Admitted | Rejected`.
/// The wrapped handler never runs on rejection.
#[derive(Clone)]
pub struct RequireRole {
    allowed: AllowedRoles,
    auth: AuthService,
    users: Arc<dyn UserStore>,
}

impl RequireRole {
    pub fn new(allowed: &[Role], auth: AuthService, users: Arc<dyn UserStore>) -> Self {
        Self {
            allowed: AllowedRoles::of(allowed),
            auth,
            users,
        }
    }

    pub fn admin(auth: AuthService, users: Arc<dyn UserStore>) -> Self {
        Self::new(&[Role::Admin], auth, users)
    }

    pub fn provider(auth: AuthService, users: Arc<dyn UserStore>) -> Self {
        Self::new(&[Role::Provider], auth, users)
    }

    pub fn admin_or_provider(auth: AuthService, users: Arc<dyn UserStore>) -> Self {
        Self::new(&[Role::Admin, Role::Provider], auth, users)
    }

    pub fn any(auth: AuthService, users: Arc<dyn UserStore>) -> Self {
        Self::new(&[Role::User, Role::Provider, Role::Admin], auth, users)
    }

    /// Run the gate; on success the request continues with [`CurrentUser`] attached
    pub async fn middleware(&self, mut request: Request<Body>, next: Next) -> Result<Response, AuthError> {
        let endpoint = request.uri().path().to_string();

        let token = bearer_token(&request).map_err(|e| {
            warn!("Rejected request to {}: {}", endpoint, e);
            e
        })?;

        let user_id = self.auth.validate_token(&token).map_err(|e| {
            warn!("Invalid token presented to {}", endpoint);
            e
        })?;

        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            warn!("Token for missing user_id={} presented to {}", user_id, endpoint);
            AuthError::InvalidToken
        })?;

        if !self.allowed.permits(user.role) {
            warn!(
                "Authorization failed: user_id={}, role={}, endpoint={}",
                user.id, user.role, endpoint
            );
            return Err(AuthError::InsufficientPermissions);
        }

        debug!(
            "Authorization successful: user_id={}, role={}, endpoint={}",
            user.id, user.role, endpoint
        );
        request.extensions_mut().insert(CurrentUser(user));
        Ok(next.run(request).await)
    }
}

/// Adapter for `axum::middleware::from_fn_with_state`
pub async fn require_role(
    State(gate): State<RequireRole>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    gate.middleware(request, next).await
}

/// Header must be exactly `Bearer <token>`
fn bearer_token(request: &Request<Body>) -> Result<String, AuthError> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AuthError::InvalidToken),
    }
}
