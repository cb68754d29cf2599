// Authentication module
// Argon2id passwords, HS256 bearer tokens, email verification and role-gated routes

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod verification;

pub use error::AuthError;
pub use middleware::{require_role, CurrentUser, RequireRole};
pub use models::{AuthPayload, Role, User, UserResponse};
pub use repository::{PgUserRepository, UserStore};
pub use service::AuthService;
pub use token::TokenService;
