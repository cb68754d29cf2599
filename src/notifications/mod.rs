// Outbound transactional email
// Delivery is best-effort: callers log failures and carry on

pub mod smtp;
pub mod templates;

use async_trait::async_trait;

pub use smtp::SmtpMailer;

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("email delivery is not configured")]
    NotConfigured,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("failed to send email: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, to: &str, first_name: &str, code: &str) -> Result<(), NotificationError>;

    async fn send_welcome(&self, to: &str, first_name: &str) -> Result<(), NotificationError>;
}

/// Used when no SMTP relay is configured
#[derive(Debug, Clone, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_verification(&self, _to: &str, _first_name: &str, _code: &str) -> Result<(), NotificationError> {
        Err(NotificationError::NotConfigured)
    }

    async fn send_welcome(&self, _to: &str, _first_name: &str) -> Result<(), NotificationError> {
        Err(NotificationError::NotConfigured)
    }
}
