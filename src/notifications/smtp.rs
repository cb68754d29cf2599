// SMTP delivery through lettre's async transport

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, info};

use crate::config::SmtpConfig;
use crate::notifications::{templates, Mailer, NotificationError};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    frontend_url: String,
}

impl SmtpMailer {
    /// STARTTLS relay with username/password credentials
    pub fn new(config: &SmtpConfig, frontend_url: impl Into<String>) -> Result<Self, NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotificationError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .build();

        let address: Address = config
            .from_email
            .parse()
            .map_err(|_| NotificationError::InvalidAddress(config.from_email.clone()))?;

        Ok(Self {
            transport,
            from: Mailbox::new(Some(config.from_name.clone()), address),
            frontend_url: frontend_url.into(),
        })
    }

    async fn send_html(&self, to: &str, subject: &str, html: String) -> Result<(), NotificationError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|_| NotificationError::InvalidAddress(to.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| NotificationError::Build(e.to_string()))?;

        debug!("Sending '{}' to {}", subject, to);
        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        info!("Email '{}' sent to {}", subject, to);
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification(&self, to: &str, first_name: &str, code: &str) -> Result<(), NotificationError> {
        let html = templates::verification_email(&self.frontend_url, to, first_name, code);
        self.send_html(to, templates::VERIFICATION_SUBJECT, html).await
    }

    async fn send_welcome(&self, to: &str, first_name: &str) -> Result<(), NotificationError> {
        let html = templates::welcome_email(&self.frontend_url, first_name);
        self.send_html(to, templates::WELCOME_SUBJECT, html).await
    }
}
