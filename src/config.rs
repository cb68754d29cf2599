// Runtime configuration loaded once from the environment at startup

use std::time::Duration;

/// Errors raised while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

/// SMTP relay settings. Absent when `SMTP_HOST` is unset.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_name: String,
    pub from_email: String,
}

#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub api_key: Option<String>,
    pub flights_base_url: String,
    pub hotels_base_url: String,
    pub widgets_base_url: String,
    pub timeout: Duration,
    pub placeholder_fallback: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            flights_base_url: "https://api.travelpayouts.com/v1".to_string(),
            hotels_base_url: "https://engine.hotellook.com/api/v2".to_string(),
            widgets_base_url: "https://yasen.hotellook.com/tp/public".to_string(),
            timeout: Duration::from_secs(30),
            placeholder_fallback: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub jwt: JwtConfig,
    pub smtp: Option<SmtpConfig>,
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Read every setting from the process environment.
    /// `dotenv` is expected to have run before this.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parsed_or("PORT", 8080u16)?;
        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            ttl_seconds: parsed_or("JWT_TTL_SECONDS", 3600i64)?,
        };

        let smtp = match optional("SMTP_HOST") {
            Some(host) => {
                let username = optional("SMTP_USERNAME").unwrap_or_default();
                Some(SmtpConfig {
                    host,
                    port: parsed_or("SMTP_PORT", 587u16)?,
                    password: optional("SMTP_PASSWORD").unwrap_or_default(),
                    from_name: optional("SMTP_FROM_NAME").unwrap_or_else(|| "Nomado".to_string()),
                    from_email: optional("SMTP_FROM_EMAIL").unwrap_or_else(|| username.clone()),
                    username,
                })
            }
            None => None,
        };

        let defaults = PricingConfig::default();
        let pricing = PricingConfig {
            api_key: optional("TRAVEL_PAYOUTS_API_KEY"),
            flights_base_url: optional("PRICING_FLIGHTS_BASE_URL")
                .unwrap_or(defaults.flights_base_url),
            hotels_base_url: optional("PRICING_HOTELS_BASE_URL").unwrap_or(defaults.hotels_base_url),
            widgets_base_url: optional("PRICING_WIDGETS_BASE_URL")
                .unwrap_or(defaults.widgets_base_url),
            timeout: Duration::from_secs(parsed_or("PRICING_TIMEOUT_SECS", 30u64)?),
            placeholder_fallback: parsed_or("PRICING_PLACEHOLDER_FALLBACK", false)?,
        };

        Ok(Self {
            database_url,
            host,
            port,
            frontend_url,
            jwt,
            smtp,
            pricing,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

/// Unset and blank values are treated the same
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
