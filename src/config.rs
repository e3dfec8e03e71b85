use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Backend API
    pub api_base_url: String,
    pub request_timeout: u64,

    // Notification polling
    pub notification_poll_interval: u64,

    // Runtime
    pub environment: String,
    pub log_level: String,

    // Session bootstrap
    pub auth_token: Option<String>,
    pub login_email: Option<String>,
    pub login_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            request_timeout: 30,
            notification_poll_interval: 30,
            environment: "development".to_string(),
            log_level: "homebound_client=debug".to_string(),
            auth_token: None,
            login_email: None,
            login_password: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,

            notification_poll_interval: env::var("NOTIFICATION_POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "homebound_client=debug".to_string()),

            auth_token: env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
            login_email: env::var("LOGIN_EMAIL").ok(),
            login_password: env::var("LOGIN_PASSWORD").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.notification_poll_interval == 0 {
            anyhow::bail!("NOTIFICATION_POLL_INTERVAL_SECS must be greater than zero");
        }
        if self.request_timeout == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        url::Url::parse(&self.api_base_url)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.notification_poll_interval)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
