use serde::Deserialize;

use crate::error::AppError;

/// Service configuration, loaded from a TOML file with `IVR_`-prefixed
/// environment overrides (e.g. `IVR_WEBHOOK__PUBLIC_BASE_URL`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Publicly reachable base URL the platform calls back; every callback
    /// address in emitted markup is built from it.
    pub public_base_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub fallback: MenuFallback,
}

/// What to do with menu input that matches no digit and no keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuFallback {
    /// Route to billing, as the original flow silently did.
    #[default]
    Billing,
    /// Re-issue the menu prompt instead of guessing.
    Reprompt,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle sessions and pending recordings older than this are evicted.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_service_name() -> String {
    "roofline-ivr".to_string()
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_secs() -> u64 {
    4 * 3600
}

fn default_sweep_interval_secs() -> u64 {
    300
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, AppError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("IVR").separator("__"))
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let cfg: Config = settings
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), AppError> {
        let url = self.webhook.public_base_url.trim();
        if url.is_empty() {
            return Err(AppError::Config(
                "webhook.public_base_url must be set".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "webhook.public_base_url must be an http(s) URL, got {:?}",
                url
            )));
        }
        Ok(())
    }

    /// Absolute callback address for a webhook path.
    pub fn callback_url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.webhook.public_base_url.trim_end_matches('/'),
            path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> Config {
        Config {
            service: ServiceConfig::default(),
            webhook: WebhookConfig {
                public_base_url: "https://ivr.example.com/".to_string(),
            },
            menu: MenuConfig::default(),
            session: SessionConfig::default(),
        }
    }

    #[test]
    fn test_callback_url_joins_without_double_slash() {
        let cfg = minimal();
        assert_eq!(
            cfg.callback_url("/voice/menu"),
            "https://ivr.example.com/voice/menu"
        );
    }

    #[test]
    fn test_fallback_defaults_to_billing() {
        assert_eq!(MenuFallback::default(), MenuFallback::Billing);
    }

    #[test]
    fn test_validate_rejects_missing_base_url() {
        let mut cfg = minimal();
        cfg.webhook.public_base_url = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut cfg = minimal();
        cfg.webhook.public_base_url = "ivr.example.com".to_string();
        assert!(cfg.validate().is_err());
    }
}
