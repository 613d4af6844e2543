//! Shared configuration used across all folio crates.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file consulted when `FOLIO_CONFIG` is not set (extension resolved by the `config` crate).
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway";

const ENV_CONFIG_PATH: &str = "FOLIO_CONFIG";
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const ENV_SMTP_HOST: &str = "SMTP_HOST";
const ENV_SMTP_PORT: &str = "SMTP_PORT";
const ENV_SMTP_USER: &str = "SMTP_USER";
const ENV_SMTP_PASS: &str = "SMTP_PASS";
const ENV_CONTACT_TO: &str = "CONTACT_TO";

/// Remote completion settings. The strategy is Live only when `api_key` is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound for one completion call, connect included.
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// The credential, if one is configured and not blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o".to_string(),
            max_tokens: 250,
            temperature: 0.7,
            timeout_secs: 15,
        }
    }
}

/// Outbound SMTP settings for the contact relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_user: Option<String>,
    #[serde(default)]
    pub smtp_pass: Option<String>,
    /// Inbox that receives submissions; defaults to `smtp_user`.
    #[serde(default)]
    pub contact_to: Option<String>,
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_user: None,
            smtp_pass: None,
            contact_to: None,
        }
    }
}

impl ContactConfig {
    /// True when host and user are both set; the relay cannot send otherwise.
    pub fn is_configured(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        set(&self.smtp_host) && set(&self.smtp_user)
    }

    /// Port 465 means implicit TLS; anything else negotiates STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.smtp_port == 465
    }
}

/// Artificial "typing" pause applied by the chat surface before answering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TypingDelay {
    pub min_ms: u64,
    /// Uniform random extra delay in `0..=jitter_ms`.
    pub jitter_ms: u64,
}

impl TypingDelay {
    pub const NONE: TypingDelay = TypingDelay { min_ms: 0, jitter_ms: 0 };

    pub fn is_disabled(&self) -> bool {
        self.min_ms == 0 && self.jitter_ms == 0
    }
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self { min_ms: 1000, jitter_ms: 1000 }
    }
}

/// Global application configuration (gateway, responder strategy, contact relay). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Assistant identity shown in status and logs.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Optional JSON profile replacing the built-in knowledge base.
    #[serde(default)]
    pub knowledge_path: Option<String>,
    /// If true, the gateway serves the built SPA from `frontend_dir`. (Config alias: `ui_enabled`)
    #[serde(default, alias = "ui_enabled")]
    pub frontend_enabled: bool,
    pub frontend_dir: String,
    /// Origins allowed by the CORS layer; empty means no CORS layer.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default)]
    pub typing_delay: TypingDelay,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "raghava.ai".to_string(),
            port: 8001,
            knowledge_path: None,
            frontend_enabled: false,
            frontend_dir: "dist/public".to_string(),
            cors_origins: Vec::new(),
            typing_delay: TypingDelay::default(),
            llm: LlmConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `FOLIO_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut loaded = Self::load_from(&config_path)?;
        loaded.apply_legacy_env(|key| std::env::var(key).ok());
        Ok(loaded)
    }

    /// Load from an explicit path (with or without `.toml`) plus `FOLIO__*` environment overrides.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// `env` replaces the process environment as the override source when given.
    fn load_with_env(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let defaults = CoreConfig::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("frontend_dir", defaults.frontend_dir)?
            .set_default("typing_delay.min_ms", defaults.typing_delay.min_ms as i64)?
            .set_default("typing_delay.jitter_ms", defaults.typing_delay.jitter_ms as i64)?
            .set_default("llm.api_url", defaults.llm.api_url)?
            .set_default("llm.model", defaults.llm.model)?
            .set_default("llm.max_tokens", i64::from(defaults.llm.max_tokens))?
            .set_default("llm.temperature", f64::from(defaults.llm.temperature))?
            .set_default("llm.timeout_secs", defaults.llm.timeout_secs as i64)?
            .set_default("contact.smtp_port", i64::from(defaults.contact.smtp_port))?;

        let path = Path::new(config_path);
        let with_ext = path.with_extension("toml");
        let builder = if path.is_file() {
            builder.add_source(config::File::from(path))
        } else if with_ext.is_file() {
            builder.add_source(config::File::from(with_ext.as_path()))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .source(env),
            )
            .build()?;

        built.try_deserialize()
    }

    /// Fills unset fields from the unprefixed variables commonly kept in `.env`
    /// (`OPENAI_API_KEY`, `SMTP_*`, `CONTACT_TO`). Explicit config always wins.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.llm.credential().is_none() {
            self.llm.api_key = get(ENV_OPENAI_API_KEY);
        }
        let contact = &mut self.contact;
        if contact.smtp_host.is_none() {
            contact.smtp_host = get(ENV_SMTP_HOST);
            if let Some(port) = get(ENV_SMTP_PORT).and_then(|p| p.trim().parse::<u16>().ok()) {
                contact.smtp_port = port;
            }
        }
        if contact.smtp_user.is_none() {
            contact.smtp_user = get(ENV_SMTP_USER);
        }
        if contact.smtp_pass.is_none() {
            contact.smtp_pass = get(ENV_SMTP_PASS);
        }
        if contact.contact_to.is_none() {
            contact.contact_to = get(ENV_CONTACT_TO);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let cfg = CoreConfig::load_from("/nonexistent/folio/gateway").unwrap();
        assert_eq!(cfg.app_name, "raghava.ai");
        assert_eq!(cfg.port, 8001);
        assert_eq!(cfg.llm.model, "gpt-4o");
        assert_eq!(cfg.llm.max_tokens, 250);
        assert_eq!(cfg.contact.smtp_port, 587);
        assert_eq!(cfg.typing_delay.min_ms, 1000);
        assert!(cfg.llm.credential().is_none());
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
app_name = "Test Folio"
port = 4100
ui_enabled = true

[typing_delay]
min_ms = 0
jitter_ms = 0

[llm]
api_key = "sk-test"
model = "gpt-4o-mini"

[contact]
smtp_host = "smtp.example.com"
smtp_port = 465
smtp_user = "portfolio@example.com"
"#
        )
        .unwrap();

        let cfg = CoreConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.app_name, "Test Folio");
        assert_eq!(cfg.port, 4100);
        assert!(cfg.frontend_enabled);
        assert!(cfg.typing_delay.is_disabled());
        assert_eq!(cfg.llm.credential(), Some("sk-test"));
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert_eq!(cfg.llm.max_tokens, 250);
        assert!(cfg.contact.is_configured());
        assert!(cfg.contact.implicit_tls());
    }

    #[test]
    fn test_env_overrides_scalars_and_origin_list() {
        let env: config::Map<String, String> = [
            ("FOLIO__PORT", "9100"),
            ("FOLIO__CORS_ORIGINS", "https://raghava.ai,http://localhost:5173"),
            ("FOLIO__LLM__API_KEY", "sk-env"),
            ("FOLIO__CONTACT__SMTP_HOST", "smtp.example.com"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let cfg = CoreConfig::load_with_env("/nonexistent/folio/gateway", Some(env)).unwrap();
        assert_eq!(cfg.port, 9100);
        assert_eq!(
            cfg.cors_origins,
            vec!["https://raghava.ai".to_string(), "http://localhost:5173".to_string()]
        );
        assert_eq!(cfg.llm.credential(), Some("sk-env"));
        assert_eq!(cfg.contact.smtp_host.as_deref(), Some("smtp.example.com"));
    }

    #[test]
    fn test_blank_api_key_is_not_a_credential() {
        let llm = LlmConfig {
            api_key: Some("   ".to_string()),
            ..LlmConfig::default()
        };
        assert!(llm.credential().is_none());
    }

    #[test]
    fn test_legacy_env_fills_only_unset_fields() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-legacy"),
            ("SMTP_HOST", "mail.example.com"),
            ("SMTP_PORT", "465"),
            ("SMTP_USER", "me@example.com"),
            ("CONTACT_TO", "inbox@example.com"),
        ]
        .into_iter()
        .collect();

        let mut cfg = CoreConfig::default();
        cfg.contact.smtp_user = Some("explicit@example.com".to_string());
        cfg.apply_legacy_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.llm.credential(), Some("sk-legacy"));
        assert_eq!(cfg.contact.smtp_host.as_deref(), Some("mail.example.com"));
        assert_eq!(cfg.contact.smtp_port, 465);
        assert_eq!(cfg.contact.smtp_user.as_deref(), Some("explicit@example.com"));
        assert_eq!(cfg.contact.contact_to.as_deref(), Some("inbox@example.com"));
        assert!(cfg.contact.smtp_pass.is_none());
    }

    #[test]
    fn test_contact_unconfigured_without_host() {
        let contact = ContactConfig {
            smtp_user: Some("me@example.com".to_string()),
            ..ContactConfig::default()
        };
        assert!(!contact.is_configured());
    }
}
