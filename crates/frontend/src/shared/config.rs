//! Application configuration.
//!
//! Defaults are embedded in the bundle; `SUPABASE_URL` and
//! `SUPABASE_ANON_KEY` set at build time override the API section.

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Project URL of the hosted database, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Public (anon) API key sent with every request
    pub anon_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Master/detail split threshold in CSS pixels
    pub breakpoint_px: f64,
    /// Detail enter/exit duration
    pub transition_ms: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://127.0.0.1:54321"
anon_key = ""

[layout]
breakpoint_px = 1024
transition_ms = 300
"#;

/// Parse a configuration document and apply build-time overrides.
pub fn parse_config(source: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(source)?;
    if let Some(url) = option_env!("SUPABASE_URL") {
        config.api.base_url = url.to_string();
    }
    if let Some(key) = option_env!("SUPABASE_ANON_KEY") {
        config.api.anon_key = key.to_string();
    }
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
    Ok(config)
}

static CONFIG: Lazy<Config> = Lazy::new(|| match parse_config(DEFAULT_CONFIG) {
    Ok(config) => config,
    Err(e) => {
        log::error!("{e}; falling back to built-in layout defaults");
        Config {
            api: ApiConfig {
                base_url: String::new(),
                anon_key: String::new(),
            },
            layout: LayoutConfig {
                breakpoint_px: 1024.0,
                transition_ms: 300,
            },
        }
    }
});

/// Process-wide configuration, parsed on first use.
pub fn app_config() -> &'static Config {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.layout.breakpoint_px, 1024.0);
        assert_eq!(config.layout.transition_ms, 300);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let src = DEFAULT_CONFIG.replace("http://127.0.0.1:54321", "https://demo.example.co/");
        let config = parse_config(&src).unwrap();
        if option_env!("SUPABASE_URL").is_none() {
            assert_eq!(config.api.base_url, "https://demo.example.co");
        }
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        assert!(parse_config("[layout]\nbreakpoint_px = \"wide\"").is_err());
    }
}
