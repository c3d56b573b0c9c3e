// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application configuration: Supabase credentials, event details, and logging.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. `crossway.toml` in the working directory (or an explicit file)
//! 3. Environment variables prefixed with `CROSSWAY_` (`__` separates nesting,
//!    e.g. `CROSSWAY_SUPABASE__URL`)
//!
//! `SUPABASE_URL` and `SUPABASE_ANON_KEY` are honored when the prefixed
//! variables are unset.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "crossway.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub supabase: SupabaseConfig,
    pub event: EventConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,
    /// Public anon key.
    pub anon_key: Option<String>,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_secs: 30,
        }
    }
}

impl SupabaseConfig {
    /// Project URL and anon key, or an error naming the missing setting.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let url = non_blank(self.url.as_deref()).ok_or_else(|| {
            anyhow!("Supabase URL is not configured; set CROSSWAY_SUPABASE__URL or SUPABASE_URL")
        })?;
        let key = non_blank(self.anon_key.as_deref()).ok_or_else(|| {
            anyhow!(
                "Supabase anon key is not configured; set CROSSWAY_SUPABASE__ANON_KEY or SUPABASE_ANON_KEY"
            )
        })?;
        Ok((url, key))
    }
}

/// Event details shown to registrants.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventConfig {
    pub name: String,
    /// GCash number registrants send the fee to.
    pub gcash_number: String,
    /// Account name shown next to the GCash number.
    pub gcash_name: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: "Crossway Conference 2026".to_string(),
            gcash_number: "0933-333-3333".to_string(),
            gcash_name: "AKO SI IKAW".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and then configuration from the default locations.
    pub fn load() -> Result<Self> {
        if Path::new(".env").exists() {
            dotenvy::dotenv().context("Failed to read .env file")?;
        }
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration using `file` as the optional TOML source.
    pub fn load_from(file: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        if file.exists() {
            builder = builder.add_source(File::from(file));
        }

        builder = builder.add_source(
            Environment::with_prefix("CROSSWAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: AppConfig = builder
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if non_blank(config.supabase.url.as_deref()).is_none() {
            config.supabase.url = std::env::var("SUPABASE_URL").ok();
        }
        if non_blank(config.supabase.anon_key.as_deref()).is_none() {
            config.supabase.anon_key = std::env::var("SUPABASE_ANON_KEY").ok();
        }

        Ok(config)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_cover_event_and_timeout() {
        let config = AppConfig::default();
        assert_eq!(config.supabase.timeout_secs, 30);
        assert_eq!(config.event.name, "Crossway Conference 2026");
        assert_eq!(config.event.gcash_number, "0933-333-3333");
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crossway.toml");
        std::fs::write(
            &path,
            r#"
[supabase]
url = "https://project.supabase.co"
anon_key = "anon"
timeout_secs = 10

[event]
gcash_name = "CROSSWAY MINISTRIES"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.supabase.timeout_secs, 10);
        assert_eq!(config.event.gcash_name, "CROSSWAY MINISTRIES");
        assert_eq!(config.event.gcash_number, "0933-333-3333");
        assert_eq!(
            config.supabase.credentials().unwrap(),
            ("https://project.supabase.co", "anon")
        );
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn credentials_name_missing_setting() {
        let mut config = SupabaseConfig::default();
        let err = config.credentials().unwrap_err().to_string();
        assert!(err.contains("Supabase URL"));

        config.url = Some("https://project.supabase.co".into());
        config.anon_key = Some("   ".into());
        let err = config.credentials().unwrap_err().to_string();
        assert!(err.contains("anon key"));
    }
}
