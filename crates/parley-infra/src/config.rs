//! Environment-based configuration for Parley.
//!
//! All runtime configuration comes from environment variables, read once
//! at startup. The only required variable is the provider API key; the
//! rest have working defaults.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

/// Default model when `PARLEY_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Runtime configuration resolved from the environment.
///
/// The API key is wrapped in [`SecretString`] so it never appears in
/// Debug output or logs.
pub struct Config {
    /// Provider API key (`DEEPSEEK_API_KEY`).
    pub api_key: SecretString,
    /// Model identifier (`PARLEY_MODEL`).
    pub model: String,
    /// Base URL override for the completions endpoint (`PARLEY_BASE_URL`).
    pub base_url: Option<String>,
    /// System prompt override (`PARLEY_SYSTEM_PROMPT`).
    pub system_prompt: Option<String>,
    /// Data directory holding the SQLite file (`PARLEY_DATA_DIR`).
    pub data_dir: PathBuf,
    /// Static frontend directory (`PARLEY_WEB_DIR`).
    pub web_dir: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Fails if `DEEPSEEK_API_KEY` is absent or empty: without a key every
    /// completion would be rejected upstream, so this is a startup error.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("DEEPSEEK_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("DEEPSEEK_API_KEY is not set"))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            model: std::env::var("PARLEY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("PARLEY_BASE_URL").ok(),
            system_prompt: std::env::var("PARLEY_SYSTEM_PROMPT").ok(),
            data_dir: resolve_data_dir(),
            web_dir: PathBuf::from(
                std::env::var("PARLEY_WEB_DIR").unwrap_or_else(|_| "web".to_string()),
            ),
        })
    }
}

/// Resolve the data directory: `PARLEY_DATA_DIR` env var, falling back
/// to `~/.parley`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PARLEY_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".parley")
}

/// Database URL for the SQLite file inside the given data directory.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("parley.db").display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_api_key() {
        // SAFETY: this test mutates process-wide env vars; it runs its
        // set/remove sequence within a single test body and restores state.
        unsafe { std::env::remove_var("DEEPSEEK_API_KEY") };
        assert!(Config::from_env().is_err());

        unsafe { std::env::set_var("DEEPSEEK_API_KEY", "sk-test") };
        let config = Config::from_env().unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.base_url.is_none());
        unsafe { std::env::remove_var("DEEPSEEK_API_KEY") };
    }

    #[test]
    fn test_database_url_points_at_parley_db() {
        let url = database_url(Path::new("/tmp/data"));
        assert_eq!(url, "sqlite:///tmp/data/parley.db?mode=rwc");
    }

    #[test]
    fn test_resolve_data_dir_defaults_under_home() {
        if std::env::var("PARLEY_DATA_DIR").is_err() {
            let dir = resolve_data_dir();
            assert!(dir.ends_with(".parley"));
        }
    }
}
