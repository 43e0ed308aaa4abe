use std::path::Path;
use std::str::FromStr;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use sqlx::ConnectOptions;
use sqlx::postgres::PgConnectOptions;

use crate::routes::error_chain_fmt;

/// Where the end-to-end specs find the deployed application and its database.
///
/// Built explicitly and passed to every [`Context`](super::Context); nothing
/// here is process-wide.
#[derive(Debug, Clone)]
pub struct E2eSettings {
    pub db_url: SecretString,
    pub base_url: Url,
}

#[derive(serde::Deserialize)]
struct RawSettings {
    db_url: Option<String>,
    base_url: Option<String>,
}

#[derive(thiserror::Error)]
pub enum SettingsError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}")]
    Invalid {
        key: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl std::fmt::Debug for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl E2eSettings {
    /// Reads `configuration/e2e.yaml` when present, then `DB_URL` and
    /// `BASE_URL` from the environment. Both values are required.
    pub fn load() -> Result<Self, SettingsError> {
        let conf_dir = std::env::current_dir()
            .map_err(|e| SettingsError::Invalid {
                key: "working directory",
                source: e.into(),
            })?
            .join("configuration");

        Self::load_from(
            &conf_dir,
            std::env::var("DB_URL").ok(),
            std::env::var("BASE_URL").ok(),
        )
    }

    pub fn load_from(
        conf_dir: &Path,
        db_url: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, SettingsError> {
        let raw = config::Config::builder()
            .add_source(config::File::from(conf_dir.join("e2e.yaml")).required(false))
            .set_override_option("db_url", non_blank(db_url))?
            .set_override_option("base_url", non_blank(base_url))?
            .build()?
            .try_deserialize::<RawSettings>()?;

        let db_url = non_blank(raw.db_url).ok_or(SettingsError::Missing("DB_URL"))?;
        let base_url = non_blank(raw.base_url).ok_or(SettingsError::Missing("BASE_URL"))?;
        let base_url = Url::parse(&base_url).map_err(|e| SettingsError::Invalid {
            key: "BASE_URL",
            source: e.into(),
        })?;

        Ok(Self {
            db_url: SecretString::from(db_url),
            base_url,
        })
    }

    pub fn db_options(&self) -> Result<PgConnectOptions, SettingsError> {
        let options = PgConnectOptions::from_str(self.db_url.expose_secret()).map_err(|e| {
            SettingsError::Invalid {
                key: "DB_URL",
                source: e.into(),
            }
        })?;
        Ok(options.log_statements(tracing::log::LevelFilter::Trace))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
