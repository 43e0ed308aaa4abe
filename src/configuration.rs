use std::time::Duration;

use serde_aux::field_attributes::deserialize_number_from_string;

use crate::api_client::ApiClient;
use crate::domain::City;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub api: ApiClientSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub default_city: String,
    pub templates: String,
}

impl ApplicationSettings {
    pub fn default_city(&self) -> Result<City, String> {
        City::parse(self.default_city.clone())
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApiClientSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
}

impl ApiClientSettings {
    pub fn client(self) -> Result<ApiClient, anyhow::Error> {
        let timeout = self.timeout();
        ApiClient::new(self.base_url, timeout)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not supported environment. Try to use `local` or `production`",
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, anyhow::Error> {
    let base_path = std::env::current_dir()?;
    let conf_dir = base_path.join("configuration");
    let env: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = config::Config::builder()
        .add_source(config::File::from(conf_dir.join("base.yaml")).required(true))
        .add_source(
            config::File::from(conf_dir.join(format!("{}.yaml", env.as_str()))).required(true),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}
