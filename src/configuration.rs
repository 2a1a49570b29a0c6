use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use url::Url;

const SEARCH_PATH: &str = "v1/mixed_people/search";
const BULK_MATCH_PATH: &str = "api/v1/people/bulk_match";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub apollo: ApolloSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct ApolloSettings {
    pub api_key: String,
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_delay_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub batch_size: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    #[serde(default = "default_report_dropped_records")]
    pub report_dropped_records: bool,
}

fn default_report_dropped_records() -> bool {
    true
}

impl ApolloSettings {
    pub fn search_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint(SEARCH_PATH)
    }

    pub fn bulk_match_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint(BULK_MATCH_PATH)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_millis)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        // Url::join drops the last segment unless the base ends with '/'
        let base = match self.base_url.ends_with('/') {
            true => self.base_url.clone(),
            false => format!("{}/", self.base_url),
        };
        Url::parse(&base)?.join(path)
    }
}

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
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // APP_APOLLO__API_KEY=... sets Settings.apollo.api_key
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
