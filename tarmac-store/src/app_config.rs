use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub aws: AwsConfig,
    pub tables: TablesConfig,
    pub store: StoreConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AwsConfig {
    pub region: String,
    /// Override for DynamoDB Local or another compatible endpoint
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TablesConfig {
    pub flights: String,
    pub bookings: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Dynamodb,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: BackendKind,
    /// Reject updates on keys that do not exist instead of upserting a partial item.
    pub guard_updates: bool,
    pub create_tables: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    pub cleanup: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `TARMAC__AWS__REGION=eu-west-1`
            .add_source(config::Environment::with_prefix("TARMAC").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// The built-in settings alone, without files or environment.
    pub fn from_defaults() -> Result<Self, config::ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("aws.region", "ap-south-1")?
            .set_default("tables.flights", "py_dynamodb_crud_flights")?
            .set_default("tables.bookings", "py_dynamodb_crud_bookings")?
            .set_default("store.backend", "dynamodb")?
            .set_default("store.guard_updates", false)?
            .set_default("store.create_tables", false)?
            .set_default("demo.cleanup", false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hardcoded_setup() {
        let config = Config::from_defaults().expect("Failed to build defaults");
        assert_eq!(config.aws.region, "ap-south-1");
        assert!(config.aws.endpoint_url.is_none());
        assert_eq!(config.tables.flights, "py_dynamodb_crud_flights");
        assert_eq!(config.tables.bookings, "py_dynamodb_crud_bookings");
        assert_eq!(config.store.backend, BackendKind::Dynamodb);
        assert!(!config.store.guard_updates);
        assert!(!config.store.create_tables);
        assert!(!config.demo.cleanup);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config: Config = Config::defaults()
            .unwrap()
            .set_override("store.backend", "memory")
            .unwrap()
            .set_override("aws.endpoint_url", "http://localhost:8000")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.store.backend, BackendKind::Memory);
        assert_eq!(config.aws.endpoint_url.as_deref(), Some("http://localhost:8000"));
    }
}
