use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    pub max_connections: u32,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Layers built-in defaults, an optional config file and `TRIVIA__*`
    /// environment variables, in that order. Without an explicit path the file
    /// `config/trivia.{toml,yaml,json}` is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_sources(path, environment())
    }

    fn from_sources(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config/trivia").required(false),
        };

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite:trivia.db")?
            .set_default("database.max_connections", 5)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TRIVIA").separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn defaults_apply_without_file() {
        let settings = Settings::from_sources(None, env_from(&[])).unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:8080");
        assert_eq!(settings.database.url.expose_secret(), "sqlite:trivia.db");
        assert_eq!(settings.database.max_connections, 5);
    }

    #[test]
    fn environment_overrides_defaults() {
        let env = env_from(&[
            ("TRIVIA__SERVER__PORT", "9090"),
            ("TRIVIA__DATABASE__URL", "sqlite::memory:"),
        ]);
        let settings = Settings::from_sources(None, env).unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:9090");
        assert_eq!(settings.database.url.expose_secret(), "sqlite::memory:");
    }

    #[test]
    fn explicit_file_must_exist() {
        let missing = Path::new("config/does-not-exist.toml");
        assert!(Settings::from_sources(Some(missing), env_from(&[])).is_err());
    }
}
