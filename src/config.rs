use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Prefix for the links in response metadata. Links are relative when unset.
    #[serde(alias = "baseurl")]
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    #[serde(default = "default_context_cookie")]
    pub context_cookie: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            context_cookie: default_context_cookie(),
        }
    }
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

fn default_context_cookie() -> String {
    "context_id".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let api = &self.api;
        if api.max_page_size == 0 || api.default_page_size == 0 || api.default_page_size > api.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "api.default_page_size ({}) must be between 1 and api.max_page_size ({})",
                api.default_page_size, api.max_page_size
            )));
        }
        if api.context_cookie.trim().is_empty() {
            return Err(ConfigError::Invalid("api.context_cookie must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn get_database_path(&self) -> Option<String> {
        self.database.sqlite.as_ref().map(|sqlite| sqlite.filename.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
listen:
  address: 127.0.0.1
  port: "9000"
database:
  sqlite:
    filename: /var/lib/context-api/items.db
api:
  baseurl: https://api.example.com/v1
  max_page_size: 50
"#;
        let config = Config::from_yaml("test.yaml", yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "9000");
        assert_eq!(config.get_database_path().as_deref(), Some("/var/lib/context-api/items.db"));
        assert_eq!(config.api.base_url.as_deref(), Some("https://api.example.com/v1"));
        assert_eq!(config.api.default_page_size, 10);
        assert_eq!(config.api.max_page_size, 50);
        assert_eq!(config.api.context_cookie, "context_id");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("empty.yaml", "{}").unwrap();
        assert_eq!(config.listen.port, "8080");
        assert!(config.get_database_path().is_none());
    }

    #[test]
    fn test_rejects_inconsistent_page_sizes() {
        let yaml = "api:\n  default_page_size: 200\n  max_page_size: 100\n";
        assert!(matches!(
            Config::from_yaml("bad.yaml", yaml),
            Err(ConfigError::Invalid(_))
        ));
    }
}
