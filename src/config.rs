//! Connection configuration for the hosted store.

use crate::types::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable prefix for [`FireConfig::from_env`].
const ENV_PREFIX: &str = "FIRECLIENT";

/// Connection settings for one hosted-store project.
///
/// Serialized field names follow the hosted console's camelCase export,
/// so a downloaded config JSON parses as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl FireConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: FireConfig = serde_json::from_str(&content)
            .map_err(|e| ClientError::Config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `FIRECLIENT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            api_key: env_key("API_KEY")?,
            auth_domain: env_key("AUTH_DOMAIN")?,
            project_id: env_key("PROJECT_ID")?,
            storage_bucket: env_key("STORAGE_BUCKET")?,
            messaging_sender_id: env_key("MESSAGING_SENDER_ID")?,
            app_id: env_key("APP_ID")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configs with missing or empty keys.
    pub fn validate(&self) -> Result<()> {
        let keys = [
            ("apiKey", &self.api_key),
            ("authDomain", &self.auth_domain),
            ("projectId", &self.project_id),
            ("storageBucket", &self.storage_bucket),
            ("messagingSenderId", &self.messaging_sender_id),
            ("appId", &self.app_id),
        ];

        for (name, value) in keys {
            if value.trim().is_empty() {
                return Err(ClientError::Config(format!(
                    "Missing required config key: {}",
                    name
                )));
            }
        }

        Ok(())
    }
}

fn env_key(suffix: &str) -> Result<String> {
    let name = format!("{}_{}", ENV_PREFIX, suffix);
    std::env::var(&name).map_err(|_| ClientError::Config(format!("{} not set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> FireConfig {
        FireConfig {
            api_key: "key".to_string(),
            auth_domain: "demo.example.com".to_string(),
            project_id: "demo".to_string(),
            storage_bucket: "demo.appspot.com".to_string(),
            messaging_sender_id: "42".to_string(),
            app_id: "1:42:web:abc".to_string(),
        }
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "apiKey": "key",
                "authDomain": "demo.example.com",
                "projectId": "demo",
                "storageBucket": "demo.appspot.com",
                "messagingSenderId": "42",
                "appId": "1:42:web:abc"
            }}"#
        )
        .unwrap();

        let config = FireConfig::from_file(file.path()).unwrap();
        assert_eq!(config.project_id, "demo");
        assert_eq!(config.api_key, "key");
    }

    #[test]
    fn test_config_from_file_missing_key() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"apiKey": "key"}}"#).unwrap();

        let result = FireConfig::from_file(file.path());
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let mut config = sample();
        config.project_id = String::new();

        let result = config.validate();
        assert!(matches!(result, Err(ClientError::Config(message)) if message.contains("projectId")));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(sample().validate().is_ok());
    }
}
