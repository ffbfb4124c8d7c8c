use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::LogLevel;
use crate::auth::{Authentication, AuthorizationData};
use crate::bulk::FileType;
use crate::bulk::manager::{BulkServiceManager, DEFAULT_STATUS_POLL_INTERVAL};
use crate::bulk::service::{ApiEnvironment, RestBulkService};
use crate::error::{Error, Result};

const CONFIG_DIR: &str = "bingads";
const CONFIG_FILE: &str = "config.json";

/// Settings for talking to the Bulk service, as stored in `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub environment: ApiEnvironment,
    pub developer_token: String,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub account_id: Option<i64>,
    pub authentication: Authentication,
    #[serde(default = "default_poll_interval_secs")]
    pub status_poll_interval_secs: u64,
    #[serde(default)]
    pub file_type: FileType,
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_STATUS_POLL_INTERVAL.as_secs()
}

impl ClientConfig {
    /// Read `path`, or `<config dir>/bingads/config.json` when no path is given.
    pub fn load(path: Option<&Path>) -> Result<ClientConfig> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_path()?,
        };
        log::debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        ClientConfig::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<ClientConfig> {
        let config: ClientConfig = serde_json::from_str(contents)
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;
        if config.developer_token.trim().is_empty() {
            return Err(Error::Config("developer_token must not be empty".to_string()));
        }
        if config.status_poll_interval_secs == 0 {
            return Err(Error::Config(
                "status_poll_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_interval_secs)
    }

    pub fn authorization_data(&self) -> AuthorizationData {
        AuthorizationData {
            developer_token: self.developer_token.clone(),
            customer_id: self.customer_id,
            account_id: self.account_id,
            authentication: self.authentication.clone(),
        }
    }

    /// A manager over the REST service, configured from these settings.
    pub fn bulk_service_manager(&self) -> BulkServiceManager<RestBulkService> {
        let service =
            RestBulkService::new(self.environment, self.authorization_data(), self.log_level);
        let manager =
            BulkServiceManager::new(service).with_status_poll_interval(self.status_poll_interval());
        match &self.working_directory {
            Some(directory) => manager.with_working_directory(directory),
            None => manager,
        }
    }
}

/// `<config dir>/bingads/config.json`.
pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or_else(|| Error::Config("No configuration directory on this platform".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::AuthConfig;

    #[test]
    fn minimal_config_takes_defaults() {
        let config = ClientConfig::from_json(
            r#"{"developer_token": "dev", "authentication": {"access_token": "abc"}}"#,
        )
        .unwrap();
        assert_eq!(config.environment, ApiEnvironment::Production);
        assert_eq!(config.status_poll_interval(), Duration::from_secs(5));
        assert_eq!(config.file_type, FileType::Csv);
        assert_eq!(config.log_level, LogLevel::Information);
        assert_eq!(
            config.authentication,
            Authentication::AccessToken("abc".to_string())
        );
    }

    #[test]
    fn reads_oauth_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "environment": "sandbox",
                "developer_token": "dev",
                "customer_id": 1234,
                "account_id": 149,
                "status_poll_interval_secs": 10,
                "file_type": "Tsv",
                "log_level": "debug",
                "authentication": {"oauth": {
                    "type": "authorization_code",
                    "client_id": "client-1",
                    "tenant_id": "common",
                    "scope": "https://ads.microsoft.com/msads.manage offline_access",
                    "refresh_token": "refresh"
                }}
            }"#,
        )
        .unwrap();

        let config = ClientConfig::load(Some(&path)).unwrap();
        assert_eq!(config.environment, ApiEnvironment::Sandbox);
        assert_eq!(config.file_type, FileType::Tsv);
        assert!(config.log_level.is_debug());
        let data = config.authorization_data();
        assert_eq!(data.account_id, Some(149));
        let Authentication::OAuth(AuthConfig::AuthorizationCode { refresh_token, .. }) =
            &data.authentication
        else {
            panic!("expected an authorization code config");
        };
        assert_eq!(refresh_token, "refresh");

        let manager = config.bulk_service_manager();
        assert_eq!(manager.status_poll_interval(), Duration::from_secs(10));
    }

    #[test]
    fn rejects_bad_settings() {
        let missing = ClientConfig::load(Some(Path::new("/nonexistent/bingads.json")));
        assert!(matches!(missing, Err(Error::Config(_))));

        let zero_interval = ClientConfig::from_json(
            r#"{"developer_token": "dev", "authentication": {"access_token": "abc"}, "status_poll_interval_secs": 0}"#,
        );
        assert!(matches!(zero_interval, Err(Error::Config(_))));
    }
}
