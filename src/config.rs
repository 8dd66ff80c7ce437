//! Read-only application configuration (`~/.guestbook/config.yaml`)

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::constants::{DEFAULT_CONTRACT_ID, DEFAULT_NETWORK_ID, DEFAULT_NODE_URL};
use crate::error::GuestbookError;
use crate::models::NetworkConfig;

const CONFIG_FILE: &str = "config.yaml";

/// Network, contract and wallet settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network_id: String,
    pub node_url: String,
    pub contract_id: String,
    /// Endpoint of the external signer; submissions are rejected without one
    pub signer_url: Option<String>,
    /// Accounts offered by the account chooser
    pub accounts: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            network_id: String::from(DEFAULT_NETWORK_ID),
            node_url: String::from(DEFAULT_NODE_URL),
            contract_id: String::from(DEFAULT_CONTRACT_ID),
            signer_url: None,
            accounts: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Directory holding the config file
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".guestbook")
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir().join(CONFIG_FILE))
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GuestbookError> {
        if self.node_url.trim().is_empty() {
            return Err(GuestbookError::Config("node_url is empty".into()));
        }
        validate_account_id(&self.contract_id)?;
        for account in &self.accounts {
            validate_account_id(account)?;
        }
        Ok(())
    }

    pub fn network(&self) -> NetworkConfig {
        NetworkConfig {
            network_id: self.network_id.clone(),
            node_url: self.node_url.clone(),
        }
    }
}

/// NEAR account id rules: 2-64 chars, lowercase alphanumeric parts joined
/// by `-`/`_`, dot-separated
pub fn validate_account_id(account_id: &str) -> Result<(), GuestbookError> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^(([a-z\d]+[-_])*[a-z\d]+\.)*([a-z\d]+[-_])*[a-z\d]+$")
            .expect("static account id pattern")
    });

    if (2..=64).contains(&account_id.len()) && pattern.is_match(account_id) {
        Ok(())
    } else {
        Err(GuestbookError::InvalidAccountId(account_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.node_url, DEFAULT_NODE_URL);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "contract_id: my-book.testnet\naccounts:\n  - alice.testnet\n  - bob.testnet\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.contract_id, "my-book.testnet");
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.network_id, DEFAULT_NETWORK_ID);
        assert!(config.signer_url.is_none());
    }

    #[test]
    fn test_invalid_account_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "accounts:\n  - Alice!\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_account_id_rules() {
        assert!(validate_account_id("alice.testnet").is_ok());
        assert!(validate_account_id("app_1-beta.near").is_ok());
        assert!(validate_account_id("a").is_err());
        assert!(validate_account_id("Alice.near").is_err());
        assert!(validate_account_id("alice..near").is_err());
        assert!(validate_account_id("-alice").is_err());
    }
}
