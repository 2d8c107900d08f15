//! Configuration model.
//!
//! YAML application config: Oracle connect-string settings plus the `vaults`
//! list used to complete Vault authentication for a known user/database pair.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AppConfig {
    /// Per-engine connection settings.
    pub databases: DatabasesConfig,
    /// Known Vault entries, matched by user id and database name.
    pub vaults: Vec<VaultEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DatabasesConfig {
    pub oracle: OracleConfig,
}

/// Oracle connect-string settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OracleConfig {
    pub thin: ThinConfig,
    pub ldap: LdapConfig,
}

/// EZConnect-style settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ThinConfig {
    /// Connect-string template with `{host}`, `{port}`, `{service}` slots.
    pub template: String,
    /// Listener port used when the caller does not supply one.
    pub port: u16,
}

/// LDAP naming settings for alias-style database names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LdapConfig {
    pub port: u16,
    pub context: String,
    pub servers: Vec<String>,
}

/// One configured Vault source for a user/database pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct VaultEntry {
    /// Database username this entry applies to.
    pub id: String,
    /// Database name this entry applies to.
    pub db: String,
    pub url: Option<String>,
    pub role_id: Option<String>,
    pub secret_id: Option<String>,
    pub ait: Option<String>,
}

impl Default for ThinConfig {
    fn default() -> Self {
        Self {
            template: "//{host}:{port}/{service}".to_string(),
            port: 1521,
        }
    }
}

impl Default for LdapConfig {
    fn default() -> Self {
        Self {
            port: 389,
            context: "cn=OracleContext".to_string(),
            servers: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit file. Unlike the default lookup,
    /// a path the user asked for must exist and parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load configuration from the default location, falling back to built-in
    /// defaults when no file is present or it does not parse.
    pub fn load_default() -> Self {
        let config_path = default_config_path();

        if config_path.exists() {
            match Self::load(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable config {}: {}", config_path.display(), e);
                }
            }
        }

        Self::default()
    }

    /// Find the Vault entry for a user/database pair.
    pub fn vault_entry(&self, user: &str, database: &str) -> Option<&VaultEntry> {
        self.vaults
            .iter()
            .find(|entry| entry.id == user && entry.db == database)
    }
}

/// Default config file path: `<config dir>/dbutil/config.yaml`.
fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dbutil")
        .join("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
databases:
  oracle:
    thin:
      template: "//{host}:{port}/{service}"
      port: 1522
    ldap:
      port: 636
      context: "cn=OracleContext,dc=example,dc=com"
      servers:
        - ldap1.example.com
        - ldap2.example.com
vaults:
  - id: hr
    db: orcl
    url: https://vault.example.com
    role-id: role-123
    secret-id: secret-456
    ait: app01
"#;

    #[test]
    fn test_parse_sample_config() {
        let config: AppConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.databases.oracle.thin.port, 1522);
        assert_eq!(config.databases.oracle.ldap.servers.len(), 2);
        assert_eq!(config.vaults.len(), 1);
        assert_eq!(config.vaults[0].ait.as_deref(), Some("app01"));
    }

    #[test]
    fn test_vault_entry_lookup_requires_both_keys() {
        let config: AppConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert!(config.vault_entry("hr", "orcl").is_some());
        assert!(config.vault_entry("hr", "other").is_none());
        assert!(config.vault_entry("scott", "orcl").is_none());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.databases.oracle.thin.port, 1521);
        assert_eq!(config.databases.oracle.thin.template, "//{host}:{port}/{service}");
        assert!(config.vaults.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = AppConfig::load(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(Error::ConfigLoad { .. })));
    }
}
