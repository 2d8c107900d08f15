//! HashiCorp Vault client.
//!
//! Fetches database passwords: an AppRole login yields a client token, which
//! authorizes a read of the static credential for the ait/database/user
//! triple. Timeouts are short — a CLI should fail fast when Vault is down and
//! let the user fall back to an interactive password.

use crate::models::request::VaultSettings;
use crate::{Error, Result};
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

pub struct VaultClient {
    http: reqwest::Client,
}

impl VaultClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch the password for `user` on `database`. `settings` must be
    /// complete (url, role-id, secret-id, ait).
    pub async fn fetch_password(
        &self,
        settings: &VaultSettings,
        user: &str,
        database: &str,
    ) -> Result<String> {
        let base_url = validated_base_url(settings.url.as_deref().unwrap_or(""))?;
        let role_id = settings.role_id.as_deref().unwrap_or("");
        let secret_id = settings.secret_id.as_deref().unwrap_or("");
        let ait = settings.ait.as_deref().unwrap_or("");

        let token = self.login(&base_url, role_id, secret_id).await?;
        self.read_static_password(&base_url, &token, ait, database, user)
            .await
    }

    /// AppRole login; returns the client token.
    async fn login(&self, base_url: &str, role_id: &str, secret_id: &str) -> Result<String> {
        let url = format!("{base_url}/v1/auth/approle/login");
        tracing::debug!("Vault login: {}", url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "role_id": role_id, "secret_id": secret_id }))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(Error::VaultAuth(format!(
                "{} - {}",
                status,
                vault_errors(&body)
            )));
        }

        body.pointer("/auth/client_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::VaultAuth("No client token received from Vault".to_string()))
    }

    async fn read_static_password(
        &self,
        base_url: &str,
        token: &str,
        ait: &str,
        database: &str,
        user: &str,
    ) -> Result<String> {
        let url = format!(
            "{base_url}/v1/secrets/database/oracle/static-creds/{}",
            format!("{ait}-{database}-{user}").to_lowercase()
        );
        tracing::debug!("Vault secret read: {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-Vault-Token", token)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            return Err(Error::VaultSecret(format!(
                "{} - {}",
                status,
                vault_errors(&body)
            )));
        }

        body.pointer("/data/password")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::VaultSecret("Response contained no data.password field".to_string())
            })
    }
}

/// Vault must be addressed with a full URL; a bare hostname is almost always
/// a configuration mistake, so refuse it instead of guessing a scheme.
fn validated_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidVaultUrl("<empty>".to_string()));
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Ok(trimmed.to_string());
    }
    Err(Error::InvalidVaultUrl(raw.to_string()))
}

fn vault_errors(body: &Value) -> String {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ")
        })
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| "no error details".to_string())
}
