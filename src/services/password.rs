//! Password resolution.
//!
//! Order: an explicit `-p` value wins; otherwise Vault is tried when the
//! flag-supplied settings, completed from the matching YAML `vaults` entry,
//! are usable; otherwise the user is prompted on stdin.

use crate::models::config::AppConfig;
use crate::models::request::{DatabaseRequest, VaultSettings};
use crate::services::vault::VaultClient;
use crate::Result;
use std::io::{BufRead, Write};

/// Resolve the database password for a request.
pub async fn resolve_password(
    explicit: Option<&str>,
    request: &DatabaseRequest,
    config: &AppConfig,
) -> Result<String> {
    if let Some(password) = explicit.filter(|p| !p.trim().is_empty()) {
        tracing::debug!("Using password supplied on the command line");
        return Ok(password.to_string());
    }

    let settings = effective_vault_settings(request, config);
    if settings.is_complete() {
        tracing::debug!("Resolving password via Vault for {}", request.user);
        let client = VaultClient::new()?;
        return client
            .fetch_password(&settings, &request.user, &request.database)
            .await;
    }

    if !settings.is_empty() {
        tracing::warn!(
            "Incomplete Vault settings for {}@{}; falling back to prompt",
            request.user,
            request.database
        );
    }

    prompt_for_password(&request.user, &request.database)
}

/// Flag-supplied settings completed from the config entry matching this
/// user/database pair; flags win field by field.
pub fn effective_vault_settings(request: &DatabaseRequest, config: &AppConfig) -> VaultSettings {
    match config.vault_entry(&request.user, &request.database) {
        Some(entry) => request.vault.merged_with(&VaultSettings {
            url: entry.url.clone(),
            role_id: entry.role_id.clone(),
            secret_id: entry.secret_id.clone(),
            ait: entry.ait.clone(),
        }),
        None => request.vault.clone(),
    }
}

fn prompt_for_password(user: &str, database: &str) -> Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Enter password for {user}@{database}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
