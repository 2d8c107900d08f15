//! CLI command implementations.

pub mod exec_proc;
pub mod exec_sql;

use crate::cli::args::ConnectionArgs;
use crate::db::connection::{self, ConnInfo};
use crate::db::oracle::OracleExecutor;
use crate::models::config::AppConfig;
use crate::models::request::{DatabaseRequest, VaultSettings};
use crate::services::password;
use crate::Result;
use std::path::Path;

/// Build the shared request model from connection flags.
pub fn database_request(args: &ConnectionArgs) -> DatabaseRequest {
    DatabaseRequest {
        database: args.database.clone(),
        user: args.user.clone(),
        host: args.host.clone(),
        vault: VaultSettings {
            url: args.vault_url.clone(),
            role_id: args.vault_role_id.clone(),
            secret_id: args.vault_secret_id.clone(),
            ait: args.vault_ait.clone(),
        },
    }
}

/// Load configuration: an explicit `--config` path must load, the default
/// location is best-effort.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::load_default()),
    }
}

/// Resolve the password and open a connection for a request.
pub async fn connect(
    args: &ConnectionArgs,
    config: &AppConfig,
) -> Result<(DatabaseRequest, OracleExecutor)> {
    let request = database_request(args);
    let resolved =
        password::resolve_password(args.password.as_deref(), &request, config).await?;
    let info: ConnInfo = connection::build_conn_info(&config.databases.oracle, &request, resolved)?;
    let executor = OracleExecutor::connect(&info)?;
    Ok((request, executor))
}
