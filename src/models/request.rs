//! Request models for the CLI commands.

/// Connection target shared by every database command.
#[derive(Debug, Clone)]
pub struct DatabaseRequest {
    /// Database name: a service name, a `host:port:service` triplet, or an
    /// LDAP alias.
    pub database: String,
    /// Database username.
    pub user: String,
    /// Explicit host; when present the database field is the service name.
    pub host: Option<String>,
    /// Vault settings assembled from flags (completed from config later).
    pub vault: VaultSettings,
}

/// Vault authentication settings. All fields optional; the resolver merges
/// these with the matching config entry and only goes to Vault when the
/// merged result is complete.
#[derive(Debug, Clone, Default)]
pub struct VaultSettings {
    pub url: Option<String>,
    pub role_id: Option<String>,
    pub secret_id: Option<String>,
    pub ait: Option<String>,
}

impl VaultSettings {
    /// True when every field needed for an AppRole login and secret read is
    /// present.
    pub fn is_complete(&self) -> bool {
        self.url.is_some()
            && self.role_id.is_some()
            && self.secret_id.is_some()
            && self.ait.is_some()
    }

    /// True when the caller supplied nothing at all.
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.role_id.is_none()
            && self.secret_id.is_none()
            && self.ait.is_none()
    }

    /// Fill unset fields from another settings source (config entry).
    pub fn merged_with(&self, other: &VaultSettings) -> VaultSettings {
        VaultSettings {
            url: self.url.clone().or_else(|| other.url.clone()),
            role_id: self.role_id.clone().or_else(|| other.role_id.clone()),
            secret_id: self.secret_id.clone().or_else(|| other.secret_id.clone()),
            ait: self.ait.clone().or_else(|| other.ait.clone()),
        }
    }
}

/// A SQL execution request: exactly one of `sql` or `script` is expected.
#[derive(Debug, Clone)]
pub struct SqlRequest {
    pub connection: DatabaseRequest,
    pub sql: Option<String>,
    pub script: Option<std::path::PathBuf>,
    pub params: Vec<String>,
}

impl SqlRequest {
    pub fn is_script_mode(&self) -> bool {
        self.script.is_some()
    }

    pub fn is_sql_mode(&self) -> bool {
        self.sql.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// A stored procedure execution request.
#[derive(Debug, Clone)]
pub struct ProcedureRequest {
    pub connection: DatabaseRequest,
    /// Procedure name, optionally schema-qualified.
    pub procedure: String,
    /// Raw `name:type:value` comma-separated input list.
    pub input_params: Option<String>,
    /// Raw `name:type` comma-separated output list.
    pub output_params: Option<String>,
}

/// Parse a comma-separated positional parameter list, dropping empty entries.
pub fn parse_positional_params(params: Option<&str>) -> Vec<String> {
    params
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
