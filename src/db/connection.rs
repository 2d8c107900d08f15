//! Connect-string construction.
//!
//! Three forms of database target are accepted:
//! - an explicit `--host` plus a service name
//! - a `host:port:service` triplet packed into the database field
//! - anything else, treated as an LDAP alias resolved through the configured
//!   directory servers

use crate::models::config::OracleConfig;
use crate::models::request::DatabaseRequest;
use crate::{Error, Result};
use std::fmt;

/// Everything needed to open a connection.
#[derive(Clone)]
pub struct ConnInfo {
    pub url: String,
    pub user: String,
    pub password: String,
}

// Manual Debug so the password never reaches logs.
impl fmt::Debug for ConnInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnInfo")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConnectStrategy {
    Thin {
        host: String,
        service: String,
        port: Option<u16>,
    },
    Ldap {
        alias: String,
    },
}

/// Build connection info for a request, using the configured templates.
pub fn build_conn_info(
    config: &OracleConfig,
    request: &DatabaseRequest,
    password: String,
) -> Result<ConnInfo> {
    let strategy = choose_strategy(request);
    let url = match strategy {
        ConnectStrategy::Thin {
            host,
            service,
            port,
        } => thin_url(config, &host, &service, port),
        ConnectStrategy::Ldap { alias } => ldap_url(config, &alias)?,
    };

    tracing::debug!("Connect string: {}", url);
    Ok(ConnInfo {
        url,
        user: request.user.clone(),
        password,
    })
}

fn choose_strategy(request: &DatabaseRequest) -> ConnectStrategy {
    if let Some(host) = request.host.as_deref().filter(|h| !h.trim().is_empty()) {
        return ConnectStrategy::Thin {
            host: host.to_string(),
            service: request.database.clone(),
            port: None,
        };
    }

    // host:port:service packed into the database field.
    let parts: Vec<&str> = request.database.split(':').collect();
    if parts.len() == 3 {
        if let Ok(port) = parts[1].parse::<u16>() {
            return ConnectStrategy::Thin {
                host: parts[0].to_string(),
                service: parts[2].to_string(),
                port: Some(port),
            };
        }
    }

    ConnectStrategy::Ldap {
        alias: request.database.clone(),
    }
}

fn thin_url(config: &OracleConfig, host: &str, service: &str, port: Option<u16>) -> String {
    let port = port.unwrap_or(config.thin.port);
    config
        .thin
        .template
        .replace("{host}", host)
        .replace("{port}", &port.to_string())
        .replace("{service}", service)
}

fn ldap_url(config: &OracleConfig, alias: &str) -> Result<String> {
    if config.ldap.servers.is_empty() {
        return Err(Error::other(format!(
            "Cannot resolve database alias '{alias}': no LDAP servers configured \
             (databases.oracle.ldap.servers)"
        )));
    }

    let clauses: Vec<String> = config
        .ldap
        .servers
        .iter()
        .map(|server| {
            format!(
                "ldap://{}:{}/{},{}",
                server.trim(),
                config.ldap.port,
                alias,
                config.ldap.context
            )
        })
        .collect();

    Ok(clauses.join(" "))
}
