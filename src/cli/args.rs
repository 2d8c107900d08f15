//! Command line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dbutil - Database and Vault CLI tool
#[derive(Parser, Debug)]
#[command(name = "dbutil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: <config dir>/dbutil/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a SQL statement or script file
    ExecSql {
        /// SQL statement to execute
        #[arg(value_name = "SQL")]
        sql: Option<String>,

        /// SQL script file path
        #[arg(long, value_name = "FILE", conflicts_with = "sql")]
        script: Option<PathBuf>,

        /// Positional bind parameters for a single statement (value1,value2,...)
        #[arg(long, value_name = "PARAMS")]
        params: Option<String>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Execute a stored procedure
    ExecProc {
        /// Procedure name, optionally schema-qualified
        #[arg(value_name = "PROCEDURE")]
        procedure: String,

        /// Input parameters (name:type:value,...)
        #[arg(long = "in", value_name = "PARAMS")]
        input: Option<String>,

        /// Output parameters (name:type,...)
        #[arg(long = "out", value_name = "PARAMS")]
        output: Option<String>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

/// Connection and Vault options shared by every database command.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Database: service name, host:port:service, or LDAP alias
    #[arg(short, long, required = true)]
    pub database: String,

    /// Database username
    #[arg(short, long, required = true)]
    pub user: String,

    /// Database password (resolved via Vault or prompted if not provided)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Database host (the database option becomes the service name)
    #[arg(long)]
    pub host: Option<String>,

    /// Vault server URL
    #[arg(long = "vault-url")]
    pub vault_url: Option<String>,

    /// Vault role ID for AppRole authentication
    #[arg(long = "vault-role-id")]
    pub vault_role_id: Option<String>,

    /// Vault secret ID for AppRole authentication
    #[arg(long = "vault-secret-id")]
    pub vault_secret_id: Option<String>,

    /// Vault application identifier token
    #[arg(long = "vault-ait")]
    pub vault_ait: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_sql_args() {
        let cli = Cli::try_parse_from([
            "dbutil", "exec-sql", "-d", "orcl", "-u", "hr", "SELECT 1 FROM dual",
        ])
        .unwrap();

        match cli.command {
            Commands::ExecSql {
                sql, connection, ..
            } => {
                assert_eq!(sql.as_deref(), Some("SELECT 1 FROM dual"));
                assert_eq!(connection.database, "orcl");
                assert_eq!(connection.user, "hr");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_exec_proc_args() {
        let cli = Cli::try_parse_from([
            "dbutil",
            "exec-proc",
            "-d",
            "orcl",
            "-u",
            "hr",
            "hr.my_proc",
            "--in",
            "id:integer:1",
            "--out",
            "name:varchar2",
        ])
        .unwrap();

        match cli.command {
            Commands::ExecProc {
                procedure,
                input,
                output,
                ..
            } => {
                assert_eq!(procedure, "hr.my_proc");
                assert_eq!(input.as_deref(), Some("id:integer:1"));
                assert_eq!(output.as_deref(), Some("name:varchar2"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_database_and_user_are_required() {
        assert!(Cli::try_parse_from(["dbutil", "exec-sql", "SELECT 1"]).is_err());
    }

    #[test]
    fn test_sql_and_script_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "dbutil", "exec-sql", "-d", "orcl", "-u", "hr", "SELECT 1", "--script", "run.sql",
        ]);
        assert!(result.is_err());
    }
}
