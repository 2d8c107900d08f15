//! dbutil CLI
//!
//! A command-line tool for executing SQL statements, SQL/PL-SQL script files,
//! and stored procedures against Oracle, with Vault-backed password
//! resolution.

use clap::Parser;
use dbutil::cli::{
    args::{Cli, Commands},
    commands::{self, exec_proc, exec_sql},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    // Run the appropriate command
    match cli.command {
        Commands::ExecSql {
            sql,
            script,
            params,
            connection,
        } => {
            exec_sql::exec_sql(
                sql.as_deref(),
                script.as_deref(),
                params.as_deref(),
                &connection,
                &config,
                cli.quiet,
            )
            .await?;
        }

        Commands::ExecProc {
            procedure,
            input,
            output,
            connection,
        } => {
            exec_proc::exec_proc(
                &procedure,
                input.as_deref(),
                output.as_deref(),
                &connection,
                &config,
                cli.quiet,
            )
            .await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("dbutil=debug")
    } else {
        EnvFilter::new("dbutil=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
