//! exec-sql command implementation.
//!
//! Executes either a single SQL statement (optionally with positional bind
//! parameters) or a script file, which is run through the segmenter and then
//! executed statement by statement.

use crate::cli::args::ConnectionArgs;
use crate::core::{executor, segmenter};
use crate::models::config::AppConfig;
use crate::models::request::{parse_positional_params, SqlRequest};
use crate::{Error, Result};
use colored::Colorize;
use std::path::Path;

pub async fn exec_sql(
    sql: Option<&str>,
    script: Option<&Path>,
    params: Option<&str>,
    connection_args: &ConnectionArgs,
    config: &AppConfig,
    quiet: bool,
) -> Result<()> {
    let (request, mut db) = super::connect(connection_args, config).await?;

    let sql_request = SqlRequest {
        connection: request,
        sql: sql.map(str::to_string),
        script: script.map(Path::to_path_buf),
        params: parse_positional_params(params),
    };

    let message = if sql_request.is_script_mode() {
        run_script_file(&sql_request, &mut db, quiet)?
    } else if sql_request.is_sql_mode() {
        run_single_statement(&sql_request, &mut db)?
    } else {
        return Err(Error::MissingSqlInput);
    };

    println!("{message}");
    if !quiet {
        println!();
        println!("{}", "[OK] Execution completed".bold().green());
    }
    Ok(())
}

fn run_script_file(
    request: &SqlRequest,
    db: &mut crate::db::oracle::OracleExecutor,
    quiet: bool,
) -> Result<String> {
    let path = request.script.as_deref().unwrap_or_else(|| Path::new(""));
    let parsed = segmenter::parse(path)?;

    if !quiet {
        println!(
            "[INFO] Script {}: {} statements",
            parsed.source_name(),
            parsed.len()
        );
    }

    let result = executor::run_script(&parsed, db)?;
    Ok(result.message().to_string())
}

fn run_single_statement(
    request: &SqlRequest,
    db: &mut crate::db::oracle::OracleExecutor,
) -> Result<String> {
    let sql = request.sql.as_deref().unwrap_or("");
    tracing::debug!(
        "Executing single statement with {} bind value(s)",
        request.params.len()
    );
    let outcome = db.execute_with_params(sql, &request.params)?;
    Ok(outcome.message())
}
