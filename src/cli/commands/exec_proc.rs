//! exec-proc command implementation.

use crate::cli::args::ConnectionArgs;
use crate::db::procedure;
use crate::models::config::AppConfig;
use crate::models::request::ProcedureRequest;
use crate::Result;
use colored::Colorize;

pub async fn exec_proc(
    name: &str,
    input: Option<&str>,
    output: Option<&str>,
    connection_args: &ConnectionArgs,
    config: &AppConfig,
    quiet: bool,
) -> Result<()> {
    let request = ProcedureRequest {
        connection: super::database_request(connection_args),
        procedure: name.to_string(),
        input_params: input.map(str::to_string),
        output_params: output.map(str::to_string),
    };

    // Parameter lists are validated before any password prompt or connection.
    let inputs = procedure::parse_input_params(request.input_params.as_deref())?;
    let outputs = procedure::parse_output_params(request.output_params.as_deref())?;

    let (_, db) = super::connect(connection_args, config).await?;

    tracing::info!(
        "Executing procedure {} ({} in, {} out)",
        request.procedure,
        inputs.len(),
        outputs.len()
    );
    let results =
        procedure::execute_procedure(db.connection(), &request.procedure, &inputs, &outputs)?;

    if results.is_empty() {
        println!("Procedure executed");
    } else {
        for (param_name, value) in &results {
            println!("{param_name} = {value}");
        }
    }

    if !quiet {
        println!();
        println!("{}", "[OK] Execution completed".bold().green());
    }
    Ok(())
}
