//! Entry point for ccswitch.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use ccswitch::{
    cli::{execute_cli_command, list_profiles, LaunchArgs, ParsedCommand},
    lib::telemetry,
    runtime::{self, RuntimeExit},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(code) => code,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<ExitCode, RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchArgs::parse();
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::Launch(invocation) => runtime::run_launch(invocation).await,
        ParsedCommand::List { config_path } => print_message(list_profiles(&config_path)),
        ParsedCommand::Cli {
            config_path,
            command,
        } => print_message(execute_cli_command(&config_path, command)),
    }
}

fn print_message(result: Result<String>) -> Result<ExitCode, RuntimeExit> {
    let message = result.map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(ExitCode::SUCCESS)
}
