use std::{path::Path, process::ExitCode};

use anyhow::{Context, Error};
use tracing::info;

use crate::{
    cli::{ambient_environment, ui, Invocation},
    launcher::{validate, Launcher, ProcessRunner},
    lib::errors::StoreError,
    store::{self, ProfileStore},
};

/// Bundles a user-facing error message with the process exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: ui::render_error(&err),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Resolve the requested profile and run the configured command with it.
pub async fn run_launch(invocation: Invocation) -> Result<ExitCode, RuntimeExit> {
    let launcher = Launcher::inherited(invocation.command.clone());
    launch_with(&invocation, &launcher, ambient_environment()).await
}

/// [`run_launch`] with an explicit launcher and base environment.
pub async fn launch_with<R: ProcessRunner>(
    invocation: &Invocation,
    launcher: &Launcher<R>,
    base_env: Vec<(String, String)>,
) -> Result<ExitCode, RuntimeExit> {
    let store = match ProfileStore::load(&invocation.config_path) {
        Ok(store) => store,
        Err(StoreError::ConfigNotFound { path }) => return Err(initialize_missing_config(&path)),
        Err(err) => return Err(RuntimeExit::from_error(err)),
    };

    let resolved = store
        .resolve(invocation.profile.as_deref())
        .map_err(RuntimeExit::from_error)?;

    let validation = validate(&resolved.profile);
    if !validation.is_valid() {
        return Err(RuntimeExit::new(
            ui::error(&format!(
                "Profile \"{}\" is missing required fields: {}",
                resolved.name,
                validation.missing.join(", ")
            )),
            ExitCode::FAILURE,
        ));
    }

    info!(
        target: "ccswitch::cli",
        profile = %resolved.name,
        command = launcher.command(),
        "Launching with profile"
    );
    let code = launcher
        .launch(&resolved.profile, &invocation.args, base_env)
        .await
        .map_err(RuntimeExit::from_error)?;
    Ok(ExitCode::from(child_exit_byte(code)))
}

/// Write the template config and tell the user to edit it.
fn initialize_missing_config(path: &Path) -> RuntimeExit {
    info!(
        target: "ccswitch::cli",
        path = %path.display(),
        "Config file missing; writing template"
    );
    match store::initialize(path).context("Failed to create config file.") {
        Ok(_) => RuntimeExit::new(
            format!(
                "Config file not found: {path}\n\n\
                 Created default config at: {path}\n\n\
                 Please edit the config file to add your API configurations:\n\n  {path}\n\n{}",
                ui::error("Edit the config file and try again."),
                path = path.display()
            ),
            ExitCode::FAILURE,
        ),
        Err(err) => RuntimeExit::from_error(err),
    }
}

/// Map a child exit code onto the byte a process can return.
///
/// Codes outside `0..=255` become 1.
pub fn child_exit_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
