// src/core/download.rs

use crate::{
    CancellationToken,
    constants::EXIT_CODE_CANCELLED,
    core::{composer, validator::{self, ValidationError}},
    models::Configuration,
    system::{
        executor::{self, ExecutionError},
        platform::PlatformProfile,
    },
};
use thiserror::Error;

/// Failure of a download step. `Validation` errors happen before anything is
/// spawned; `Execution` errors come from the child process.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Rejected before anything ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The child could not run or did not succeed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl DownloadError {
    /// True when the step was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DownloadError::Execution(ExecutionError::Cancelled))
    }

    /// The exit code the plugin process should end with.
    pub fn exit_code(&self) -> i32 {
        match self {
            DownloadError::Execution(ExecutionError::NonZeroExit { code: Some(code) }) => *code,
            DownloadError::Execution(ExecutionError::Cancelled) => EXIT_CODE_CANCELLED,
            _ => 1,
        }
    }
}

/// Validates the configuration, composes the `jfrog rt dl` command and runs it.
///
/// Returns once the child exits or the cancellation flag is raised. Secrets are
/// handed to the child only as environment variables; the echoed command line
/// carries their names.
pub fn execute(
    config: &Configuration,
    profile: &PlatformProfile,
    cancellation_token: &CancellationToken,
) -> Result<(), DownloadError> {
    validator::validate(config)?;

    let tokens = composer::compose(config);
    let command_line = profile.render(&tokens);
    let secret_env = config
        .credentials()
        .map(|c| c.env_bindings())
        .unwrap_or_default();

    log::debug!(
        "Launching download of '{}' through '{}'.",
        config.source_path,
        profile.shell
    );
    executor::launch(&command_line, profile, &secret_env, cancellation_token)?;

    log::info!("Download of '{}' finished.", config.source_path);
    Ok(())
}
