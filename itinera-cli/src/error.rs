//! Error types emitted by the Itinera CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use itinera_core::{PlanError, PlanRequestValidationError};
use thiserror::Error;

/// Process exit code for failures caused by the caller's input.
pub const EXIT_CLIENT_ERROR: u8 = 2;
/// Process exit code for internal failures.
pub const EXIT_INTERNAL_ERROR: u8 = 1;

/// Errors emitted by the Itinera CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The plan request payload failed validation.
    #[error("plan request in {path:?} failed validation: {source}")]
    InvalidPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: PlanRequestValidationError,
    },
    /// The planner rejected the request or failed part-way.
    #[error("planner failed: {source}")]
    Plan { source: PlanError },
    /// Serializing the plan response failed.
    #[error("failed to serialize plan response: {0}")]
    SerialisePlanResponse(#[source] serde_json::Error),
    /// Writing the plan to stdout failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
    /// Writing the plan to the requested output file failed.
    #[error("failed to write plan to {path:?}: {source}")]
    WritePlanFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A logger was already installed for this process.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}

impl CliError {
    /// Process exit code for this failure.
    ///
    /// Problems with the caller's arguments, configuration or request map to
    /// [`EXIT_CLIENT_ERROR`]; everything else is [`EXIT_INTERNAL_ERROR`].
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_client_error() {
            EXIT_CLIENT_ERROR
        } else {
            EXIT_INTERNAL_ERROR
        }
    }

    const fn is_client_error(&self) -> bool {
        match self {
            Self::ArgumentParsing(_)
            | Self::Configuration(_)
            | Self::MissingArgument { .. }
            | Self::MissingSourceFile { .. }
            | Self::SourcePathNotFile { .. }
            | Self::OpenPlanRequest { .. }
            | Self::ParsePlanRequest { .. }
            | Self::InvalidPlanRequest { .. } => true,
            Self::Plan { source } => source.is_client_error(),
            Self::InspectSourcePath { .. }
            | Self::SerialisePlanResponse(_)
            | Self::WritePlanOutput(_)
            | Self::WritePlanFile { .. }
            | Self::Logging(_) => false,
        }
    }
}
