//! Batch run errors.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that abort a batch run.
///
/// Per-file problems (a scene with no animated objects, a failed export) are
/// not errors here: Blender records them as strings in the processing report.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Bad user input, detected before any work starts.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to launch {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blender ran but exited unsuccessfully.
    #[error("Blender exited with {status}")]
    ExternalProcess {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[error("invalid processing report {}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The user interrupted the run while Blender was working.
    #[error("interrupted while Blender was running")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BatchError>;
