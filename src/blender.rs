//! Headless Blender subprocess.
//!
//! Runs `blender --background --python <script> -- <input> <output> <scheme>`
//! and waits for it. There is no timeout: a hung Blender hangs the run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{BatchError, Result};
use crate::naming::NamingScheme;

/// Captured result of a finished Blender process.
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Handle to a Blender executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blender {
    program: PathBuf,
}

impl Blender {
    /// Use `explicit` if given, otherwise search `PATH` for `blender`.
    ///
    /// When the search fails the bare name is kept and the OS gets the final
    /// say at spawn time.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let program = explicit.unwrap_or_else(|| {
            which::which("blender").unwrap_or_else(|_| PathBuf::from("blender"))
        });
        Self { program }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command-line arguments, excluding the program itself.
    pub fn args(
        script: &Path,
        input_dir: &Path,
        output_dir: &Path,
        scheme: NamingScheme,
    ) -> Vec<OsString> {
        vec![
            "--background".into(),
            "--python".into(),
            script.into(),
            "--".into(),
            input_dir.into(),
            output_dir.into(),
            scheme.as_str().into(),
        ]
    }

    /// Run the script to completion, capturing both output streams.
    ///
    /// A non-zero exit is reported as [`BatchError::ExternalProcess`].
    /// Dropping the returned future kills Blender.
    pub async fn run(
        &self,
        script: &Path,
        input_dir: &Path,
        output_dir: &Path,
        scheme: NamingScheme,
    ) -> Result<ProcessOutput> {
        let args = Self::args(script, input_dir, output_dir, scheme);
        debug!(program = %self.program.display(), ?args, "launching Blender");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| BatchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let result = ProcessOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.status.success() {
            return Err(BatchError::ExternalProcess {
                status: result.status,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }

        info!(status = %result.status, "Blender finished");
        Ok(result)
    }
}
