//! Batch run: discover scenes, hand them to Blender, summarize the report.
//!
//! Blender is started once per run and iterates the scene files itself.
//! The generated script lives in the output directory only while Blender
//! runs; it is removed on every exit path, including errors.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::blender::Blender;
use crate::error::{BatchError, Result};
use crate::naming::NamingScheme;
use crate::report::ProcessingReport;
use crate::script::{TempScript, SCENE_EXTENSION};
use crate::summary;

/// Inputs for one batch run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub scheme: NamingScheme,
    pub blender: Blender,
    /// List what would be processed and stop.
    pub dry_run: bool,
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitOutcome {
    /// The input directory holds no scene files; nothing was done.
    NoSceneFiles,
    /// Discovery only.
    DryRun { files: Vec<PathBuf> },
    /// Blender succeeded. `report` is `None` when it wrote none.
    Completed { report: Option<ProcessingReport> },
}

/// List the scene files directly inside `input_dir`, sorted by path.
pub fn discover(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SCENE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run a batch.
///
/// # Errors
///
/// [`BatchError::Config`] if the input directory does not exist or is not a
/// directory, [`BatchError::ExternalProcess`] if Blender exits
/// unsuccessfully, [`BatchError::Interrupted`] on Ctrl-C, plus IO and report
/// decoding failures. No summary is printed on any error.
pub async fn run(options: &RunOptions) -> Result<ExitOutcome> {
    let RunOptions {
        input_dir,
        output_dir,
        scheme,
        blender,
        dry_run,
    } = options;

    if !input_dir.exists() {
        return Err(BatchError::Config(format!(
            "input directory '{}' does not exist",
            input_dir.display()
        )));
    }
    if !input_dir.is_dir() {
        return Err(BatchError::Config(format!(
            "input path '{}' is not a directory",
            input_dir.display()
        )));
    }

    let files = discover(input_dir)?;
    if files.is_empty() {
        warn!(dir = %input_dir.display(), "no .{SCENE_EXTENSION} files found");
        println!(
            "⚠️  No .{SCENE_EXTENSION} files found in '{}'",
            input_dir.display()
        );
        return Ok(ExitOutcome::NoSceneFiles);
    }

    println!("🔎 Found {} .{SCENE_EXTENSION} files to process:", files.len());
    for file in &files {
        let name = file.file_name().unwrap_or(file.as_os_str());
        println!("   • {}", name.to_string_lossy());
    }

    if *dry_run {
        println!(
            "\n✨ Dry run complete. Would process {} files with {scheme} scheme.",
            files.len()
        );
        return Ok(ExitOutcome::DryRun { files });
    }

    std::fs::create_dir_all(output_dir)?;

    let report_path = ProcessingReport::path_in(output_dir);
    if report_path.exists() {
        debug!(path = %report_path.display(), "removing stale report");
        std::fs::remove_file(&report_path)?;
    }

    let script = TempScript::create_in(output_dir)?;

    println!("\n🎬 Processing animations with Blender...");
    println!("   Input: {}", input_dir.display());
    println!("   Output: {}", output_dir.display());
    println!("   Scheme: {scheme}");
    info!(
        blender = %blender.program().display(),
        files = files.len(),
        %scheme,
        "invoking Blender"
    );

    // Ctrl-C drops the Blender future, which kills the child; `script` is
    // then dropped on the way out.
    let output = tokio::select! {
        biased;
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("interrupted, stopping Blender");
            return Err(BatchError::Interrupted);
        }
        result = blender.run(script.path(), input_dir, output_dir, *scheme) => result?,
    };
    drop(script);

    println!("✅ Blender processing completed successfully!");
    let stdout = output.stdout.trim_end();
    if !stdout.is_empty() {
        println!("{stdout}");
    }

    let report = ProcessingReport::load(&report_path)?;
    match &report {
        Some(report) => {
            for mismatch in report.mismatched_names() {
                warn!(
                    action = %mismatch.action,
                    reported = %mismatch.reported,
                    expected = %mismatch.expected,
                    "Blender script named a clip differently from the converter"
                );
            }
            println!("\n{}", summary::render(report));
        }
        None => debug!(path = %report_path.display(), "Blender wrote no report"),
    }

    Ok(ExitOutcome::Completed { report })
}
