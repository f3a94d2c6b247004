//! `blendbatch` CLI - rename and re-export Blender animation clips

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blendbatch::{BatchError, Blender, Config, NamingScheme, RunOptions};

#[derive(Parser)]
#[command(name = "blendbatch")]
#[command(about = "Process Blender animation files into studio naming schemes")]
#[command(version)]
struct Cli {
    /// Directory containing .blend files
    #[arg(long)]
    input_dir: PathBuf,

    /// Directory to export processed animations into
    #[arg(long)]
    output_dir: PathBuf,

    /// Target naming scheme for animations [default: artist]
    #[arg(long, value_enum)]
    naming_scheme: Option<NamingScheme>,

    /// Path to the Blender executable (default: search PATH)
    #[arg(long)]
    blender_path: Option<PathBuf>,

    /// Show what would be processed without running Blender
    #[arg(long)]
    dry_run: bool,

    /// Config file (default: ~/.config/blendbatch/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match cmd_process(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_process(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let options = RunOptions {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir,
        scheme: cli
            .naming_scheme
            .or(config.naming_scheme)
            .unwrap_or_default(),
        blender: Blender::resolve(cli.blender_path.or(config.blender_path)),
        dry_run: cli.dry_run,
    };

    blendbatch::run(&options).await?;

    Ok(())
}

fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<BatchError>() {
        Some(BatchError::Config(msg)) => {
            println!("❌ Error: {msg}");
        }
        Some(BatchError::ExternalProcess {
            status,
            stdout,
            stderr,
        }) => {
            println!("❌ Blender processing failed! ({status})");
            println!("STDOUT: {stdout}");
            println!("STDERR: {stderr}");
        }
        Some(BatchError::Interrupted) => {
            println!("\n🛑 Interrupted, Blender stopped and temporary script removed.");
        }
        _ => {
            println!("❌ {err:#}");
        }
    }
}
