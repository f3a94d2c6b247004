//! `blendbatch` - batch-rename Blender animation clips
//!
//! # Features
//!
//! - **Naming schemes**: `artist`, `legacy`, `hierarchical` and `semantic`
//!   studio conventions for clip names
//! - **Headless export**: one Blender run per batch, one glTF file per clip
//! - **Reports**: reads back Blender's `processing_report.json` and
//!   summarizes it
//!
//! # Example
//!
//! ```rust
//! use blendbatch::{convert, NamingScheme};
//!
//! assert_eq!(NamingScheme::Artist.apply("Walk_Action.001"), "Owen_Walk");
//! assert_eq!(convert("Jump_Attack", "hierarchical"), "owen.state.jump.attack.loop");
//! ```

pub mod blender;
pub mod config;
pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod report;
pub mod script;
pub mod summary;

pub use blender::{Blender, ProcessOutput};
pub use config::Config;
pub use error::{BatchError, Result};
pub use naming::{convert, preprocess, NamingScheme, UnknownScheme};
pub use orchestrator::{discover, run, ExitOutcome, RunOptions};
pub use report::{ConversionResult, FileResult, ProcessingReport, REPORT_FILE_NAME};

/// Version of blendbatch
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
