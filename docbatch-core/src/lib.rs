//! docbatch core - document conversion batch script generation
//!
//! This library scans a directory tree for documents with a given extension
//! and renders a Windows batch file that runs an external converter (Pandoc
//! by default) once per document. It never runs the converter itself.
//!
//! # Architecture
//!
//! A [`BatchGenerator`] owns the root and a [`BatchConfig`] and runs a single
//! linear pass:
//!
//! - **Scan**: recursive walk collecting [`scan::Candidate`] documents
//! - **Render**: [`script::BatchScript`] turns candidates into script text
//! - **Write**: the text replaces `<root>/convert_to_md.bat`
//!
//! ```no_run
//! use docbatch_core::{BatchConfig, BatchGenerator};
//!
//! let generator = BatchGenerator::new("docs", BatchConfig::default())?;
//! let report = generator.generate()?;
//! println!("{} documents", report.candidates);
//! # Ok::<(), docbatch_core::BatchError>(())
//! ```

#![forbid(unsafe_code)]
// Lints configured in Cargo.toml

pub mod config;
pub mod error;
pub mod generator;
pub mod scan;
pub mod script;

pub use config::BatchConfig;
pub use error::{
    BatchError,
    BatchResult,
};
pub use generator::{
    BatchGenerator,
    GenerationReport,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
