//! Core batch generator implementation

use std::path::{
    Path,
    PathBuf,
};

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    config::BatchConfig,
    error::{
        BatchError,
        BatchResult,
    },
    scan::{
        find_candidates,
        Candidate,
        ScanOptions,
    },
    script::{
        BatchScript,
        ConversionCommand,
    },
};

/// Scans one root and writes its conversion script
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    root:   PathBuf,
    config: BatchConfig,
}

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Root that was scanned
    pub root:          PathBuf,
    /// Location of the script
    pub script_path:   PathBuf,
    /// Number of documents found
    pub candidates:    usize,
    /// Every input/output pair, in script order
    pub commands:      Vec<ConversionCommand>,
    /// Size of the rendered script
    pub bytes_written: usize,
    /// Script was rendered but not written
    pub dry_run:       bool,
    /// When the run finished
    pub generated_at:  DateTime<Utc>,
}

impl GenerationReport {
    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl BatchGenerator {
    /// Create a generator for `root`, normalizing and validating `config`
    pub fn new(root: impl Into<PathBuf>, config: BatchConfig) -> BatchResult<Self> {
        Ok(Self {
            root:   root.into(),
            config: config.normalized()?,
        })
    }

    /// Generator for the current directory, configured from its config file
    pub fn for_current_dir() -> BatchResult<Self> {
        let root = PathBuf::from(".");
        let config = BatchConfig::discover(&root)?;
        Self::new(root, config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Where the script is written
    pub fn script_path(&self) -> PathBuf {
        self.root.join(&self.config.script_name)
    }

    /// Find every candidate document under the root
    pub fn scan(&self) -> BatchResult<Vec<Candidate>> {
        find_candidates(&self.root, &ScanOptions::from(&self.config))
    }

    /// Scan and assemble the script for the current tree
    pub fn build_script(&self) -> BatchResult<BatchScript> {
        let candidates = self.scan()?;
        BatchScript::from_candidates(&self.config, &candidates)
    }

    /// Rendered script text, without touching the filesystem
    pub fn preview(&self) -> BatchResult<String> {
        Ok(self.build_script()?.render())
    }

    /// Scan, render and write the script, replacing any existing file
    pub fn generate(&self) -> BatchResult<GenerationReport> {
        self.run(false)
    }

    /// Scan and render, reporting what [`generate`](Self::generate) would write
    pub fn dry_run(&self) -> BatchResult<GenerationReport> {
        self.run(true)
    }

    fn run(&self, dry_run: bool) -> BatchResult<GenerationReport> {
        let script = self.build_script()?;
        let content = script.render();
        let script_path = self.script_path();

        if !dry_run {
            std::fs::write(&script_path, content.as_bytes())
                .map_err(|e| BatchError::io(&script_path, e))?;
        }

        Ok(GenerationReport {
            root: self.root.clone(),
            script_path,
            candidates: script.commands.len(),
            commands: script.commands,
            bytes_written: content.len(),
            dry_run,
            generated_at: Utc::now(),
        })
    }
}
