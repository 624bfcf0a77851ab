//! Configuration management utilities
//!
//! Resolves the configuration for a run: an explicit `--config` file, else
//! the first config file found under the root, else defaults. Command line
//! flags are applied on top.

use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use docbatch_core::{
    config::{
        CaseSensitivity,
        LineEnding,
        PathStyle,
        TraversalOrder,
    },
    BatchConfig,
};

/// Settings given on the command line, each overriding the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_extension: Option<String>,
    pub output_extension: Option<String>,
    pub script_name:      Option<String>,
    pub order:            Option<TraversalOrder>,
    pub path_style:       Option<PathStyle>,
    pub case:             Option<CaseSensitivity>,
    pub line_ending:      Option<LineEnding>,
    pub follow_links:     bool,
}

impl ConfigOverrides {
    /// Apply every override that was given
    pub fn apply(&self, mut config: BatchConfig) -> BatchConfig {
        if let Some(ext) = &self.source_extension {
            config.source_extension = ext.clone();
        }
        if let Some(ext) = &self.output_extension {
            config.output_extension = ext.clone();
        }
        if let Some(name) = &self.script_name {
            config.script_name = name.clone();
        }
        if let Some(order) = self.order {
            config.order = order;
        }
        if let Some(style) = self.path_style {
            config.path_style = style;
        }
        if let Some(case) = self.case {
            config.case = case;
        }
        if let Some(ending) = self.line_ending {
            config.line_ending = ending;
        }
        config.follow_links |= self.follow_links;
        config
    }
}

/// Resolved configuration and the file it came from, if any
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub config: BatchConfig,
    pub source: Option<PathBuf>,
}

/// Load the configuration for `root` and merge command line overrides
pub fn load_config(
    root: &Path,
    explicit: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<MergedConfig> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => BatchConfig::find_file(root),
    };

    let base = match &source {
        Some(path) => BatchConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => BatchConfig::default(),
    };

    let config = overrides
        .apply(base)
        .normalized()
        .context("Invalid command line options")?;

    Ok(MergedConfig { config, source })
}
