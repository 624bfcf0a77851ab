//! Helper modules for docbatch command handling

pub mod config;
pub mod output;

pub use config::{
    load_config,
    ConfigOverrides,
    MergedConfig,
};
pub use output::{
    should_use_colors,
    OutputFormat,
    OutputManager,
};
