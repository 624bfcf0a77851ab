//! Batch script model and rendering
//!
//! A script is a fixed header, one converter invocation per candidate and a
//! fixed footer. Rendering is pure: the same candidates and configuration
//! always produce the same bytes.

use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    config::{
        BatchConfig,
        ConverterConfig,
        LineEnding,
    },
    error::{
        BatchError,
        BatchResult,
    },
    scan::Candidate,
};

/// One converter invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionCommand {
    /// Document passed to the converter
    pub input:  String,
    /// File the converter writes
    pub output: String,
}

impl ConversionCommand {
    /// Build the command for a candidate path
    pub fn for_path(path: &Path, output_extension: &str) -> BatchResult<Self> {
        let output = path.with_extension(output_extension);
        Ok(Self {
            input:  path_to_str(path)?.to_string(),
            output: path_to_str(&output)?.to_string(),
        })
    }

    /// Render the script line, without terminator
    pub fn render(&self, converter: &ConverterConfig) -> String {
        let mut line = format!(
            "{} \"{}\" -f {} -t {}",
            converter.program, self.input, converter.from, converter.to
        );
        for arg in &converter.extra_args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push_str(&format!(" -o \"{}\"", self.output));
        line
    }
}

fn path_to_str(path: &Path) -> BatchResult<&str> {
    path.to_str().ok_or_else(|| BatchError::NonUtf8Path(path.to_path_buf()))
}

/// The complete generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchScript {
    pub header:      Vec<String>,
    pub commands:    Vec<ConversionCommand>,
    pub footer:      Vec<String>,
    pub converter:   ConverterConfig,
    pub line_ending: LineEnding,
}

impl BatchScript {
    /// Script for `candidates`, in the order given
    pub fn from_candidates(config: &BatchConfig, candidates: &[Candidate]) -> BatchResult<Self> {
        let commands = candidates
            .iter()
            .map(|c| ConversionCommand::for_path(c.path_for(config.path_style), &config.output_extension))
            .collect::<BatchResult<Vec<_>>>()?;

        Ok(Self {
            header: vec![
                "@echo off".to_string(),
                format!(
                    "echo Converting .{} files to .{} using {}...",
                    config.source_extension, config.output_extension, config.converter.display_name
                ),
            ],
            commands,
            footer: vec!["echo Done.".to_string()],
            converter: config.converter.clone(),
            line_ending: config.line_ending,
        })
    }

    /// Converter lines, one per candidate
    pub fn command_lines(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.render(&self.converter)).collect()
    }

    /// Header, blank line, commands, blank line, footer
    pub fn render(&self) -> String {
        let eol = self.line_ending.as_str();
        let mut out = String::new();

        for line in &self.header {
            out.push_str(line);
            out.push_str(eol);
        }
        out.push_str(eol);
        for line in self.command_lines() {
            out.push_str(&line);
            out.push_str(eol);
        }
        out.push_str(eol);
        for line in &self.footer {
            out.push_str(line);
            out.push_str(eol);
        }

        out
    }
}
