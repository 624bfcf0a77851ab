//! Output management for human and JSON modes

use atty::Stream;
use colored::{
    Color,
    Colorize,
};
use docbatch_core::GenerationReport;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable status lines (default)
    Human,
    /// A single JSON document for tooling
    Json,
}

/// Colour is used only for human output on a terminal
pub fn should_use_colors(format: OutputFormat, no_color: bool) -> bool {
    format == OutputFormat::Human && !no_color && atty::is(Stream::Stdout)
}

/// Prints status lines and reports in the selected format
#[derive(Debug, Clone)]
pub struct OutputManager {
    format:  OutputFormat,
    colored: bool,
    verbose: bool,
}

impl OutputManager {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colored: false,
            verbose: false,
        }
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn status(&self, icon: &str, color: Color, message: &str) -> String {
        if self.colored {
            format!("{} {}", icon.color(color), message)
        } else {
            format!("{} {}", icon, message)
        }
    }

    /// Progress line, human mode with `--verbose` only
    pub fn detail(&self, message: &str) {
        if self.format == OutputFormat::Human && self.verbose {
            println!("{}", self.status("🔍", Color::BrightBlue, message));
        }
    }

    pub fn success(&self, message: &str) {
        if self.format == OutputFormat::Human {
            println!("{}", self.status("✅", Color::BrightGreen, message));
        }
    }

    pub fn warning(&self, message: &str) {
        if self.format == OutputFormat::Human {
            println!("{}", self.status("⚠️", Color::BrightYellow, message));
        }
    }

    /// Failures always go to stderr; JSON mode emits an error document
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Human => {
                eprintln!("{}", self.status("❌", Color::BrightRed, message));
            },
            OutputFormat::Json => {
                let value = serde_json::json!({ "success": false, "error": message });
                eprintln!("{}", value);
            },
        }
    }

    /// Summary lines for a finished run
    pub fn report_lines(&self, report: &GenerationReport) -> Vec<String> {
        let mut lines = Vec::new();

        if self.verbose {
            for command in &report.commands {
                lines.push(format!("  ✓ {} → {}", command.input, command.output));
            }
        }

        let verb = if report.dry_run { "Would write" } else { "Wrote" };
        lines.push(format!(
            "{} {} with {} conversion command{}",
            verb,
            report.script_path.display(),
            report.candidates,
            if report.candidates == 1 { "" } else { "s" }
        ));
        lines
    }

    /// Print the report of a finished run
    pub fn report(&self, report: &GenerationReport) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", report.to_json()?);
            },
            OutputFormat::Human => {
                let lines = self.report_lines(report);
                if let Some((summary, details)) = lines.split_last() {
                    for line in details {
                        println!("{}", line);
                    }
                    self.success(summary);
                }
            },
        }
        Ok(())
    }
}
