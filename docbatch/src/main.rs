//! docbatch - generate a document conversion batch script
//!
//! Scans a directory tree for documents and writes `convert_to_md.bat` into
//! its root, one Pandoc invocation per document. Running the script is left
//! to the user.

use std::{
    path::PathBuf,
    process,
};

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use docbatch_core::{
    config::{
        CaseSensitivity,
        LineEnding,
        PathStyle,
        TraversalOrder,
    },
    BatchGenerator,
};

mod helpers;

use helpers::{
    load_config,
    should_use_colors,
    ConfigOverrides,
    OutputFormat,
    OutputManager,
};

/// Generate a batch file that converts every document under a directory
#[derive(Parser, Debug)]
#[command(name = "docbatch")]
#[command(
    version,
    about = "Generate a batch file converting every document in a tree",
    long_about = "
Generate a batch file converting every document in a tree

Scans ROOT recursively for .docx files and writes ROOT/convert_to_md.bat
with one pandoc invocation per file. The script is not executed.

Examples:
  docbatch                       # scan the current directory
  docbatch ./manuals --dry-run   # print the script instead of writing it
  docbatch --output json         # machine-readable summary

Configuration:
  Settings are read from docbatch.toml, .docbatch.toml or
  .config/docbatch.toml under ROOT, or from --config. Flags win over
  the file.
"
)]
struct Cli {
    /// Root directory to scan
    #[arg(env = "DOCBATCH_ROOT", default_value = ".")]
    root: PathBuf,

    /// Configuration file to use instead of the one under ROOT
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Extension of the documents to convert
    #[arg(long)]
    source_ext: Option<String>,

    /// Extension of the converted files
    #[arg(long)]
    output_ext: Option<String>,

    /// File name of the generated script
    #[arg(long)]
    script_name: Option<String>,

    /// Order of the commands in the script
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// How document paths are written into the script
    #[arg(long, value_enum)]
    path_style: Option<PathStyleArg>,

    /// Extension matching case rules
    #[arg(long, value_enum)]
    case: Option<CaseArg>,

    /// Line terminator of the script
    #[arg(long, value_enum)]
    line_ending: Option<LineEndingArg>,

    /// Descend into symlinked directories
    #[arg(long)]
    follow_links: bool,

    /// Print the script instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value = "human")]
    output: OutputFormatArg,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OrderArg {
    /// Sorted by file name within each directory (default)
    Sorted,
    /// As the filesystem lists them
    Traversal,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PathStyleArg {
    /// Relative to ROOT (default)
    Relative,
    /// ROOT joined with the relative path
    Joined,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CaseArg {
    Platform,
    Sensitive,
    Insensitive,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LineEndingArg {
    Platform,
    Lf,
    Crlf,
}

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormatArg {
    /// Human-readable format with colors (default)
    Human,
    /// JSON format for tooling
    Json,
}

impl From<OrderArg> for TraversalOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Sorted => TraversalOrder::Sorted,
            OrderArg::Traversal => TraversalOrder::Traversal,
        }
    }
}

impl From<PathStyleArg> for PathStyle {
    fn from(style: PathStyleArg) -> Self {
        match style {
            PathStyleArg::Relative => PathStyle::Relative,
            PathStyleArg::Joined => PathStyle::Joined,
        }
    }
}

impl From<CaseArg> for CaseSensitivity {
    fn from(case: CaseArg) -> Self {
        match case {
            CaseArg::Platform => CaseSensitivity::Platform,
            CaseArg::Sensitive => CaseSensitivity::Sensitive,
            CaseArg::Insensitive => CaseSensitivity::Insensitive,
        }
    }
}

impl From<LineEndingArg> for LineEnding {
    fn from(ending: LineEndingArg) -> Self {
        match ending {
            LineEndingArg::Platform => LineEnding::Platform,
            LineEndingArg::Lf => LineEnding::Lf,
            LineEndingArg::Crlf => LineEnding::Crlf,
        }
    }
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_extension: self.source_ext.clone(),
            output_extension: self.output_ext.clone(),
            script_name:      self.script_name.clone(),
            order:            self.order.map(Into::into),
            path_style:       self.path_style.map(Into::into),
            case:             self.case.map(Into::into),
            line_ending:      self.line_ending.map(Into::into),
            follow_links:     self.follow_links,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let format: OutputFormat = cli.output.into();
    let output = OutputManager::new(format)
        .with_color(should_use_colors(format, cli.no_color))
        .with_verbose(cli.verbose);

    if let Err(e) = run(&cli, &output) {
        output.error(&format!("{:#}", e));
        process::exit(1);
    }
}

fn run(cli: &Cli, output: &OutputManager) -> Result<()> {
    let merged = load_config(&cli.root, cli.config.as_deref(), &cli.overrides())?;
    let generator = BatchGenerator::new(cli.root.clone(), merged.config)
        .context("Failed to initialize generator")?;

    if cli.dry_run && output.format() == OutputFormat::Human {
        // The script is the whole output
        let script = generator
            .preview()
            .with_context(|| format!("Failed to scan {}", generator.root().display()))?;
        print!("{}", script);
        return Ok(());
    }

    if let Some(source) = &merged.source {
        output.detail(&format!("Using configuration from {}", source.display()));
    }
    output.detail(&format!(
        "Scanning {} for .{} files...",
        generator.root().display(),
        generator.config().source_extension
    ));

    let report = (if cli.dry_run { generator.dry_run() } else { generator.generate() })
        .with_context(|| format!("Failed to generate {}", generator.script_path().display()))?;

    if report.candidates == 0 {
        output.warning(&format!(
            "No .{} files found under {}",
            generator.config().source_extension,
            generator.root().display()
        ));
    }
    output.report(&report)
}
