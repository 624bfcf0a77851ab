//! Configuration management for batch generation
//!
//! Every constant baked into the generated script is a field here, with the
//! defaults producing a Pandoc DOCX to Markdown batch file named
//! `convert_to_md.bat`. A `docbatch.toml` in the scanned root can override
//! any of them.

use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    BatchError,
    BatchResult,
};

/// Default name of the generated script
pub const DEFAULT_SCRIPT_NAME: &str = "convert_to_md.bat";

/// Configuration file names looked up under the root, in order
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    "docbatch.toml",
    ".docbatch.toml",
    ".config/docbatch.toml",
];

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Extension of the documents to convert, without the dot
    pub source_extension: String,
    /// Extension substituted into each output path, without the dot
    pub output_extension: String,
    /// File name of the script written into the root
    pub script_name:      String,
    /// External converter invocation
    pub converter:        ConverterConfig,
    /// Order in which candidates appear in the script
    pub order:            TraversalOrder,
    /// How candidate paths are written into the script
    pub path_style:       PathStyle,
    /// Extension matching case rules
    pub case:             CaseSensitivity,
    /// Line terminator of the generated script
    pub line_ending:      LineEnding,
    /// Descend into symlinked directories
    pub follow_links:     bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            source_extension: "docx".to_string(),
            output_extension: "md".to_string(),
            script_name:      DEFAULT_SCRIPT_NAME.to_string(),
            converter:        ConverterConfig::default(),
            order:            TraversalOrder::default(),
            path_style:       PathStyle::default(),
            case:             CaseSensitivity::default(),
            line_ending:      LineEnding::default(),
            follow_links:     false,
        }
    }
}

/// The external converter each script line invokes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Program name or path
    pub program:      String,
    /// Name shown in the script's progress message
    pub display_name: String,
    /// Value passed to `-f`
    pub from:         String,
    /// Value passed to `-t`, including format extensions
    pub to:           String,
    /// Flags placed between the format flags and `-o`
    pub extra_args:   Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program:      "pandoc".to_string(),
            display_name: "Pandoc".to_string(),
            from:         "docx".to_string(),
            to:           "markdown-simple_tables".to_string(),
            extra_args:   vec!["--wrap=none".to_string()],
        }
    }
}

/// Candidate ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Depth-first, entries of each directory sorted by file name
    #[default]
    Sorted,
    /// Whatever order the directory listing yields
    Traversal,
}

/// Rendering of candidate paths inside the script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Relative to the root, for a script run from the root
    #[default]
    Relative,
    /// The root joined with the relative path
    Joined,
}

/// Extension matching rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseSensitivity {
    /// Insensitive on Windows, sensitive elsewhere
    #[default]
    Platform,
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    /// Whether the match ignores ASCII case on this platform
    pub fn ignores_case(self) -> bool {
        match self {
            CaseSensitivity::Platform => cfg!(windows),
            CaseSensitivity::Sensitive => false,
            CaseSensitivity::Insensitive => true,
        }
    }
}

/// Script line terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// CRLF on Windows, LF elsewhere
    #[default]
    Platform,
    Lf,
    Crlf,
}

impl LineEnding {
    /// The terminator string
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Platform => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            },
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

impl BatchConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str, origin: &Path) -> BatchResult<Self> {
        let config: BatchConfig = toml::from_str(content).map_err(|source| BatchError::Config {
            path: origin.to_path_buf(),
            source,
        })?;
        config.normalized()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> BatchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BatchError::io(path, e))?;
        Self::from_toml_str(&content, path)
    }

    /// Find the configuration file under `root`, if there is one
    pub fn find_file(root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
    }

    /// Load the first configuration file found under `root`, or defaults
    pub fn discover(root: &Path) -> BatchResult<Self> {
        match Self::find_file(root) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Strip leading dots from extensions and check the result is usable
    pub fn normalized(mut self) -> BatchResult<Self> {
        self.source_extension = self.source_extension.trim_start_matches('.').to_string();
        self.output_extension = self.output_extension.trim_start_matches('.').to_string();
        self.validate()?;
        Ok(self)
    }

    /// Check the configuration can produce a script
    pub fn validate(&self) -> BatchResult<()> {
        if self.source_extension.is_empty() {
            return Err(BatchError::InvalidConfig(
                "source_extension must not be empty".to_string(),
            ));
        }
        if self.output_extension.is_empty() {
            return Err(BatchError::InvalidConfig(
                "output_extension must not be empty".to_string(),
            ));
        }
        if self.converter.program.trim().is_empty() {
            return Err(BatchError::InvalidConfig(
                "converter.program must not be empty".to_string(),
            ));
        }

        let name = Path::new(&self.script_name);
        let is_bare_name = name.file_name().map(|n| n == name.as_os_str()).unwrap_or(false);
        if !is_bare_name {
            return Err(BatchError::InvalidConfig(format!(
                "script_name must be a plain file name, got {:?}",
                self.script_name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert_eq!(config.source_extension, "docx");
        assert_eq!(config.output_extension, "md");
        assert_eq!(config.script_name, "convert_to_md.bat");
        assert_eq!(config.converter.program, "pandoc");
        assert_eq!(config.converter.extra_args, vec!["--wrap=none"]);
        assert_eq!(config.order, TraversalOrder::Sorted);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let content = r#"
source_extension = ".odt"
order = "traversal"

[converter]
from = "odt"
extra_args = []
        "#;

        let config = BatchConfig::from_toml_str(content, Path::new("docbatch.toml")).unwrap();
        assert_eq!(config.source_extension, "odt");
        assert_eq!(config.output_extension, "md");
        assert_eq!(config.order, TraversalOrder::Traversal);
        assert_eq!(config.converter.from, "odt");
        assert_eq!(config.converter.program, "pandoc");
        assert!(config.converter.extra_args.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = BatchConfig::from_toml_str("sorce_extension = \"doc\"", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(err, BatchError::Config { .. }));
    }

    #[test]
    fn test_script_name_must_be_bare() {
        let config = BatchConfig {
            script_name: "sub/convert.bat".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BatchError::InvalidConfig(_))
        ));

        let config = BatchConfig {
            script_name: "..".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_extension_rejected() {
        let config = BatchConfig {
            output_extension: ".".to_string(),
            ..Default::default()
        };
        assert!(config.normalized().is_err());
    }

    #[test]
    fn test_discover_finds_hidden_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".docbatch.toml"), "output_extension = \"txt\"\n")
            .unwrap();

        let config = BatchConfig::discover(dir.path()).unwrap();
        assert_eq!(config.output_extension, "txt");
    }

    #[test]
    fn test_discover_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(BatchConfig::discover(dir.path()).unwrap(), BatchConfig::default());
    }

    #[test]
    fn test_explicit_line_endings() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::Crlf.as_str(), "\r\n");
        assert!(!CaseSensitivity::Sensitive.ignores_case());
        assert!(CaseSensitivity::Insensitive.ignores_case());
    }
}
