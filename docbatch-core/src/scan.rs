//! Recursive discovery of candidate documents

use std::{
    ffi::OsStr,
    path::{
        Path,
        PathBuf,
    },
};

use walkdir::WalkDir;

use crate::{
    config::{
        BatchConfig,
        CaseSensitivity,
        PathStyle,
        TraversalOrder,
    },
    error::{
        BatchError,
        BatchResult,
    },
};

/// A document found under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path as walked, i.e. the root joined with `relative`
    pub path:     PathBuf,
    /// Path relative to the root
    pub relative: PathBuf,
}

impl Candidate {
    /// The path to embed in the script for the given style
    pub fn path_for(&self, style: PathStyle) -> &Path {
        match style {
            PathStyle::Relative => &self.relative,
            PathStyle::Joined => &self.path,
        }
    }
}

/// Matching rules for one scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extension:    String,
    pub case:         CaseSensitivity,
    pub order:        TraversalOrder,
    pub follow_links: bool,
}

impl From<&BatchConfig> for ScanOptions {
    fn from(config: &BatchConfig) -> Self {
        Self {
            extension:    config.source_extension.clone(),
            case:         config.case,
            order:        config.order,
            follow_links: config.follow_links,
        }
    }
}

/// Whether `file_name` ends with `.<extension>`
///
/// This is a suffix match on the raw name, so `.docx` on its own and
/// `report.final.docx` both match `docx`.
pub fn matches_extension(file_name: &OsStr, extension: &str, case: CaseSensitivity) -> bool {
    let name = file_name.as_encoded_bytes();
    let suffix = format!(".{}", extension);
    let suffix = suffix.as_bytes();

    if name.len() < suffix.len() {
        return false;
    }
    let tail = &name[name.len() - suffix.len()..];

    if case.ignores_case() {
        tail.eq_ignore_ascii_case(suffix)
    } else {
        tail == suffix
    }
}

/// Walk `root` and collect every non-directory entry matching the extension
pub fn find_candidates(root: &Path, options: &ScanOptions) -> BatchResult<Vec<Candidate>> {
    let mut walker = WalkDir::new(root).min_depth(1).follow_links(options.follow_links);
    if options.order == TraversalOrder::Sorted {
        walker = walker.sort_by_file_name();
    }

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| BatchError::Scan {
            path: source.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        // A link to a directory is a directory even when links are not followed
        if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
            continue;
        }
        if !matches_extension(entry.file_name(), &options.extension, options.case) {
            continue;
        }

        let path = entry.into_path();
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        candidates.push(Candidate { path, relative });
    }

    Ok(candidates)
}
