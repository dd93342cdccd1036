//! Rule-driven file classification and relocation.
//!
//! The organizer looks only at the immediate children of the root it is
//! given: it never descends into subdirectories (including the category
//! directories it creates) and ignores hidden entries. Moves never
//! overwrite; a destination collision gets a numeric suffix. Per-file
//! failures are collected into the report instead of aborting the batch,
//! so a single unreadable file cannot stop the rest.

pub mod rules;

pub use rules::{CategoryRule, Matcher, RuleSet};

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Organize error type (batch-level; per-file failures go in the report)
#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("organize root not found or not a directory: {0}")]
    RootNotFound(PathBuf),

    #[error("keyword '{0}' contains no usable characters")]
    EmptyKeyword(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, OrganizeError>;

/// Classification mode for one organize pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeMode {
    /// Scientific formats only
    Science,
    /// Case-insensitive filename keyword
    Keyword(String),
    /// Science plus generic categories (images, videos, documents, archives)
    All,
}

/// A successfully relocated file
#[derive(Debug, Clone, Serialize)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
    pub category: String,
}

/// A file deliberately left in place
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// A file that could not be moved
#[derive(Debug, Clone, Serialize)]
pub struct OrganizeFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of one organize pass: a partial-success batch report
#[derive(Debug, Default, Serialize)]
pub struct OrganizeReport {
    pub moved: Vec<MovedFile>,
    pub skipped: Vec<SkippedFile>,
    pub failed: Vec<OrganizeFailure>,
}

impl OrganizeReport {
    pub fn summary(&self) -> String {
        format!(
            "{} moved, {} skipped, {} failed",
            self.moved.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }
}

/// File organizer: holds the rule table for one configuration
#[derive(Debug)]
pub struct FileOrganizer {
    rules: RuleSet,
}

impl FileOrganizer {
    /// Build an organizer from a mode, using the builtin tables.
    ///
    /// A keyword must survive sanitization; otherwise its target directory
    /// would be the root itself and matched files would churn in place.
    pub fn new(mode: OrganizeMode) -> Result<Self> {
        let rules = match &mode {
            OrganizeMode::Science => RuleSet::science(),
            OrganizeMode::Keyword(kw) => {
                if crate::name::sanitize_name(kw).is_empty() {
                    return Err(OrganizeError::EmptyKeyword(kw.clone()));
                }
                RuleSet::keyword(kw)
            }
            OrganizeMode::All => RuleSet::general(),
        };
        Ok(Self { rules })
    }

    /// Build an organizer from an explicit rule table.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Classify and relocate the files directly under `root`.
    ///
    /// Every discoverable file is attempted; the report records what was
    /// moved, what was left alone and why, and what failed.
    pub fn organize(&self, root: &Path) -> Result<OrganizeReport> {
        if !root.is_dir() {
            return Err(OrganizeError::RootNotFound(root.to_path_buf()));
        }

        // Snapshot the listing up front so files we move are not revisited
        let mut entries: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            entries.push(entry.path());
        }
        entries.sort();

        let mut report = OrganizeReport::default();

        for path in entries {
            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    report.skipped.push(SkippedFile {
                        path,
                        reason: "non-UTF-8 file name".to_string(),
                    });
                    continue;
                }
            };

            if file_name.starts_with('.') {
                debug!(name = %file_name, "skipping hidden entry");
                continue;
            }
            if path.is_dir() {
                // Category directories (ours or pre-existing) stay untouched
                continue;
            }

            let category = match self.rules.target_for(&file_name) {
                Some(category) => category.to_string(),
                None => {
                    report.skipped.push(SkippedFile {
                        path,
                        reason: "no matching rule".to_string(),
                    });
                    continue;
                }
            };

            match move_into_category(root, &path, &file_name, &category) {
                Ok(dest) => {
                    info!(from = %path.display(), to = %dest.display(), "moved");
                    report.moved.push(MovedFile {
                        from: path,
                        to: dest,
                        category,
                    });
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to move");
                    report.failed.push(OrganizeFailure {
                        path,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

fn move_into_category(
    root: &Path,
    path: &Path,
    file_name: &str,
    category: &str,
) -> std::io::Result<PathBuf> {
    let target_dir = root.join(category);
    fs::create_dir_all(&target_dir)?;
    let dest = unique_destination(&target_dir, file_name);
    fs::rename(path, &dest)?;
    Ok(dest)
}

/// Pick a destination inside `dir` that does not clobber an existing file:
/// `name.ext`, then `name_1.ext`, `name_2.ext`, ...
fn unique_destination(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };

    let mut counter = 1u32;
    loop {
        let name = match ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
