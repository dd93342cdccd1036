//! Directory archiving into timestamped zip files.
//!
//! An archive captures a whole directory tree, preserving relative paths
//! inside the zip. Names never collide: the timestamp makes the common
//! case unique and a numeric suffix covers sub-second repeats. Existing
//! archives are never overwritten.
//!
//! Symlinks are followed and archived as the content they resolve to;
//! broken links are skipped with a recorded warning. The destination
//! directory is excluded from the walk, so an archive written inside the
//! source tree cannot end up containing itself.

use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::name::sanitize_name;

/// Archive error type
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("source directory not found or not a directory: {0}")]
    SourceNotFound(PathBuf),

    #[error("cannot write archive destination {path}: {source}")]
    Destination {
        path: PathBuf,
        source: io::Error,
    },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Timestamp embedded in archive file names
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Container extension for produced archives
pub const ARCHIVE_EXTENSION: &str = "zip";

/// One completed archive operation
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    pub source_path: PathBuf,
    pub destination_dir: PathBuf,
    pub base_name: String,
    pub archive_path: PathBuf,
    pub created_at: DateTime<Local>,
    pub files_archived: usize,
    /// Non-fatal problems encountered (broken symlinks, unreadable files)
    pub warnings: Vec<String>,
}

/// Archive `source_dir` into `destination_dir` as `<name>_<timestamp>.zip`.
///
/// The destination directory is created if needed. Fails with
/// [`ArchiveError::SourceNotFound`] when the source is missing and
/// [`ArchiveError::Destination`] when the destination cannot be written.
pub fn archive(source_dir: &Path, destination_dir: &Path, name: &str) -> Result<ArchiveJob> {
    if !source_dir.is_dir() {
        return Err(ArchiveError::SourceNotFound(source_dir.to_path_buf()));
    }

    fs::create_dir_all(destination_dir).map_err(|e| ArchiveError::Destination {
        path: destination_dir.to_path_buf(),
        source: e,
    })?;
    // Canonical form so the walk can recognize it even via relative paths
    let exclude = destination_dir
        .canonicalize()
        .map_err(|e| ArchiveError::Destination {
            path: destination_dir.to_path_buf(),
            source: e,
        })?;

    let mut base_name = sanitize_name(name);
    if base_name.is_empty() {
        base_name = "archive".to_string();
    }

    let created_at = Local::now();
    let timestamp = created_at.format(TIMESTAMP_FORMAT).to_string();
    let archive_path = unique_archive_path(destination_dir, &base_name, &timestamp);

    let file = File::create(&archive_path).map_err(|e| ArchiveError::Destination {
        path: archive_path.clone(),
        source: e,
    })?;

    match write_tree(source_dir, file, &exclude) {
        Ok((files_archived, warnings)) => {
            info!(
                source = %source_dir.display(),
                archive = %archive_path.display(),
                files = files_archived,
                "archive complete"
            );
            Ok(ArchiveJob {
                source_path: source_dir.to_path_buf(),
                destination_dir: destination_dir.to_path_buf(),
                base_name,
                archive_path,
                created_at,
                files_archived,
                warnings,
            })
        }
        Err(err) => {
            // Don't leave a truncated zip behind
            let _ = fs::remove_file(&archive_path);
            Err(err)
        }
    }
}

/// Pick a non-colliding archive path in `destination_dir`.
///
/// Tries `<base>_<ts>.zip` first, then `<base>_<ts>_1.zip`, `_2`, ...
fn unique_archive_path(destination_dir: &Path, base_name: &str, timestamp: &str) -> PathBuf {
    let candidate =
        destination_dir.join(format!("{}_{}.{}", base_name, timestamp, ARCHIVE_EXTENSION));
    if !candidate.exists() {
        return candidate;
    }
    let mut counter = 1u32;
    loop {
        let candidate = destination_dir.join(format!(
            "{}_{}_{}.{}",
            base_name, timestamp, counter, ARCHIVE_EXTENSION
        ));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Zip entry names always use forward slashes, regardless of platform.
fn zip_entry_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// True when `path` resolves to `exclude` or something below it.
///
/// Unresolvable paths (broken symlinks) are not excluded; the walk will
/// surface them as warnings through its normal error handling.
fn is_under(path: &Path, exclude: &Path) -> bool {
    match path.canonicalize() {
        Ok(canonical) => canonical.starts_with(exclude),
        Err(_) => false,
    }
}

fn write_tree(source_dir: &Path, file: File, exclude: &Path) -> Result<(usize, Vec<String>)> {
    let mut zip = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut files_archived = 0usize;
    let mut warnings = Vec::new();

    // The destination may sit inside the source; skipping it keeps the
    // growing zip out of its own archive.
    let walker = WalkDir::new(source_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_under(entry.path(), exclude));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Broken symlinks and vanished entries land here
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| source_dir.display().to_string());
                warn!(path = %path, error = %err, "skipping unreadable entry");
                warnings.push(format!("{}: {}", path, err));
                continue;
            }
        };

        let rel = match entry.path().strip_prefix(source_dir) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue, // the root itself
        };
        let entry_name = zip_entry_name(rel);

        if entry.file_type().is_dir() {
            zip.add_directory(&entry_name, options)?;
        } else if entry.file_type().is_file() {
            let mut source = match File::open(entry.path()) {
                Ok(f) => f,
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "skipping unreadable file");
                    warnings.push(format!("{}: {}", entry.path().display(), err));
                    continue;
                }
            };
            zip.start_file(&entry_name, options)?;
            io::copy(&mut source, &mut zip)?;
            files_archived += 1;
        }
    }

    zip.finish()?;
    Ok((files_archived, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populate_source(dir: &Path) {
        fs::create_dir_all(dir.join("data/raw")).unwrap();
        fs::write(dir.join("notes.txt"), "top level").unwrap();
        fs::write(dir.join("data/raw/reads.fastq"), "@read1\nACGT\n+\n!!!!").unwrap();
    }

    #[test]
    fn test_archive_creates_named_zip() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("My Project");
        populate_source(&source);
        let dest = temp.path().join("archives");

        let job = archive(&source, &dest, "My Project").unwrap();

        assert!(job.archive_path.exists());
        let file_name = job.archive_path.file_name().unwrap().to_string_lossy();
        assert!(file_name.starts_with("My_Project_"));
        assert!(file_name.ends_with(".zip"));
        assert_eq!(job.files_archived, 2);
        assert!(job.warnings.is_empty());
    }

    #[test]
    fn test_archive_preserves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        populate_source(&source);
        let dest = temp.path().join("out");

        let job = archive(&source, &dest, "proj").unwrap();

        let reader = File::open(&job.archive_path).unwrap();
        let mut zip = zip::ZipArchive::new(reader).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"notes.txt".to_string()));
        assert!(names.contains(&"data/raw/reads.fastq".to_string()));
    }

    #[test]
    fn test_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = archive(
            &temp.path().join("nope"),
            &temp.path().join("out"),
            "x",
        );
        assert!(matches!(result, Err(ArchiveError::SourceNotFound(_))));
    }

    #[test]
    fn test_source_must_be_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("flat.txt");
        fs::write(&file, "not a dir").unwrap();
        let result = archive(&file, &temp.path().join("out"), "x");
        assert!(matches!(result, Err(ArchiveError::SourceNotFound(_))));
    }

    #[test]
    fn test_unwritable_destination_fails() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        populate_source(&source);
        // A regular file where the destination dir should be
        let dest = temp.path().join("blocked");
        fs::write(&dest, "file in the way").unwrap();

        let result = archive(&source, &dest, "x");
        assert!(matches!(result, Err(ArchiveError::Destination { .. })));
        assert!(source.exists());
    }

    #[test]
    fn test_collision_gets_numeric_suffix() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("proj_20250101_120000.zip"), "existing").unwrap();
        fs::write(dest.join("proj_20250101_120000_1.zip"), "also existing").unwrap();

        let path = unique_archive_path(&dest, "proj", "20250101_120000");
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "proj_20250101_120000_2.zip"
        );
    }

    #[test]
    fn test_destination_inside_source_is_excluded() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        populate_source(&source);
        let dest = source.join("backups");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("earlier.zip"), "previous run").unwrap();

        let job = archive(&source, &dest, "proj").unwrap();

        assert_eq!(job.files_archived, 2);
        let reader = File::open(&job.archive_path).unwrap();
        let mut zip = zip::ZipArchive::new(reader).unwrap();
        for i in 0..zip.len() {
            let name = zip.by_index(i).unwrap().name().to_string();
            assert!(!name.starts_with("backups"), "archived its own destination: {}", name);
        }
    }

    #[test]
    fn test_repeated_archives_never_collide() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        populate_source(&source);
        let dest = temp.path().join("out");

        let first = archive(&source, &dest, "My Project").unwrap();
        let second = archive(&source, &dest, "My Project").unwrap();

        assert_ne!(first.archive_path, second.archive_path);
        assert!(first.archive_path.exists());
        assert!(second.archive_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_warning_not_error() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        populate_source(&source);
        std::os::unix::fs::symlink(
            temp.path().join("does-not-exist"),
            source.join("dangling"),
        )
        .unwrap();

        let job = archive(&source, &temp.path().join("out"), "proj").unwrap();
        assert_eq!(job.files_archived, 2);
        assert_eq!(job.warnings.len(), 1);
        assert!(job.warnings[0].contains("dangling"));
    }

    #[cfg(unix)]
    #[test]
    fn test_valid_symlink_archived_as_content() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        populate_source(&source);
        std::os::unix::fs::symlink(source.join("notes.txt"), source.join("link.txt")).unwrap();

        let job = archive(&source, &temp.path().join("out"), "proj").unwrap();
        assert_eq!(job.files_archived, 3);

        let reader = File::open(&job.archive_path).unwrap();
        let mut zip = zip::ZipArchive::new(reader).unwrap();
        let mut entry = zip.by_name("link.txt").unwrap();
        let mut content = String::new();
        io::Read::read_to_string(&mut entry, &mut content).unwrap();
        assert_eq!(content, "top level");
    }
}
