//! Per-project metadata persistence.
//!
//! Every managed project directory carries a `labrat.json` at its root.
//! The record is the source of truth for listings and archive naming; a
//! directory without one (or with an unreadable one) is not considered a
//! managed project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ProjectError, Result};

/// File name of the metadata record inside a project directory
pub const METADATA_FILE: &str = "labrat.json";

/// The on-disk metadata record for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Human-readable name as originally given
    pub project_name: String,
    /// Project type, validated at creation time
    pub project_type: String,
    /// Absolute path of the project directory when created
    pub path: PathBuf,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
    /// Who created the project
    pub owner: String,
}

/// Path of the metadata file for a project directory
pub fn metadata_path(project_dir: &Path) -> PathBuf {
    project_dir.join(METADATA_FILE)
}

/// Write the record into `project_dir`, replacing any existing record.
pub fn write(project_dir: &Path, record: &MetadataRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record).map_err(|e| ProjectError::Metadata {
        dir: project_dir.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(metadata_path(project_dir), json)?;
    Ok(())
}

/// Read the record from `project_dir`.
///
/// Absent and malformed files both map to [`ProjectError::Metadata`] so
/// callers can treat "not a managed project" uniformly.
pub fn read(project_dir: &Path) -> Result<MetadataRecord> {
    let path = metadata_path(project_dir);
    let content = fs::read_to_string(&path).map_err(|e| ProjectError::Metadata {
        dir: project_dir.to_path_buf(),
        message: format!("cannot read {}: {}", METADATA_FILE, e),
    })?;
    serde_json::from_str(&content).map_err(|e| ProjectError::Metadata {
        dir: project_dir.to_path_buf(),
        message: format!("malformed {}: {}", METADATA_FILE, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record(dir: &Path) -> MetadataRecord {
        MetadataRecord {
            project_name: "KARG Analysis".to_string(),
            project_type: "computational-biology".to_string(),
            path: dir.to_path_buf(),
            description: Some("resistance gene survey".to_string()),
            created_at: Utc::now(),
            owner: "rduran".to_string(),
        }
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let record = sample_record(temp.path());

        write(temp.path(), &record).unwrap();
        let loaded = read(temp.path()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_missing_file_is_metadata_error() {
        let temp = TempDir::new().unwrap();
        let err = read(temp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::Metadata { .. }));
    }

    #[test]
    fn test_malformed_json_is_metadata_error() {
        let temp = TempDir::new().unwrap();
        fs::write(metadata_path(temp.path()), "{not json").unwrap();
        let err = read(temp.path()).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_description_omitted_when_none() {
        let temp = TempDir::new().unwrap();
        let mut record = sample_record(temp.path());
        record.description = None;

        write(temp.path(), &record).unwrap();
        let raw = fs::read_to_string(metadata_path(temp.path())).unwrap();
        assert!(!raw.contains("description"));
        assert_eq!(read(temp.path()).unwrap(), record);
    }
}
