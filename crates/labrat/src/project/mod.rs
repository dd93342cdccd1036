//! Project lifecycle management.
//!
//! A project is a directory containing a `labrat.json` metadata record.
//! The manager validates project types, creates project directories under
//! a parent path, lists the projects found directly under a root, and
//! handles archival and archive-then-remove deletion.
//!
//! Deletion always takes a fresh archive first. There is no bypass: if
//! the archive step fails the project directory is left untouched.

pub mod error;
pub mod metadata;

pub use error::{ProjectError, Result};
pub use metadata::{MetadataRecord, METADATA_FILE};

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::archive::{self, ArchiveJob};
use crate::config::Config;
use crate::name::sanitize_name;

/// A managed project, as reconstructed from its metadata record
#[derive(Debug, Clone)]
pub struct Project {
    /// Name as originally given
    pub name: String,
    /// Directory name derived from the given name
    pub sanitized_name: String,
    /// Directory holding the project
    pub path: PathBuf,
    pub record: MetadataRecord,
}

/// Manager for project lifecycle operations
pub struct ProjectManager {
    project_types: Vec<String>,
}

impl ProjectManager {
    /// Build a manager recognizing the given project types.
    pub fn new(project_types: Vec<String>) -> Self {
        Self { project_types }
    }

    /// Build a manager from resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.project_types.clone())
    }

    /// Recognized project types.
    pub fn project_types(&self) -> &[String] {
        &self.project_types
    }

    fn validate_type(&self, project_type: &str) -> Result<()> {
        if self.project_types.iter().any(|t| t == project_type) {
            Ok(())
        } else {
            Err(ProjectError::InvalidProjectType(project_type.to_string()))
        }
    }

    /// Create a new project directory under `parent` and write its record.
    ///
    /// The directory name is the sanitized form of `name`; creation fails
    /// if that directory already exists. The parent is created as needed.
    pub fn new_project(
        &self,
        project_type: &str,
        name: &str,
        parent: &Path,
        description: Option<String>,
        owner: &str,
    ) -> Result<Project> {
        self.validate_type(project_type)?;

        let sanitized = sanitize_name(name);
        if sanitized.is_empty() {
            return Err(ProjectError::EmptyName(name.to_string()));
        }

        fs::create_dir_all(parent)?;
        let project_dir = parent.join(&sanitized);
        if let Err(err) = fs::create_dir(&project_dir) {
            return Err(if err.kind() == std::io::ErrorKind::AlreadyExists {
                ProjectError::PathExists(project_dir)
            } else {
                err.into()
            });
        }

        let record = MetadataRecord {
            project_name: name.to_string(),
            project_type: project_type.to_string(),
            path: project_dir.clone(),
            description,
            created_at: Utc::now(),
            owner: owner.to_string(),
        };
        metadata::write(&project_dir, &record)?;

        info!(
            name = %name,
            dir = %project_dir.display(),
            project_type = %project_type,
            "created project"
        );

        Ok(Project {
            name: name.to_string(),
            sanitized_name: sanitized,
            path: project_dir,
            record,
        })
    }

    /// List the managed projects directly under `root`.
    ///
    /// Subdirectories without a readable metadata record are skipped, not
    /// errors. Results are ordered by creation time, then directory name.
    pub fn list_projects(&self, root: &Path) -> Result<Vec<Project>> {
        if !root.is_dir() {
            return Err(ProjectError::PathNotFound(root.to_path_buf()));
        }

        let mut projects = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            match metadata::read(&path) {
                Ok(record) => {
                    let sanitized_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    projects.push(Project {
                        name: record.project_name.clone(),
                        sanitized_name,
                        path,
                        record,
                    });
                }
                Err(err) => {
                    debug!(dir = %path.display(), error = %err, "skipping unmanaged directory");
                }
            }
        }

        projects.sort_by(|a, b| {
            a.record
                .created_at
                .cmp(&b.record.created_at)
                .then_with(|| a.sanitized_name.cmp(&b.sanitized_name))
        });
        Ok(projects)
    }

    /// Archive a project directory into `archive_dir`.
    ///
    /// The archive base name comes from the metadata record. A directory
    /// without a record is still archivable under its directory name, but
    /// a record that exists and cannot be parsed is fatal: the caller
    /// named this specific project and silently ignoring its metadata
    /// would hide corruption.
    pub fn archive_project(&self, project_dir: &Path, archive_dir: &Path) -> Result<ArchiveJob> {
        if !project_dir.is_dir() {
            return Err(ProjectError::PathNotFound(project_dir.to_path_buf()));
        }
        let base_name = if metadata::metadata_path(project_dir).exists() {
            metadata::read(project_dir)?.project_name
        } else {
            project_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "archive".to_string())
        };
        Ok(archive::archive(project_dir, archive_dir, &base_name)?)
    }

    /// Delete a project, archiving it first.
    ///
    /// Returns the archive job for the safety copy. The directory is only
    /// removed after the archive was written successfully.
    pub fn delete_project(&self, project_dir: &Path, archive_dir: &Path) -> Result<ArchiveJob> {
        let job = self.archive_project(project_dir, archive_dir)?;
        fs::remove_dir_all(project_dir)?;
        info!(
            dir = %project_dir.display(),
            archive = %job.archive_path.display(),
            "deleted project after archiving"
        );
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> ProjectManager {
        ProjectManager::new(vec![
            "computational-biology".to_string(),
            "data-science".to_string(),
        ])
    }

    #[test]
    fn test_new_project_creates_dir_and_record() {
        let temp = TempDir::new().unwrap();
        let project = manager()
            .new_project(
                "computational-biology",
                "KARG Analysis",
                temp.path(),
                Some("survey".to_string()),
                "rduran",
            )
            .unwrap();

        assert_eq!(project.sanitized_name, "KARG_Analysis");
        assert!(temp.path().join("KARG_Analysis").is_dir());
        let record = metadata::read(&project.path).unwrap();
        assert_eq!(record.project_name, "KARG Analysis");
        assert_eq!(record.owner, "rduran");
        assert_eq!(record.path, project.path);
    }

    #[test]
    fn test_invalid_type_rejected_before_touching_disk() {
        let temp = TempDir::new().unwrap();
        let err = manager()
            .new_project("underwater-basketry", "x", temp.path(), None, "me")
            .unwrap_err();
        assert!(matches!(err, ProjectError::InvalidProjectType(_)));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_duplicate_sanitized_name_rejected() {
        let temp = TempDir::new().unwrap();
        let mgr = manager();
        mgr.new_project("data-science", "My Project", temp.path(), None, "me")
            .unwrap();
        // Different raw name, same sanitized directory
        let err = mgr
            .new_project("data-science", "My  Project", temp.path(), None, "me")
            .unwrap_err();
        assert!(matches!(err, ProjectError::PathExists(_)));
    }

    #[test]
    fn test_all_junk_name_rejected() {
        let temp = TempDir::new().unwrap();
        let err = manager()
            .new_project("data-science", "???", temp.path(), None, "me")
            .unwrap_err();
        assert!(matches!(err, ProjectError::EmptyName(_)));
    }

    #[test]
    fn test_list_skips_unmanaged_and_sorts() {
        let temp = TempDir::new().unwrap();
        let mgr = manager();
        mgr.new_project("data-science", "beta", temp.path(), None, "me")
            .unwrap();
        mgr.new_project("data-science", "alpha", temp.path(), None, "me")
            .unwrap();
        fs::create_dir(temp.path().join("not_a_project")).unwrap();
        fs::create_dir(temp.path().join("corrupt")).unwrap();
        fs::write(temp.path().join("corrupt/labrat.json"), "{oops").unwrap();
        fs::write(temp.path().join("stray.txt"), "file, not dir").unwrap();

        let projects = mgr.list_projects(temp.path()).unwrap();
        assert_eq!(projects.len(), 2);
        // Same-second creation falls back to name ordering
        if projects[0].record.created_at == projects[1].record.created_at {
            assert_eq!(projects[0].name, "alpha");
            assert_eq!(projects[1].name, "beta");
        }
    }

    #[test]
    fn test_list_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let err = manager()
            .list_projects(&temp.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, ProjectError::PathNotFound(_)));
    }

    #[test]
    fn test_archive_uses_record_name() {
        let temp = TempDir::new().unwrap();
        let mgr = manager();
        let project = mgr
            .new_project("data-science", "My Project", temp.path().join("p").as_path(), None, "me")
            .unwrap();
        fs::write(project.path.join("data.csv"), "a,b\n1,2\n").unwrap();

        let job = mgr
            .archive_project(&project.path, &temp.path().join("arch"))
            .unwrap();
        let file_name = job.archive_path.file_name().unwrap().to_string_lossy();
        assert!(file_name.starts_with("My_Project_"));
        assert!(project.path.exists(), "archive leaves the project in place");
    }

    #[test]
    fn test_archive_unmanaged_dir_uses_dir_name() {
        let temp = TempDir::new().unwrap();
        let plain = temp.path().join("loose_data");
        fs::create_dir(&plain).unwrap();
        fs::write(plain.join("x.txt"), "x").unwrap();

        let job = manager()
            .archive_project(&plain, &temp.path().join("arch"))
            .unwrap();
        let file_name = job.archive_path.file_name().unwrap().to_string_lossy();
        assert!(file_name.starts_with("loose_data_"));
    }

    #[test]
    fn test_archive_corrupt_record_is_fatal() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("damaged");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(METADATA_FILE), "{not json").unwrap();
        let arch = temp.path().join("arch");

        let err = manager().archive_project(&dir, &arch).unwrap_err();
        assert!(matches!(err, ProjectError::Metadata { .. }));
        assert!(dir.exists());
        assert!(!arch.exists() || fs::read_dir(&arch).unwrap().count() == 0);

        // Delete inherits the same guard: nothing is removed
        let err = manager().delete_project(&dir, &arch).unwrap_err();
        assert!(matches!(err, ProjectError::Metadata { .. }));
        assert!(dir.exists());
    }

    #[test]
    fn test_delete_archives_then_removes() {
        let temp = TempDir::new().unwrap();
        let mgr = manager();
        let project = mgr
            .new_project("data-science", "Doomed", temp.path().join("p").as_path(), None, "me")
            .unwrap();
        fs::write(project.path.join("keep.txt"), "precious").unwrap();

        let job = mgr
            .delete_project(&project.path, &temp.path().join("arch"))
            .unwrap();
        assert!(!project.path.exists());
        assert!(job.archive_path.exists());
        // labrat.json plus keep.txt
        assert_eq!(job.files_archived, 2);
    }

    #[test]
    fn test_delete_missing_project_leaves_no_archive() {
        let temp = TempDir::new().unwrap();
        let arch = temp.path().join("arch");
        let err = manager()
            .delete_project(&temp.path().join("ghost"), &arch)
            .unwrap_err();
        assert!(matches!(err, ProjectError::PathNotFound(_)));
        assert!(!arch.exists() || fs::read_dir(&arch).unwrap().count() == 0);
    }
}
