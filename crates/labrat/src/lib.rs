//! Labrat - Core Library
//!
//! Project lifecycle and file organization for lab work: tracked project
//! directories with per-directory metadata, timestamped zip archiving,
//! and rule-driven file classification.

pub mod archive;
pub mod config;
pub mod name;
pub mod organize;
pub mod project;

pub use archive::{ArchiveError, ArchiveJob};
pub use name::sanitize_name;
pub use organize::{FileOrganizer, OrganizeMode, OrganizeReport};
pub use project::{Project, ProjectError, ProjectManager};
