//! End-to-end project lifecycle: create, list, archive, delete.

use std::fs;

use labrat::project::metadata;
use labrat::ProjectManager;
use tempfile::TempDir;

fn manager() -> ProjectManager {
    ProjectManager::new(vec![
        "computational-biology".to_string(),
        "data-science".to_string(),
    ])
}

#[test]
fn create_then_list_then_delete() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("projects");
    let archives = temp.path().join("archives");
    let mgr = manager();

    let project = mgr
        .new_project(
            "computational-biology",
            "KARG Analysis",
            &root,
            Some("antibiotic resistance gene survey".to_string()),
            "rduran",
        )
        .unwrap();
    assert_eq!(project.sanitized_name, "KARG_Analysis");
    assert!(root.join("KARG_Analysis/labrat.json").is_file());

    fs::write(project.path.join("reads.fastq"), "@r1\nACGT\n+\n!!!!").unwrap();

    let listed = mgr.list_projects(&root).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "KARG Analysis");
    assert_eq!(listed[0].record.owner, "rduran");

    let job = mgr.delete_project(&project.path, &archives).unwrap();
    assert!(!project.path.exists());
    assert!(job.archive_path.exists());
    let file_name = job.archive_path.file_name().unwrap().to_string_lossy();
    assert!(file_name.starts_with("KARG_Analysis_"));

    // The safety copy contains both the data and the metadata record
    let reader = fs::File::open(&job.archive_path).unwrap();
    let mut zip = zip::ZipArchive::new(reader).unwrap();
    assert!(zip.by_name("reads.fastq").is_ok());
    assert!(zip.by_name("labrat.json").is_ok());

    assert!(mgr.list_projects(&root).unwrap().is_empty());
}

#[test]
fn listing_survives_foreign_and_corrupt_directories() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let mgr = manager();

    mgr.new_project("data-science", "Good One", root, None, "me")
        .unwrap();
    fs::create_dir(root.join("plain_dir")).unwrap();
    fs::create_dir(root.join("corrupt")).unwrap();
    fs::write(root.join("corrupt").join(metadata::METADATA_FILE), "][").unwrap();

    let listed = mgr.list_projects(root).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Good One");
}

#[test]
fn delete_is_blocked_when_archive_cannot_be_written() {
    let temp = TempDir::new().unwrap();
    let mgr = manager();
    let project = mgr
        .new_project("data-science", "Precious", temp.path(), None, "me")
        .unwrap();
    fs::write(project.path.join("data.txt"), "irreplaceable").unwrap();

    // A file squatting on the archive destination path
    let blocked = temp.path().join("blocked");
    fs::write(&blocked, "not a directory").unwrap();

    let result = mgr.delete_project(&project.path, &blocked);
    assert!(result.is_err());
    assert!(project.path.join("data.txt").exists(), "project untouched on failure");
}
