//! `labrat archive` command: zip a directory without removing it.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::warn;

use labrat::config;
use labrat::ProjectManager;

#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Directory to archive
    pub path: PathBuf,

    /// Archive destination (default: configured, else ~/.labrat/archives)
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Base name for the archive (default: metadata record, else dir name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ArchiveArgs) -> Result<()> {
    let config = config::load_default_config().context("failed to load config")?;
    let manager = ProjectManager::from_config(&config);

    let destination = args
        .destination
        .or_else(|| config.archive_dir.clone())
        .unwrap_or_else(config::default_archive_dir);

    let job = match &args.name {
        Some(name) => labrat::archive::archive(&args.path, &destination, name)?,
        None => manager.archive_project(&args.path, &destination)?,
    };

    for warning in &job.warnings {
        warn!("{}", warning);
    }

    if args.json {
        let payload = serde_json::json!({
            "archive": job.archive_path,
            "source": job.source_path,
            "files_archived": job.files_archived,
            "warnings": job.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "Archived {} file(s) to {}",
            job.files_archived,
            job.archive_path.display()
        );
        if !job.warnings.is_empty() {
            println!("{} entries skipped, see log for details", job.warnings.len());
        }
    }
    Ok(())
}
