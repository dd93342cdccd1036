//! `labrat project` subcommands: new, list, delete.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;

use labrat::config::{self, Config};
use labrat::ProjectManager;

use super::output;

#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// Create a new project directory with a metadata record
    New {
        /// Project type (see `labrat config` for recognized types)
        #[arg(short = 't', long = "type")]
        project_type: String,

        /// Human-readable project name
        name: String,

        /// Parent directory to create the project under (default: cwd)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Free-text description stored in the metadata record
        #[arg(short, long)]
        description: Option<String>,

        /// Owner recorded in the metadata (default: login user)
        #[arg(long)]
        owner: Option<String>,
    },

    /// List managed projects under a root directory
    List {
        /// Directory to scan (default: configured root, else cwd)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Archive a project and then remove its directory
    Delete {
        /// Project directory to delete
        path: PathBuf,

        /// Archive destination (default: configured, else ~/.labrat/archives)
        #[arg(long)]
        archive_dir: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn run(action: ProjectAction) -> Result<()> {
    let config = config::load_default_config().context("failed to load config")?;
    let manager = ProjectManager::from_config(&config);

    match action {
        ProjectAction::New {
            project_type,
            name,
            path,
            description,
            owner,
        } => {
            let parent = match path {
                Some(p) => p,
                None => std::env::current_dir()?,
            };
            let owner = output::resolve_owner(owner);
            let project = manager.new_project(&project_type, &name, &parent, description, &owner)?;
            println!("Created project '{}' at {}", project.name, project.path.display());
            Ok(())
        }

        ProjectAction::List { root, json } => run_list(&manager, &config, root, json),

        ProjectAction::Delete {
            path,
            archive_dir,
            yes,
        } => {
            let archive_dir = archive_dir
                .or_else(|| config.archive_dir.clone())
                .unwrap_or_else(config::default_archive_dir);

            if !yes && !confirm_delete(&path)? {
                println!("Aborted.");
                return Ok(());
            }

            let job = manager.delete_project(&path, &archive_dir)?;
            println!(
                "Archived {} file(s) to {}",
                job.files_archived,
                job.archive_path.display()
            );
            println!("Removed {}", path.display());
            Ok(())
        }
    }
}

fn run_list(
    manager: &ProjectManager,
    config: &Config,
    root: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let root = match root.or_else(|| config.default_root.clone()) {
        Some(r) => r,
        None => std::env::current_dir()?,
    };
    let projects = manager.list_projects(&root)?;

    if json {
        let records: Vec<_> = projects.iter().map(|p| &p.record).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects found under {}", root.display());
        return Ok(());
    }

    let mut table = output::new_table(&["NAME", "TYPE", "OWNER", "CREATED", "PATH"]);
    for project in &projects {
        table.add_row(vec![
            project.name.clone(),
            project.record.project_type.clone(),
            project.record.owner.clone(),
            project
                .record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            project.path.display().to_string(),
        ]);
    }
    println!("{table}");
    println!("{} project(s)", projects.len());
    Ok(())
}

fn confirm_delete(path: &std::path::Path) -> Result<bool> {
    if !path.is_dir() {
        bail!("project directory not found: {}", path.display());
    }
    print!(
        "Archive and permanently delete {}? [y/N] ",
        path.display()
    );
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
