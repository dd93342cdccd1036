//! `labrat organize` command: classify files into category subdirectories.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use labrat::config;
use labrat::organize::RuleSet;
use labrat::{FileOrganizer, OrganizeMode};

use super::output;

#[derive(Args, Debug)]
pub struct OrganizeArgs {
    /// Directory whose files should be organized
    pub path: PathBuf,

    /// Use only the scientific format categories (the default)
    #[arg(long, conflicts_with_all = ["keyword", "all"])]
    pub science: bool,

    /// Move files whose names contain this keyword (case-insensitive)
    #[arg(short, long, conflicts_with = "all")]
    pub keyword: Option<String>,

    /// Use the full category set (science plus images, videos, documents, archives)
    #[arg(long)]
    pub all: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl OrganizeArgs {
    fn mode(&self) -> OrganizeMode {
        if let Some(keyword) = &self.keyword {
            OrganizeMode::Keyword(keyword.clone())
        } else if self.all {
            OrganizeMode::All
        } else {
            OrganizeMode::Science
        }
    }
}

pub fn run(args: OrganizeArgs) -> Result<()> {
    let config = config::load_default_config().context("failed to load config")?;

    // Config extras only extend the extension tables, not keyword mode
    let organizer = match args.mode() {
        mode @ OrganizeMode::Keyword(_) => FileOrganizer::new(mode)?,
        OrganizeMode::Science => {
            FileOrganizer::with_rules(RuleSet::science().with_extra(&config.extra_categories))
        }
        OrganizeMode::All => {
            FileOrganizer::with_rules(RuleSet::general().with_extra(&config.extra_categories))
        }
    };

    let report = organizer.organize(&args.path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if !report.moved.is_empty() {
            let mut table = output::new_table(&["FILE", "CATEGORY"]);
            for moved in &report.moved {
                table.add_row(vec![
                    moved
                        .from
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    moved.category.clone(),
                ]);
            }
            println!("{table}");
        }
        println!("{}", report.summary());
    }

    if !report.failed.is_empty() {
        bail!("{} file(s) could not be moved", report.failed.len());
    }
    Ok(())
}
