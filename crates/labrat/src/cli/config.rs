//! `labrat config` command: show resolved paths and settings.

use anyhow::{Context, Result};
use clap::Args;

use labrat::config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    let cfg = config::load_default_config().context("failed to load config")?;
    let home = config::labrat_home();
    let config_file = config::config_path();

    if args.json {
        let payload = serde_json::json!({
            "home": home,
            "config_file": config_file,
            "config_file_exists": config_file.exists(),
            "logs_dir": config::logs_dir(),
            "default_archive_dir": config::default_archive_dir(),
            "project_types": cfg.project_types,
            "default_root": cfg.default_root,
            "archive_dir": cfg.archive_dir,
            "extra_categories": cfg.extra_categories,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Home:            {}", home.display());
    println!(
        "Config file:     {} ({})",
        config_file.display(),
        if config_file.exists() { "present" } else { "absent, using defaults" }
    );
    println!("Logs:            {}", config::logs_dir().display());
    println!(
        "Archive dir:     {}",
        cfg.archive_dir
            .clone()
            .unwrap_or_else(config::default_archive_dir)
            .display()
    );
    if let Some(root) = &cfg.default_root {
        println!("Default root:    {}", root.display());
    }
    println!("Project types:   {}", cfg.project_types.join(", "));
    if !cfg.extra_categories.is_empty() {
        println!("Extra categories:");
        for (ext, category) in &cfg.extra_categories {
            println!("  .{} -> {}", ext, category);
        }
    }
    Ok(())
}
