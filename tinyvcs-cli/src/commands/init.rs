use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use tinyvcs_core::Repository;

pub fn run(repo: Option<PathBuf>) -> Result<()> {
    let repo_dir = super::get_repo_dir(repo);

    if Repository::is_initialized(&repo_dir) {
        println!(
            "{}",
            format!("Repository already initialized at {}", repo_dir.display()).yellow()
        );
        return Ok(());
    }

    Repository::init(&repo_dir)?;

    println!("{}", "✓ Initialized empty tinyvcs repository".green().bold());
    println!("  {}: {}", "Location".bold(), repo_dir.display());

    Ok(())
}
