use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

pub fn run(path: PathBuf, repo: Option<PathBuf>) -> Result<()> {
    let repo = super::open_repo(repo)?;

    let digest = repo
        .add(&path)
        .with_context(|| format!("Failed to stage {}", path.display()))?;

    println!("{} {}", "Added".green().bold(), path.display());
    println!("  {}: {}", "Digest".bold(), digest.to_string().yellow());

    Ok(())
}
