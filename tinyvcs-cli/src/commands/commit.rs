use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub fn run(message: String, repo: Option<PathBuf>) -> Result<()> {
    let repo = super::open_repo(repo)?;

    let staged = repo.staged()?;
    if staged.is_empty() {
        println!("{}", "Nothing staged; committing an empty snapshot".yellow());
    }

    let digest = repo.commit(&message)?;

    println!("{}", "✓ Commit created successfully!".green().bold());
    println!("  {}: {}", "Commit".bold(), digest.to_string().yellow());
    println!("  {}: {}", "Message".bold(), message);
    println!("  {}: {}", "Files".bold(), staged.len());

    Ok(())
}
