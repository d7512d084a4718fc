use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub fn run(repo: Option<PathBuf>) -> Result<()> {
    let repo = super::open_repo(repo)?;

    let staged = repo.staged()?;

    println!("{}", "Staging Area".bold().cyan());
    println!();

    if staged.is_empty() {
        println!("{}", "Nothing staged".green());
        println!(
            "Run {} to stage a file",
            "tinyvcs add <path>".cyan()
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Staged files:".bold(),
        format!("({})", staged.len()).yellow()
    );
    println!();

    for entry in &staged {
        println!(
            "  {} {}",
            entry.hash.to_string().dimmed(),
            entry.path
        );
    }

    println!();
    println!(
        "Run {} to commit these files",
        "tinyvcs commit \"message\"".cyan()
    );

    Ok(())
}
