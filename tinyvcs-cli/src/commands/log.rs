use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub fn run(limit: Option<usize>, repo: Option<PathBuf>) -> Result<()> {
    let repo = super::open_repo(repo)?;

    let mut shown = 0;
    for item in repo.history()? {
        if let Some(limit) = limit {
            if shown >= limit {
                println!("{}", "... older commits elided".dimmed());
                println!("Use {} to see more", "--limit N".cyan());
                break;
            }
        }

        let (digest, commit) = item?;

        if shown == 0 {
            println!("{}", "Commit History".bold().cyan());
            println!();
        }

        println!("{} {}", "commit".yellow().bold(), digest.to_string().yellow());
        println!(
            "{}: {}",
            "Date".bold(),
            commit.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        println!();
        println!("    {}", commit.message);
        println!();
        println!(
            "    {} file(s)",
            commit.files.len().to_string().cyan()
        );

        for entry in commit.files.iter().take(5) {
            println!("      • {}", entry.path.dimmed());
        }
        if commit.files.len() > 5 {
            println!(
                "      {} and {} more...",
                "...".dimmed(),
                (commit.files.len() - 5).to_string().dimmed()
            );
        }

        println!();
        shown += 1;
    }

    if shown == 0 {
        println!("{}", "No commits yet".yellow());
    }

    Ok(())
}
