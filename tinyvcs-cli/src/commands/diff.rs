use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use tinyvcs_core::{Digest, DiffKind, Error, FileChange, FileDiff};

pub fn run(commit: String, repo: Option<PathBuf>) -> Result<()> {
    let repo = super::open_repo(repo)?;

    let digest = Digest::parse(&commit)?;
    let report = match repo.show_commit_diff(&digest) {
        Ok(report) => report,
        Err(Error::CommitNotFound(d)) => {
            println!("{}", format!("Commit not found: {}", d).red());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "{}",
        format!("Diff for commit {}", report.digest).bold().cyan()
    );
    println!("{}: {}", "Message".bold(), report.commit.message);
    println!();

    for file in &report.files {
        println!("{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.path.white().bold());

        match &file.change {
            FileChange::FirstCommit => {
                print_content(file);
                println!("{}", "First commit".yellow());
            }
            FileChange::NewFile => {
                print_content(file);
                println!("{}", "New file in this commit".green());
            }
            FileChange::Modified(parts) => {
                for part in parts {
                    for line in part.text.split_inclusive('\n') {
                        match part.kind {
                            DiffKind::Added => print!("{}", format!("+{}", line).green()),
                            DiffKind::Removed => print!("{}", format!("-{}", line).red()),
                            DiffKind::Unchanged => print!(" {}", line),
                        }
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn print_content(file: &FileDiff) {
    for line in file.content.split_inclusive('\n') {
        print!(" {}", line);
    }
    if !file.content.ends_with('\n') {
        println!();
    }
}
