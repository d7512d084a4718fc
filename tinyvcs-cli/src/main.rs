use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{add, commit, diff, init, log, status};

#[derive(Parser)]
#[command(name = "tinyvcs")]
#[command(version, about = "Minimal content-addressed version control", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a repository
    Init {
        /// Repository directory (defaults to ./.tinyvcs)
        #[arg(short, long)]
        repo: Option<PathBuf>,
    },

    /// Stage a file for the next commit
    Add {
        /// File to stage
        path: PathBuf,

        /// Repository directory
        #[arg(short, long)]
        repo: Option<PathBuf>,
    },

    /// Commit the staged files
    Commit {
        /// Commit message
        message: String,

        /// Repository directory
        #[arg(short, long)]
        repo: Option<PathBuf>,
    },

    /// Show commit history, newest first
    Log {
        /// Number of commits to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Repository directory
        #[arg(short, long)]
        repo: Option<PathBuf>,
    },

    /// Show what is currently staged
    Status {
        /// Repository directory
        #[arg(short, long)]
        repo: Option<PathBuf>,
    },

    /// Show the per-file diff of a commit against its parent
    Diff {
        /// Commit digest to diff
        commit: String,

        /// Repository directory
        #[arg(short, long)]
        repo: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { repo } => {
            init::run(repo)?;
        }
        Commands::Add { path, repo } => {
            add::run(path, repo)?;
        }
        Commands::Commit { message, repo } => {
            commit::run(message, repo)?;
        }
        Commands::Log { limit, repo } => {
            log::run(limit, repo)?;
        }
        Commands::Status { repo } => {
            status::run(repo)?;
        }
        Commands::Diff { commit, repo } => {
            diff::run(commit, repo)?;
        }
    }

    Ok(())
}
