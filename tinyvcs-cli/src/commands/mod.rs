pub mod add;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod status;

use std::path::PathBuf;

use anyhow::Result;
use tinyvcs_core::repo::REPO_DIR;
use tinyvcs_core::Repository;

pub fn get_repo_dir(custom_path: Option<PathBuf>) -> PathBuf {
    custom_path.unwrap_or_else(|| std::env::current_dir().unwrap().join(REPO_DIR))
}

pub fn open_repo(custom_path: Option<PathBuf>) -> Result<Repository> {
    let repo_dir = get_repo_dir(custom_path);

    if !Repository::is_initialized(&repo_dir) {
        anyhow::bail!("No tinyvcs repository found. Run 'tinyvcs init' first.");
    }

    Ok(Repository::open(&repo_dir)?)
}
