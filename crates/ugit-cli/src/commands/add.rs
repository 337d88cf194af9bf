use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct AddArgs {
    /// Files or directories to stage
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

pub fn run(args: &AddArgs) -> Result<i32> {
    let repo = open_repo()?;
    let mut index = repo.index()?;
    ugit_worktree::add(&repo, &mut index, &args.paths)?;
    index.commit()?;
    Ok(0)
}
