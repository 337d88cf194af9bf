use anyhow::{bail, Result};
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct MergeBaseArgs {
    /// First commit
    commit1: String,
    /// Second commit
    commit2: String,
}

pub fn run(args: &MergeBaseArgs) -> Result<i32> {
    let repo = open_repo()?;
    let a = repo.resolve_name(&args.commit1)?;
    let b = repo.resolve_name(&args.commit2)?;

    match ugit_revwalk::merge_base(&repo, a, b)? {
        Some(base) => {
            println!("{base}");
            Ok(0)
        }
        None => bail!("no common ancestor of {} and {}", args.commit1, args.commit2),
    }
}
