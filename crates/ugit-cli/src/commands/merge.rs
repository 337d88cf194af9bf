use anyhow::Result;
use clap::Args;

use ugit_merge::MergeOutcome;

use super::open_repo;

#[derive(Args)]
pub struct MergeArgs {
    /// Commit to merge into HEAD
    commit: String,
}

pub fn run(args: &MergeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let other = repo.resolve_name(&args.commit)?;

    match ugit_merge::merge(&repo, other)? {
        MergeOutcome::FastForward => {
            println!("Fast-forward merge, no need to commit");
        }
        MergeOutcome::MergedInWorkTree => {
            println!("Merged in working tree");
            println!("Please commit");
        }
    }
    Ok(0)
}
