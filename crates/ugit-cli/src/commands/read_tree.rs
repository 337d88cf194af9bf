use anyhow::Result;
use clap::Args;

use ugit_worktree::checkout_index;

use super::open_repo;

#[derive(Args)]
pub struct ReadTreeArgs {
    /// Tree to read (OID or ref name)
    tree: String,
}

pub fn run(args: &ReadTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.resolve_name(&args.tree)?;

    let mut index = repo.index()?;
    repo.read_tree(oid, &mut index)?;
    checkout_index(&repo, &index)?;
    index.commit()?;
    Ok(0)
}
