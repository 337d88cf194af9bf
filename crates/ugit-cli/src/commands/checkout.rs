use anyhow::Result;
use clap::Args;

use ugit_ref::{RefName, RefTarget};
use ugit_worktree::checkout_index;

use super::open_repo;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch, tag, or commit to switch to
    name: String,
}

pub fn run(args: &CheckoutArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.resolve_name(&args.name)?;
    let commit = repo.get_commit(&oid)?;

    let mut index = repo.index()?;
    repo.read_tree(commit.tree, &mut index)?;
    checkout_index(&repo, &index)?;
    index.commit()?;

    // A branch name keeps HEAD symbolic; anything else detaches it.
    let head = if repo.is_branch(&args.name)? {
        RefTarget::Symbolic(RefName::branch(&args.name)?)
    } else {
        RefTarget::Direct(oid)
    };
    repo.refs().update(&RefName::head(), &head, false)?;
    Ok(0)
}
