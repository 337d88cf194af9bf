use anyhow::Result;
use clap::Args;

use ugit_ref::{RefName, RefTarget};

use super::open_repo;

#[derive(Args)]
pub struct ResetArgs {
    /// Commit to move HEAD to
    commit: String,
}

pub fn run(args: &ResetArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.resolve_name(&args.commit)?;
    repo.refs()
        .update(&RefName::head(), &RefTarget::Direct(oid), true)?;
    Ok(0)
}
