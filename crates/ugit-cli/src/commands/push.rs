use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use ugit_ref::RefName;

use super::open_repo;

#[derive(Args)]
pub struct PushArgs {
    /// Path of the peer repository
    path: PathBuf,
    /// Branch to push
    branch: String,
}

pub fn run(args: &PushArgs) -> Result<i32> {
    let repo = open_repo()?;
    let name = RefName::branch(&args.branch)?;
    let oid = ugit_remote::push(&repo, &args.path, &name)?;
    println!("{} -> {:.10}", args.branch, oid.to_hex());
    Ok(0)
}
