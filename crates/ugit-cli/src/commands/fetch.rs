use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct FetchArgs {
    /// Path of the peer repository
    path: PathBuf,
}

pub fn run(args: &FetchArgs) -> Result<i32> {
    let repo = open_repo()?;
    let fetched = ugit_remote::fetch(&repo, &args.path)?;
    for branch in fetched {
        println!("* branch {branch} -> remote/{branch}");
    }
    Ok(0)
}
