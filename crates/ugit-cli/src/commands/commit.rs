use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct CommitArgs {
    /// Commit message
    #[arg(short = 'm', long = "message")]
    message: String,
}

pub fn run(args: &CommitArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.commit(&args.message)?;
    println!("{oid}");
    Ok(0)
}
