use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct TagArgs {
    /// Tag name
    name: String,

    /// Commit to tag (defaults to HEAD)
    #[arg(default_value = "@")]
    object: String,
}

pub fn run(args: &TagArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.resolve_name(&args.object)?;
    repo.create_tag(&args.name, oid)?;
    Ok(0)
}
