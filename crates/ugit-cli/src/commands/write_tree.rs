use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct WriteTreeArgs {}

pub fn run(_args: &WriteTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let index = repo.index()?;
    let oid = repo.write_tree(&index)?;
    index.commit()?;
    println!("{oid}");
    Ok(0)
}
