use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use ugit_object::ObjectType;

use super::open_repo;

#[derive(Args)]
pub struct HashObjectArgs {
    /// File to hash
    file: PathBuf,

    /// Object type
    #[arg(short = 't', default_value = "blob")]
    obj_type: ObjectType,
}

pub fn run(args: &HashObjectArgs) -> Result<i32> {
    let repo = open_repo()?;
    let data = std::fs::read(&args.file)?;
    let oid = repo.objects().write_raw(args.obj_type, &data)?;
    println!("{oid}");
    Ok(0)
}
