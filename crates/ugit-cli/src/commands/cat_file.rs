use std::io::Write;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct CatFileArgs {
    /// Object to print (OID or ref name)
    object: String,
}

pub fn run(args: &CatFileArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.resolve_name(&args.object)?;
    let (_obj_type, payload) = repo.objects().read_raw(&oid)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(&payload)?;
    out.flush()?;
    Ok(0)
}
