use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct BranchArgs {
    /// Branch to create; lists branches when omitted
    name: Option<String>,

    /// Commit the new branch starts at (defaults to HEAD)
    #[arg(default_value = "@")]
    start: String,
}

pub fn run(args: &BranchArgs) -> Result<i32> {
    let repo = open_repo()?;

    match &args.name {
        None => {
            let current = repo.head_branch()?;
            for (name, _oid) in repo.iter_branches()? {
                let prefix = if Some(&name) == current.as_ref() {
                    "*"
                } else {
                    " "
                };
                println!("{prefix} {name}");
            }
        }
        Some(name) => {
            let oid = repo.resolve_name(&args.start)?;
            repo.create_branch(name, oid)?;
            println!("Branch {name} created at {:.10}", oid.to_hex());
        }
    }
    Ok(0)
}
