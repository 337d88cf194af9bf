use std::collections::HashMap;

use anyhow::Result;
use clap::Args;

use ugit_hash::ObjectId;
use ugit_revwalk::CommitWalk;

use super::open_repo;

#[derive(Args)]
pub struct LogArgs {
    /// Start of the walk (defaults to HEAD)
    #[arg(default_value = "@")]
    reference: String,
}

pub fn run(args: &LogArgs) -> Result<i32> {
    let repo = open_repo()?;
    let start = repo.resolve_name(&args.reference)?;

    // Ref decorations: OID → names pointing at it.
    let mut decorations: HashMap<ObjectId, Vec<String>> = HashMap::new();
    for (name, target) in repo.refs().iter("", true)? {
        if let Some(oid) = target.oid() {
            decorations.entry(oid).or_default().push(name.to_string());
        }
    }

    for oid in CommitWalk::from_oid(&repo, start) {
        let oid = oid?;
        let commit = repo.get_commit(&oid)?;

        let refs_str = match decorations.get(&oid) {
            Some(names) => format!(" ({})", names.join(", ")),
            None => String::new(),
        };
        println!("commit {oid}{refs_str}");
        for line in commit.message.lines() {
            println!("    {line}");
        }
        println!();
    }
    Ok(0)
}
