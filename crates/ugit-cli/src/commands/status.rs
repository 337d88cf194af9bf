use anyhow::Result;
use clap::Args;

use ugit_diff::changed_files;
use ugit_worktree::scan;

use super::open_repo;

#[derive(Args)]
pub struct StatusArgs {}

pub fn run(_args: &StatusArgs) -> Result<i32> {
    let repo = open_repo()?;

    let head = repo.head_oid()?;
    match repo.head_branch()? {
        Some(branch) => println!("On branch {branch}"),
        None => match head {
            Some(oid) => println!("HEAD detached at {:.10}", oid.to_hex()),
            None => println!("No commits yet"),
        },
    }

    if let Some(merge_head) = repo.merge_head()? {
        println!("Merging with {:.10}", merge_head.to_hex());
    }

    let head_tree = match head {
        Some(oid) => Some(repo.get_commit(&oid)?.tree),
        None => None,
    };
    let head_flat = repo.flatten_tree(head_tree)?;

    let index = repo.index()?;
    let staged = index.to_map();

    println!("\nChanges to be committed:\n");
    for (path, kind) in changed_files(&head_flat, &staged) {
        println!("{kind:>12}: {path}");
    }

    let working = scan(&repo)?;
    println!("\nChanges not staged for commit:\n");
    for (path, kind) in changed_files(&staged, &working) {
        println!("{kind:>12}: {path}");
    }

    Ok(0)
}
