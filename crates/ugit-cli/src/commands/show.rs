use std::io::Write;

use anyhow::Result;
use clap::Args;

use super::{open_repo, render_tree_diff};

#[derive(Args)]
pub struct ShowArgs {
    /// Commit to show (defaults to HEAD)
    #[arg(default_value = "@")]
    object: String,
}

pub fn run(args: &ShowArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.resolve_name(&args.object)?;
    let commit = repo.get_commit(&oid)?;

    println!("commit {oid}");
    for line in commit.message.lines() {
        println!("    {line}");
    }
    println!();

    // Diff against the first parent's tree (or the empty tree for a root).
    let parent_tree = match commit.first_parent() {
        Some(parent) => Some(repo.get_commit(parent)?.tree),
        None => None,
    };
    let from = repo.flatten_tree(parent_tree)?;
    let to = repo.flatten_tree(Some(commit.tree))?;
    let rendered = render_tree_diff(&repo, &from, &to)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(&rendered)?;
    out.flush()?;
    Ok(0)
}
