use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use clap::Args;

use ugit_hash::ObjectId;
use ugit_repository::Repository;
use ugit_worktree::scan;

use super::{open_repo, render_tree_diff};

#[derive(Args)]
pub struct DiffArgs {
    /// Compare against the index instead of the working tree
    #[arg(long)]
    cached: bool,

    /// Commit to diff from (defaults to the index, or HEAD with --cached)
    commit: Option<String>,
}

pub fn run(args: &DiffArgs) -> Result<i32> {
    let repo = open_repo()?;
    let index = repo.index()?;
    let staged = index.to_map();

    let (from, to) = if args.cached {
        let from = match &args.commit {
            Some(name) => commit_tree(&repo, name)?,
            None => commit_tree(&repo, "@")?,
        };
        (from, staged)
    } else {
        let to = scan(&repo)?;
        let from = match &args.commit {
            Some(name) => commit_tree(&repo, name)?,
            None => staged,
        };
        (from, to)
    };

    let rendered = render_tree_diff(&repo, &from, &to)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(&rendered)?;
    out.flush()?;
    Ok(0)
}

/// Flatten the tree of the named commit.
fn commit_tree(repo: &Repository, name: &str) -> Result<BTreeMap<String, ObjectId>> {
    let oid = repo.resolve_name(name)?;
    let tree = repo.get_commit(&oid)?.tree;
    Ok(repo.flatten_tree(Some(tree))?)
}
