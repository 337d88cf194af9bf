pub mod add;
pub mod branch;
pub mod cat_file;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod fetch;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod merge;
pub mod merge_base;
pub mod push;
pub mod read_tree;
pub mod reset;
pub mod show;
pub mod status;
pub mod tag;
pub mod write_tree;

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Subcommand;

use ugit_diff::{compare_trees, unified_diff};
use ugit_hash::ObjectId;
use ugit_repository::Repository;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty ugit repository
    Init(init::InitArgs),
    /// Compute the object ID of a file and store it as a blob
    HashObject(hash_object::HashObjectArgs),
    /// Print the payload of a repository object
    CatFile(cat_file::CatFileArgs),
    /// Write the index out as a tree object
    WriteTree(write_tree::WriteTreeArgs),
    /// Read a tree object into the index and working tree
    ReadTree(read_tree::ReadTreeArgs),
    /// Record the index as a new commit
    Commit(commit::CommitArgs),
    /// Show commit history, newest first
    Log(log::LogArgs),
    /// Switch to a commit or branch
    Checkout(checkout::CheckoutArgs),
    /// Create a tag pointing at a commit
    Tag(tag::TagArgs),
    /// List branches or create a new one
    Branch(branch::BranchArgs),
    /// Summarize the state of index and working tree
    Status(status::StatusArgs),
    /// Move HEAD to a commit
    Reset(reset::ResetArgs),
    /// Show a commit and its changes
    Show(show::ShowArgs),
    /// Show changes between commit, index, and working tree
    Diff(diff::DiffArgs),
    /// Merge a commit into HEAD
    Merge(merge::MergeArgs),
    /// Find the first common ancestor of two commits
    MergeBase(merge_base::MergeBaseArgs),
    /// Download objects and branch tips from a peer repository
    Fetch(fetch::FetchArgs),
    /// Upload objects to a peer repository and advance its ref
    Push(push::PushArgs),
    /// Stage files or directories
    Add(add::AddArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args),
        Commands::HashObject(args) => hash_object::run(args),
        Commands::CatFile(args) => cat_file::run(args),
        Commands::WriteTree(args) => write_tree::run(args),
        Commands::ReadTree(args) => read_tree::run(args),
        Commands::Commit(args) => commit::run(args),
        Commands::Log(args) => log::run(args),
        Commands::Checkout(args) => checkout::run(args),
        Commands::Tag(args) => tag::run(args),
        Commands::Branch(args) => branch::run(args),
        Commands::Status(args) => status::run(args),
        Commands::Reset(args) => reset::run(args),
        Commands::Show(args) => show::run(args),
        Commands::Diff(args) => diff::run(args),
        Commands::Merge(args) => merge::run(args),
        Commands::MergeBase(args) => merge_base::run(args),
        Commands::Fetch(args) => fetch::run(args),
        Commands::Push(args) => push::run(args),
        Commands::Add(args) => add::run(args),
    }
}

/// Open the repository at the current working directory.
pub(crate) fn open_repo() -> Result<Repository> {
    Ok(Repository::open(std::env::current_dir()?)?)
}

/// Render a unified diff between two flattened trees, path by path.
pub(crate) fn render_tree_diff(
    repo: &Repository,
    from: &BTreeMap<String, ObjectId>,
    to: &BTreeMap<String, ObjectId>,
) -> Result<Vec<u8>> {
    let read = |oid: Option<ObjectId>| -> Result<Vec<u8>> {
        Ok(match oid {
            Some(oid) => repo.objects().read_blob(&oid)?.data,
            None => Vec::new(),
        })
    };

    let mut out = Vec::new();
    for (path, oids) in compare_trees(&[from, to]) {
        let (old, new) = (oids[0], oids[1]);
        if old == new {
            continue;
        }
        out.extend_from_slice(&unified_diff(
            &read(old)?,
            &read(new)?,
            &format!("a/{path}"),
            &format!("b/{path}"),
        ));
    }
    Ok(out)
}
