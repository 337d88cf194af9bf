use std::fs;
use std::path::Path;

use ugit_hash::ObjectId;
use ugit_merge::{merge, MergeOutcome};
use ugit_ref::{RefName, RefTarget};
use ugit_repository::Repository;
use ugit_revwalk::merge_base;
use ugit_worktree::{add, checkout_index};

fn init_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

fn write_and_commit(repo: &Repository, path: &str, data: &[u8], msg: &str) -> ObjectId {
    let full = repo.work_tree().join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, data).unwrap();

    let mut index = repo.index().unwrap();
    add(repo, &mut index, &[path]).unwrap();
    index.commit().unwrap();
    repo.commit(msg).unwrap()
}

/// Move HEAD onto a branch and materialize its tree, like `checkout`.
fn switch_to_branch(repo: &Repository, branch: &str) {
    let tip = repo.resolve_name(branch).unwrap();
    let commit = repo.get_commit(&tip).unwrap();
    let mut index = repo.index().unwrap();
    repo.read_tree(commit.tree, &mut index).unwrap();
    checkout_index(repo, &index).unwrap();
    index.commit().unwrap();
    repo.refs()
        .update(
            &RefName::head(),
            &RefTarget::Symbolic(RefName::branch(branch).unwrap()),
            false,
        )
        .unwrap();
}

fn count_objects(repo: &Repository) -> usize {
    fs::read_dir(repo.ugit_dir().join("objects")).unwrap().count()
}

#[test]
fn fast_forward_advances_head_without_new_objects() {
    let (_dir, repo) = init_repo();
    let first = write_and_commit(&repo, "a.txt", b"A\n", "first");
    repo.create_branch("feature", first).unwrap();
    let second = write_and_commit(&repo, "b.txt", b"B\n", "second");

    // HEAD onto feature (at `first`), then merge master's tip.
    switch_to_branch(&repo, "feature");
    assert_eq!(repo.head_oid().unwrap(), Some(first));

    let before = count_objects(&repo);
    let outcome = merge(&repo, second).unwrap();
    assert_eq!(outcome, MergeOutcome::FastForward);

    // HEAD equals the target and no commit object was created.
    assert_eq!(repo.head_oid().unwrap(), Some(second));
    assert_eq!(count_objects(&repo), before);
    assert_eq!(repo.merge_head().unwrap(), None);

    // The working tree advanced too.
    assert!(repo.work_tree().join("b.txt").exists());
}

#[test]
fn branch_merge_produces_two_parent_commit() {
    let (dir, repo) = init_repo();
    let base = write_and_commit(&repo, "shared.txt", b"shared\n", "base");
    repo.create_branch("feature", base).unwrap();

    // Commit X on master.
    let x = write_and_commit(&repo, "master.txt", b"from master\n", "x on master");

    // Commit Y on feature.
    switch_to_branch(&repo, "feature");
    let y = write_and_commit(&repo, "feature.txt", b"from feature\n", "y on feature");

    // Back on master; the fork point is the merge base.
    switch_to_branch(&repo, "master");
    assert_eq!(merge_base(&repo, x, y).unwrap(), Some(base));

    let outcome = merge(&repo, y).unwrap();
    assert_eq!(outcome, MergeOutcome::MergedInWorkTree);
    assert_eq!(repo.merge_head().unwrap(), Some(y));

    // Both sides' files landed in the working tree.
    assert!(dir.path().join("master.txt").exists());
    assert!(dir.path().join("feature.txt").exists());
    assert!(dir.path().join("shared.txt").exists());

    // The next commit seals the merge with parents [x, y].
    let merge_commit = repo.commit("merge feature into master").unwrap();
    let commit = repo.get_commit(&merge_commit).unwrap();
    assert_eq!(commit.parents, vec![x, y]);
    assert_eq!(repo.merge_head().unwrap(), None);
}

#[test]
fn conflicting_merge_stages_marked_bytes() {
    let (dir, repo) = init_repo();
    let base = write_and_commit(&repo, "f.txt", b"line\n", "base");
    repo.create_branch("feature", base).unwrap();

    write_and_commit(&repo, "f.txt", b"master side\n", "master edit");
    switch_to_branch(&repo, "feature");
    let y = write_and_commit(&repo, "f.txt", b"feature side\n", "feature edit");

    switch_to_branch(&repo, "master");
    let outcome = merge(&repo, y).unwrap();
    assert_eq!(outcome, MergeOutcome::MergedInWorkTree);

    let merged = fs::read_to_string(dir.path().join("f.txt")).unwrap();
    assert!(merged.contains("<<<<<<< HEAD"));
    assert!(merged.contains("master side"));
    assert!(merged.contains("feature side"));
    assert!(merged.contains(">>>>>>> other"));

    // The staged blob holds exactly the working-tree bytes.
    let index = repo.index().unwrap();
    let staged = index.get("f.txt").unwrap();
    let blob = repo.objects().read_blob(&staged).unwrap();
    assert_eq!(blob.data, merged.as_bytes());
}

#[test]
fn merge_of_unrelated_histories_has_no_base() {
    let (_dir, repo) = init_repo();
    let ours = write_and_commit(&repo, "a.txt", b"A\n", "ours");

    // A second root commit, detached from the first.
    let other_repo_dir = tempfile::tempdir().unwrap();
    let other_repo = Repository::init(other_repo_dir.path()).unwrap();
    let theirs = write_and_commit(&other_repo, "b.txt", b"B\n", "theirs");

    // Import the foreign history.
    for entry in fs::read_dir(other_repo.ugit_dir().join("objects")).unwrap() {
        let entry = entry.unwrap();
        fs::copy(
            entry.path(),
            repo.ugit_dir().join("objects").join(entry.file_name()),
        )
        .unwrap();
    }

    assert_eq!(merge_base(&repo, ours, theirs).unwrap(), None);

    let outcome = merge(&repo, theirs).unwrap();
    assert_eq!(outcome, MergeOutcome::MergedInWorkTree);
    // With no base, both sides' files are kept.
    assert!(Path::new(repo.work_tree()).join("a.txt").exists());
    assert!(Path::new(repo.work_tree()).join("b.txt").exists());
}
