//! Three-way content merge using diff edit scripts.
//!
//! Takes base, head, and other versions of a file and produces a merged
//! result, inserting conflict markers where changes overlap. The output is
//! a pure function of the three inputs.

use ugit_diff::{diff_edits, split_lines, Edit, EditOp};
use ugit_hash::ObjectId;
use ugit_repository::Repository;

use crate::MergeError;

/// Marker labels. Fixed strings keep the merged bytes deterministic for a
/// given input triple.
const HEAD_LABEL: &str = "HEAD";
const OTHER_LABEL: &str = "other";

/// Merge three blob versions into one byte sequence.
///
/// `None` stands for an absent side and merges as empty content. The
/// result is always produced; conflicting regions carry textual markers.
pub fn merge_blobs(
    repo: &Repository,
    base: Option<ObjectId>,
    head: Option<ObjectId>,
    other: Option<ObjectId>,
) -> Result<Vec<u8>, MergeError> {
    let read = |oid: Option<ObjectId>| -> Result<Vec<u8>, MergeError> {
        match oid {
            Some(oid) => Ok(repo.objects().read_blob(&oid)?.data),
            None => Ok(Vec::new()),
        }
    };
    Ok(merge_content(&read(base)?, &read(head)?, &read(other)?))
}

/// Perform a three-way content merge over raw bytes.
///
/// Diffs base→head and base→other, interleaves non-overlapping changes,
/// and emits conflict markers for overlapping regions.
pub fn merge_content(base: &[u8], head: &[u8], other: &[u8]) -> Vec<u8> {
    // If both sides agree, take either.
    if head == other {
        return head.to_vec();
    }
    // If only one side changed, it wins cleanly.
    if base == head {
        return other.to_vec();
    }
    if base == other {
        return head.to_vec();
    }

    let base_lines = split_lines(base);
    let head_lines = split_lines(head);
    let other_lines = split_lines(other);

    let head_regions = collect_change_regions(&diff_edits(base, head));
    let other_regions = collect_change_regions(&diff_edits(base, other));

    merge_regions(
        &base_lines,
        &head_lines,
        &other_lines,
        &head_regions,
        &other_regions,
    )
}

/// A contiguous region of changes relative to the base.
#[derive(Debug, Clone)]
struct ChangeRegion {
    /// Start line in base (0-indexed).
    base_start: usize,
    /// Number of lines removed from base.
    base_len: usize,
    /// Start line in the modified file (0-indexed).
    new_start: usize,
    /// Number of lines added.
    new_len: usize,
}

/// Collect contiguous change regions from a sequence of edit operations.
fn collect_change_regions(edits: &[Edit]) -> Vec<ChangeRegion> {
    let mut regions = Vec::new();
    let mut i = 0;

    while i < edits.len() {
        if edits[i].op == EditOp::Equal {
            i += 1;
            continue;
        }

        let base_start = edits[i].old_index;
        let new_start = edits[i].new_index;
        let mut base_end = base_start;
        let mut new_end = new_start;

        while i < edits.len() && edits[i].op != EditOp::Equal {
            match edits[i].op {
                EditOp::Delete => base_end = edits[i].old_index + 1,
                EditOp::Insert => new_end = edits[i].new_index + 1,
                EditOp::Equal => unreachable!(),
            }
            i += 1;
        }

        regions.push(ChangeRegion {
            base_start,
            base_len: base_end - base_start,
            new_start,
            new_len: new_end - new_start,
        });
    }

    regions
}

/// Merge change regions from head and other against the base.
fn merge_regions(
    base_lines: &[&[u8]],
    head_lines: &[&[u8]],
    other_lines: &[&[u8]],
    head_regions: &[ChangeRegion],
    other_regions: &[ChangeRegion],
) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::new();

    let mut base_pos = 0;
    let mut hi = 0; // index into head_regions
    let mut oi = 0; // index into other_regions

    while hi < head_regions.len() || oi < other_regions.len() {
        let h_region = head_regions.get(hi);
        let o_region = other_regions.get(oi);

        match (h_region, o_region) {
            (Some(h), Some(o)) => {
                let h_end = h.base_start + h.base_len;
                let o_end = o.base_start + o.base_len;

                if h_end < o.base_start || (h_end == o.base_start && h.base_start < o.base_start)
                {
                    // Head's change comes strictly first, no overlap.
                    emit_range(&mut output, base_lines, base_pos, h.base_start);
                    emit_range(&mut output, head_lines, h.new_start, h.new_start + h.new_len);
                    base_pos = h_end;
                    hi += 1;
                } else if o_end < h.base_start
                    || (o_end == h.base_start && o.base_start < h.base_start)
                {
                    // Other's change comes strictly first, no overlap.
                    emit_range(&mut output, base_lines, base_pos, o.base_start);
                    emit_range(
                        &mut output,
                        other_lines,
                        o.new_start,
                        o.new_start + o.new_len,
                    );
                    base_pos = o_end;
                    oi += 1;
                } else {
                    // Overlapping regions.
                    let head_content =
                        collect_range(head_lines, h.new_start, h.new_start + h.new_len);
                    let other_content =
                        collect_range(other_lines, o.new_start, o.new_start + o.new_len);

                    let overlap_start = h.base_start.min(o.base_start);
                    let overlap_end = h_end.max(o_end);

                    emit_range(&mut output, base_lines, base_pos, overlap_start);

                    if head_content == other_content {
                        // Identical changes — accept cleanly.
                        output.extend_from_slice(&head_content);
                        ensure_newline(&mut output);
                    } else {
                        emit_conflict(&mut output, &head_content, &other_content);
                    }

                    base_pos = overlap_end;
                    hi += 1;
                    oi += 1;
                }
            }
            (Some(h), None) => {
                let h_end = h.base_start + h.base_len;
                emit_range(&mut output, base_lines, base_pos, h.base_start);
                emit_range(&mut output, head_lines, h.new_start, h.new_start + h.new_len);
                base_pos = h_end;
                hi += 1;
            }
            (None, Some(o)) => {
                let o_end = o.base_start + o.base_len;
                emit_range(&mut output, base_lines, base_pos, o.base_start);
                emit_range(
                    &mut output,
                    other_lines,
                    o.new_start,
                    o.new_start + o.new_len,
                );
                base_pos = o_end;
                oi += 1;
            }
            (None, None) => unreachable!(),
        }
    }

    // Emit remaining base lines.
    emit_range(&mut output, base_lines, base_pos, base_lines.len());

    output
}

/// Emit lines `[from, to)`, normalizing a missing final newline so later
/// output never glues onto an unterminated line.
fn emit_range(output: &mut Vec<u8>, lines: &[&[u8]], from: usize, to: usize) {
    for line in lines.iter().take(to.min(lines.len())).skip(from) {
        output.extend_from_slice(line);
        ensure_newline(output);
    }
}

/// Collect lines `[from, to)` into a buffer.
fn collect_range(lines: &[&[u8]], from: usize, to: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for line in lines.iter().take(to.min(lines.len())).skip(from) {
        buf.extend_from_slice(line);
        if !line.ends_with(b"\n") {
            buf.push(b'\n');
        }
    }
    buf
}

fn ensure_newline(output: &mut Vec<u8>) {
    if !output.is_empty() && !output.ends_with(b"\n") {
        output.push(b'\n');
    }
}

/// Emit a conflict region with textual markers.
fn emit_conflict(output: &mut Vec<u8>, head_content: &[u8], other_content: &[u8]) {
    output.extend_from_slice(b"<<<<<<< ");
    output.extend_from_slice(HEAD_LABEL.as_bytes());
    output.push(b'\n');
    output.extend_from_slice(head_content);
    output.extend_from_slice(b"=======\n");
    output.extend_from_slice(other_content);
    output.extend_from_slice(b">>>>>>> ");
    output.extend_from_slice(OTHER_LABEL.as_bytes());
    output.push(b'\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sides() {
        let base = b"line1\nline2\n";
        let both = b"line1\nline2\nline3\n";
        assert_eq!(merge_content(base, both, both), both);
    }

    #[test]
    fn only_head_changed() {
        let base = b"line1\nline2\n";
        let head = b"line1\nmodified\n";
        assert_eq!(merge_content(base, head, base), head);
    }

    #[test]
    fn only_other_changed() {
        let base = b"line1\nline2\n";
        let other = b"line1\nmodified\n";
        assert_eq!(merge_content(base, base, other), other);
    }

    #[test]
    fn non_overlapping_changes_combine() {
        let base = b"line1\nline2\nline3\nline4\n";
        let head = b"modified1\nline2\nline3\nline4\n";
        let other = b"line1\nline2\nline3\nmodified4\n";
        let merged = merge_content(base, head, other);
        assert_eq!(merged, b"modified1\nline2\nline3\nmodified4\n");
    }

    #[test]
    fn overlapping_changes_conflict() {
        let base = b"line1\nline2\nline3\n";
        let head = b"line1\nhead_change\nline3\n";
        let other = b"line1\nother_change\nline3\n";
        let merged = merge_content(base, head, other);
        let text = String::from_utf8(merged).unwrap();
        assert_eq!(
            text,
            "line1\n<<<<<<< HEAD\nhead_change\n=======\nother_change\n>>>>>>> other\nline3\n"
        );
    }

    #[test]
    fn merge_is_deterministic() {
        let base = b"a\nb\nc\n";
        let head = b"a\nB\nc\n";
        let other = b"a\nbee\nc\n";
        assert_eq!(merge_content(base, head, other), merge_content(base, head, other));
    }

    #[test]
    fn identical_overlapping_changes_are_clean() {
        let base = b"line1\noriginal\nline3\n";
        let both = b"line1\nsame_change\nline3\n";
        let merged = merge_content(base, both, b"line1\nsame_change\nline3\nextra\n");
        let text = String::from_utf8(merged).unwrap();
        assert!(text.contains("same_change"));
    }

    #[test]
    fn both_added_from_empty_base_conflicts() {
        let merged = merge_content(b"", b"head line\n", b"other line\n");
        let text = String::from_utf8(merged).unwrap();
        assert!(text.contains("<<<<<<< HEAD"));
        assert!(text.contains("head line"));
        assert!(text.contains("other line"));
        assert!(text.contains(">>>>>>> other"));
    }

    #[test]
    fn deletion_against_unrelated_change_combines() {
        let base = b"one\ntwo\nthree\nfour\n";
        let head = b"two\nthree\nfour\n"; // deleted "one"
        let other = b"one\ntwo\nthree\nFOUR\n"; // changed "four"
        let merged = merge_content(base, head, other);
        assert_eq!(merged, b"two\nthree\nFOUR\n");
    }
}
