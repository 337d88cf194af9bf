use crate::{diff_edits, split_lines, EditOp};

/// Context lines shown around each change.
const CONTEXT: usize = 3;

/// Render a unified diff between two byte bodies.
///
/// Returns an empty buffer when the bodies are identical; otherwise a
/// `---`/`+++` header followed by `@@` hunks with three lines of context.
pub fn unified_diff(old: &[u8], new: &[u8], old_label: &str, new_label: &str) -> Vec<u8> {
    if old == new {
        return Vec::new();
    }

    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let edits = diff_edits(old, new);

    // Ranges of non-Equal edits, merged when the gap is within context.
    let mut change_ranges: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < edits.len() {
        if edits[i].op != EditOp::Equal {
            let start = i;
            while i < edits.len() && edits[i].op != EditOp::Equal {
                i += 1;
            }
            change_ranges.push((start, i));
        } else {
            i += 1;
        }
    }
    if change_ranges.is_empty() {
        return Vec::new();
    }

    let mut merged: Vec<(usize, usize)> = Vec::new();
    let mut current = change_ranges[0];
    for &(start, end) in &change_ranges[1..] {
        if start - current.1 <= 2 * CONTEXT {
            current.1 = end;
        } else {
            merged.push(current);
            current = (start, end);
        }
    }
    merged.push(current);

    let mut out = Vec::new();
    out.extend_from_slice(format!("--- {old_label}\n+++ {new_label}\n").as_bytes());

    for (change_start, change_end) in merged {
        let lo = change_start.saturating_sub(CONTEXT);
        let hi = (change_end + CONTEXT).min(edits.len());
        let hunk = &edits[lo..hi];

        let old_count = hunk.iter().filter(|e| e.op != EditOp::Insert).count();
        let new_count = hunk.iter().filter(|e| e.op != EditOp::Delete).count();
        let old_start = if old_count == 0 {
            hunk[0].old_index
        } else {
            hunk[0].old_index + 1
        };
        let new_start = if new_count == 0 {
            hunk[0].new_index
        } else {
            hunk[0].new_index + 1
        };

        out.extend_from_slice(
            format!("@@ -{old_start},{old_count} +{new_start},{new_count} @@\n").as_bytes(),
        );

        for edit in hunk {
            let (marker, line) = match edit.op {
                EditOp::Equal => (b' ', old_lines[edit.old_index]),
                EditOp::Delete => (b'-', old_lines[edit.old_index]),
                EditOp::Insert => (b'+', new_lines[edit.new_index]),
            };
            emit_line(&mut out, marker, line);
        }
    }

    out
}

fn emit_line(out: &mut Vec<u8>, marker: u8, line: &[u8]) {
    out.push(marker);
    out.extend_from_slice(line);
    if !line.ends_with(b"\n") {
        out.push(b'\n');
    }
}
