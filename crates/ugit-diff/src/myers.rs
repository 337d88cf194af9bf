//! Shortest edit script search (Myers, "An O(ND) Difference Algorithm and
//! Its Variations", 1986).
//!
//! The search runs the greedy forward algorithm over diagonals, keeping a
//! snapshot of the furthest-reaching positions after every round. The path
//! is then retraced from the end as a sequence of [`Step`]s and replayed
//! forward to number the edits.

use crate::{Edit, EditOp};

/// One move along the reconstructed edit path, in forward order.
enum Step {
    /// This many lines match on both sides.
    Keep(usize),
    /// One line enters from the new side.
    Take,
    /// One line leaves from the old side.
    Drop,
}

/// Compute the edit script turning `old` into `new`.
pub fn diff(old: &[&[u8]], new: &[&[u8]]) -> Vec<Edit> {
    // Identical head and tail never participate in the search.
    let head = common_prefix(old, new);
    let tail = common_suffix(&old[head..], &new[head..]);
    let mid_old = &old[head..old.len() - tail];
    let mid_new = &new[head..new.len() - tail];

    let mut edits = Vec::with_capacity(old.len() + new.len());
    let mut old_pos = 0;
    let mut new_pos = 0;

    let mut emit = |op: EditOp| {
        edits.push(Edit {
            op,
            old_index: old_pos,
            new_index: new_pos,
        });
        match op {
            EditOp::Equal => {
                old_pos += 1;
                new_pos += 1;
            }
            EditOp::Delete => old_pos += 1,
            EditOp::Insert => new_pos += 1,
        }
    };

    for _ in 0..head {
        emit(EditOp::Equal);
    }
    for step in search(mid_old, mid_new) {
        match step {
            Step::Keep(count) => (0..count).for_each(|_| emit(EditOp::Equal)),
            Step::Drop => emit(EditOp::Delete),
            Step::Take => emit(EditOp::Insert),
        }
    }
    for _ in 0..tail {
        emit(EditOp::Equal);
    }

    edits
}

fn common_prefix(a: &[&[u8]], b: &[&[u8]]) -> usize {
    let mut n = 0;
    while n < a.len() && n < b.len() && a[n] == b[n] {
        n += 1;
    }
    n
}

fn common_suffix(a: &[&[u8]], b: &[&[u8]]) -> usize {
    let mut n = 0;
    while n < a.len() && n < b.len() && a[a.len() - 1 - n] == b[b.len() - 1 - n] {
        n += 1;
    }
    n
}

/// Index of a diagonal in the reach vector.
fn slot(diag: isize, bound: usize) -> usize {
    (diag + bound as isize) as usize
}

/// Greedy forward search over diagonals, then retrace the path.
fn search(old: &[&[u8]], new: &[&[u8]]) -> Vec<Step> {
    // With one side empty there is nothing to search.
    if old.is_empty() {
        return new.iter().map(|_| Step::Take).collect();
    }
    if new.is_empty() {
        return old.iter().map(|_| Step::Drop).collect();
    }

    let bound = old.len() + new.len();
    // reach[slot(diag)] = furthest old-side position reached on `diag`.
    // Diagonals touched in round d have parity d, their neighbours parity
    // d-1, so updating in place never clobbers a value the round reads.
    let mut reach = vec![0usize; 2 * bound + 1];
    let mut rounds: Vec<Vec<usize>> = Vec::new();

    'rounds: for d in 0..=(bound as isize) {
        let mut diag = -d;
        while diag <= d {
            let from_above = diag == -d
                || (diag != d && reach[slot(diag - 1, bound)] < reach[slot(diag + 1, bound)]);
            let start = if from_above {
                reach[slot(diag + 1, bound)]
            } else {
                reach[slot(diag - 1, bound)] + 1
            };

            let (mut x, mut y) = (start, (start as isize - diag) as usize);
            while x < old.len() && y < new.len() && old[x] == new[y] {
                x += 1;
                y += 1;
            }
            reach[slot(diag, bound)] = x;

            if x >= old.len() && y >= new.len() {
                rounds.push(reach);
                break 'rounds;
            }
            diag += 2;
        }
        rounds.push(reach.clone());
    }

    retrace(&rounds, old.len(), new.len(), bound)
}

/// Walk the path backwards from `(old_len, new_len)`; reversing the record
/// gives the forward step sequence.
fn retrace(rounds: &[Vec<usize>], old_len: usize, new_len: usize, bound: usize) -> Vec<Step> {
    let mut backwards = Vec::new();
    let mut x = old_len;
    let mut y = new_len;

    for d in (0..rounds.len()).rev() {
        let diag = x as isize - y as isize;

        if d == 0 {
            // Round zero starts at the origin; whatever remains is a snake.
            if x > 0 {
                backwards.push(Step::Keep(x));
            }
            break;
        }

        let prev = &rounds[d - 1];
        let d_i = d as isize;
        let from_above = diag == -d_i
            || (diag != d_i && prev[slot(diag - 1, bound)] < prev[slot(diag + 1, bound)]);
        let prev_diag = if from_above { diag + 1 } else { diag - 1 };
        let prev_x = prev[slot(prev_diag, bound)];
        let prev_y = (prev_x as isize - prev_diag) as usize;

        // Matched lines walked after this round's single non-diagonal move.
        let snake_start = if from_above { prev_x } else { prev_x + 1 };
        if x > snake_start {
            backwards.push(Step::Keep(x - snake_start));
        }
        backwards.push(if from_above { Step::Take } else { Step::Drop });

        x = prev_x;
        y = prev_y;
    }
    debug_assert!(y == 0 || x == y);

    backwards.reverse();
    backwards
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replay an edit script against `old`/`new` and return the rebuilt
    /// "new" side, checking index bookkeeping along the way.
    fn rebuild(edits: &[Edit], old: &[&[u8]], new: &[&[u8]]) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        for edit in edits {
            match edit.op {
                EditOp::Equal => {
                    assert_eq!(old[edit.old_index], new[edit.new_index]);
                    out.push(old[edit.old_index].to_vec());
                }
                EditOp::Insert => out.push(new[edit.new_index].to_vec()),
                EditOp::Delete => {}
            }
        }
        out
    }

    fn lines<'a>(text: &[&'a str]) -> Vec<&'a [u8]> {
        text.iter().map(|s| s.as_bytes()).collect()
    }

    fn count(edits: &[Edit], op: EditOp) -> usize {
        edits.iter().filter(|e| e.op == op).count()
    }

    #[test]
    fn unchanged_input_is_all_equal() {
        let a = lines(&["fn main() {\n", "}\n"]);
        let edits = diff(&a, &a);
        assert_eq!(count(&edits, EditOp::Equal), 2);
        assert_eq!(edits.len(), 2);
    }

    #[test]
    fn disjoint_inputs_swap_everything() {
        let a = lines(&["alpha\n", "beta\n"]);
        let b = lines(&["gamma\n", "delta\n"]);
        let edits = diff(&a, &b);
        assert_eq!(count(&edits, EditOp::Delete), 2);
        assert_eq!(count(&edits, EditOp::Insert), 2);
        assert_eq!(count(&edits, EditOp::Equal), 0);
    }

    #[test]
    fn appended_line() {
        let a = lines(&["one\n", "two\n"]);
        let b = lines(&["one\n", "two\n", "three\n"]);
        let edits = diff(&a, &b);
        assert_eq!(count(&edits, EditOp::Insert), 1);
        assert_eq!(count(&edits, EditOp::Equal), 2);
        assert_eq!(rebuild(&edits, &a, &b), b);
    }

    #[test]
    fn removed_middle_line() {
        let a = lines(&["one\n", "two\n", "three\n"]);
        let b = lines(&["one\n", "three\n"]);
        let edits = diff(&a, &b);
        assert_eq!(count(&edits, EditOp::Delete), 1);
        assert_eq!(count(&edits, EditOp::Equal), 2);
        assert_eq!(rebuild(&edits, &a, &b), b);
    }

    #[test]
    fn replaced_line_is_one_delete_one_insert() {
        let a = lines(&["keep\n", "old\n", "keep too\n"]);
        let b = lines(&["keep\n", "new\n", "keep too\n"]);
        let edits = diff(&a, &b);
        assert_eq!(count(&edits, EditOp::Delete), 1);
        assert_eq!(count(&edits, EditOp::Insert), 1);
        assert_eq!(count(&edits, EditOp::Equal), 2);
    }

    #[test]
    fn empty_sides() {
        let empty: Vec<&[u8]> = Vec::new();
        let some = lines(&["a\n", "b\n"]);

        assert!(diff(&empty, &empty).is_empty());

        let grown = diff(&empty, &some);
        assert_eq!(count(&grown, EditOp::Insert), 2);

        let shrunk = diff(&some, &empty);
        assert_eq!(count(&shrunk, EditOp::Delete), 2);
    }

    #[test]
    fn script_always_rebuilds_the_new_side() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["a\n"], &["a\n", "b\n", "c\n"]),
            (&["a\n", "b\n", "c\n"], &["c\n"]),
            (&["x\n", "m\n", "y\n"], &["m\n", "x\n", "y\n"]),
            (&["1\n", "2\n", "3\n", "4\n"], &["1\n", "x\n", "3\n", "y\n"]),
            (&[], &["only\n"]),
        ];
        for (old, new) in cases {
            let a = lines(old);
            let b = lines(new);
            let edits = diff(&a, &b);
            assert_eq!(rebuild(&edits, &a, &b), b, "case {old:?} -> {new:?}");
        }
    }
}
