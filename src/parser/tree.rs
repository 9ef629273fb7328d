//! Indent-to-tree builder
//!
//! Converts the flat, ordered lines of one hunk into rooted trees using a
//! single pass over the lines. Instead of an explicit stack, the builder
//! ascends parent handles inside an index arena; the emitted [`ListNode`]
//! trees are owned top-down and carry no parent links.

use crate::error::{ParseError, ParseResult};
use crate::models::{ListNode, SourceFile};

use super::hunk::Hunk;
use super::line::ListLine;

/// Indent step assumed when every line in a hunk has zero indent
const DEFAULT_INDENT_STEP: usize = 2;

/// Sentinel root of the arena; level -1, never emitted
const ROOT: usize = 0;

struct ArenaNode {
    /// Index into the hunk's lines; `None` only for the sentinel root
    line: Option<usize>,
    parent: usize,
    children: Vec<usize>,
}

/// Build the root-level subtrees of one hunk
///
/// The indent step is the minimum positive raw indent observed in the hunk,
/// so 2-space, 4-space and tab styles produce identical trees as long as each
/// hunk is internally consistent. Indentation may deepen by at most one level
/// per line.
///
/// # Errors
///
/// Returns [`ParseError::MalformedIndentation`] when a line's indent is not a
/// multiple of the hunk's indent step, and [`ParseError::IndentJump`] when a
/// line deepens by two or more levels. Both abort the whole hunk.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn build_trees(hunk: &Hunk, source: &SourceFile) -> ParseResult<Vec<ListNode>> {
    let step = indent_step(&hunk.lines);

    let mut arena = vec![ArenaNode {
        line: None,
        parent: ROOT,
        children: Vec::new(),
    }];
    let mut last = ROOT;
    let mut last_level: i64 = -1;

    for (offset, line) in hunk.lines.iter().enumerate() {
        let line_number = (hunk.start_line + offset) as u64;

        if line.indent_width % step != 0 {
            return Err(ParseError::malformed_indentation(
                line_number,
                line.indent_width as u64,
                step as u64,
            ));
        }
        let level = (line.indent_width / step) as i64;

        let parent = if level == last_level + 1 {
            last
        } else if level <= last_level {
            // Ascend to the node sitting at `level`, attach beside it. The
            // equal-level sibling case is the zero-step instance of this walk.
            let mut at = last;
            for _ in level..last_level {
                at = arena[at].parent;
            }
            arena[at].parent
        } else {
            return Err(ParseError::indent_jump(line_number, last_level, level));
        };

        let index = arena.len();
        arena.push(ArenaNode {
            line: Some(offset),
            parent,
            children: Vec::new(),
        });
        arena[parent].children.push(index);
        last = index;
        last_level = level;
    }

    let roots = arena[ROOT]
        .children
        .clone()
        .into_iter()
        .map(|index| freeze(&arena, &hunk.lines, index, source))
        .collect();
    Ok(roots)
}

/// Minimum positive raw indent across the hunk's lines
fn indent_step(lines: &[ListLine]) -> usize {
    lines
        .iter()
        .map(|line| line.indent_width)
        .filter(|width| *width > 0)
        .min()
        .unwrap_or(DEFAULT_INDENT_STEP)
}

fn freeze(arena: &[ArenaNode], lines: &[ListLine], index: usize, source: &SourceFile) -> ListNode {
    let slot = &arena[index];
    let line = &lines[slot.line.expect("sentinel root is never frozen")];
    let mut node = ListNode::new(line.text.clone(), line.checkbox, source.clone());
    node.children = slot
        .children
        .iter()
        .map(|&child| freeze(arena, lines, child, source))
        .collect();
    node
}
