//! Checkbox completion bubbling
//!
//! Isolated in its own module so the completion policy can change without
//! touching any tree walk.

use crate::models::{CheckboxState, ListNode};

/// Whether every task in `node`'s subtree is checked off
///
/// An unchecked checkbox anywhere below the node forces the answer to `false`
/// regardless of the node's own marker. Checkbox-less nodes are transparent
/// to that scan: they neither confirm nor deny completion, and the recursion
/// passes through them. When no descendant is definitely unchecked, the
/// answer falls back to the node's own checkbox being present and done — so a
/// node with no checkbox of its own stays open even when everything below it
/// is done.
#[must_use]
pub fn is_all_checked(node: &ListNode) -> bool {
    if has_unchecked_descendant(node) {
        return false;
    }
    node.checkbox == Some(CheckboxState::Done)
}

fn has_unchecked_descendant(node: &ListNode) -> bool {
    node.children.iter().any(|child| {
        child.checkbox == Some(CheckboxState::Undone) || has_unchecked_descendant(child)
    })
}
