//! Generic depth-first traversal with caller-supplied per-node contexts
//!
//! The walk enters a node, asks the visitor for one fresh context per child
//! (so siblings may receive distinct or identical contexts, at the visitor's
//! discretion), recurses, then exits with every child context in traversal
//! order. Renderers thread their state through the contexts instead of
//! sharing mutable captures across sibling subtrees.

use crate::models::ListNode;

use super::{RootAggregate, SourceNode, TaskNode, TemporalNode};

/// Borrowed handle to one aggregate node, dispatched by kind
///
/// A closed set: adding a node kind is a compile-time-checked exercise for
/// every visitor and for the merge logic.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Root(&'a RootAggregate),
    Temporal(&'a TemporalNode),
    Source(&'a SourceNode),
    Task(&'a TaskNode),
}

/// Anything the generic walk can traverse
pub trait Visitable: Copy {
    fn child_nodes(self) -> Vec<Self>;
}

impl<'a> Visitable for NodeRef<'a> {
    fn child_nodes(self) -> Vec<Self> {
        match self {
            Self::Root(root) => root.children.iter().map(NodeRef::Temporal).collect(),
            Self::Temporal(node) => node.children.iter().map(NodeRef::Source).collect(),
            Self::Source(node) => node.tasks.iter().map(NodeRef::Task).collect(),
            // Task subtrees are opaque payload; walk them separately as list nodes
            Self::Task(_) => Vec::new(),
        }
    }
}

impl<'a> Visitable for &'a ListNode {
    fn child_nodes(self) -> Vec<Self> {
        self.children.iter().collect()
    }
}

/// Caller-supplied hooks for [`walk`]
pub trait TreeVisitor<N: Visitable> {
    /// Per-node inbound state threaded down the tree
    type Context;

    /// Called once when the walk reaches `node`
    fn enter(&mut self, node: N, context: &mut Self::Context) {
        let _ = (node, context);
    }

    /// Produce the inbound context for the next child of `node`
    ///
    /// Called once per child, in document order — the factory-per-child
    /// shape that lets different children receive different state.
    fn child_context(&mut self, node: N, context: &Self::Context) -> Self::Context;

    /// Called after all children, with their contexts in traversal order
    fn exit(&mut self, node: N, context: &mut Self::Context, children: Vec<Self::Context>) {
        let _ = (node, context, children);
    }
}

/// Depth-first walk of `node` with `context` as its inbound state
pub fn walk<N, V>(node: N, visitor: &mut V, context: &mut V::Context)
where
    N: Visitable,
    V: TreeVisitor<N>,
{
    visitor.enter(node, context);

    let children = node.child_nodes();
    let mut child_contexts = Vec::with_capacity(children.len());
    for child in children {
        let mut child_context = visitor.child_context(node, context);
        walk(child, visitor, &mut child_context);
        child_contexts.push(child_context);
    }

    visitor.exit(node, context, child_contexts);
}
