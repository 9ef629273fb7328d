//! The merged aggregate tree: Root → Temporal → Source → Task
//!
//! One [`RootAggregate`] holds everything one collection run produced.
//! Temporal children are unique by [`Temporal`] value, source children unique
//! by [`SourceFile`] value, and task leaves are never de-duplicated. Subtrees
//! that failed temporal classification ride along in a separate malformed
//! list instead of the hierarchy.

pub mod visitor;

use serde::{Deserialize, Serialize};

use crate::models::{ListNode, SourceFile, Temporal};

/// Direction for [`RootAggregate::sort_by_date`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Leaf wrapping one task and its nested sub-checklist
///
/// The subtree is opaque payload from the aggregate's point of view; merging
/// never inspects or rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    pub temporal: Temporal,
    pub source: SourceFile,
    pub subtree: ListNode,
}

impl TaskNode {
    #[must_use]
    pub const fn new(temporal: Temporal, source: SourceFile, subtree: ListNode) -> Self {
        Self {
            temporal,
            source,
            subtree,
        }
    }
}

/// All tasks one file contributed to one temporal period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceNode {
    pub source: SourceFile,
    pub tasks: Vec<TaskNode>,
}

impl SourceNode {
    #[must_use]
    pub const fn new(source: SourceFile) -> Self {
        Self {
            source,
            tasks: Vec::new(),
        }
    }

    fn push_task(&mut self, task: TaskNode) {
        // Chain mismatch is a construction bug, not a user-facing condition
        debug_assert_eq!(task.source, self.source, "task source disagrees with parent");
        self.tasks.push(task);
    }
}

/// All contributions for one day or week, grouped by source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalNode {
    pub temporal: Temporal,
    pub children: Vec<SourceNode>,
}

impl TemporalNode {
    #[must_use]
    pub const fn new(temporal: Temporal) -> Self {
        Self {
            temporal,
            children: Vec::new(),
        }
    }

    /// Find-or-create the source child and append the task
    pub fn insert_task(&mut self, task: TaskNode) {
        debug_assert_eq!(
            task.temporal, self.temporal,
            "task temporal disagrees with parent"
        );
        let source_node = match self
            .children
            .iter_mut()
            .find(|node| node.source == task.source)
        {
            Some(existing) => existing,
            None => {
                self.children.push(SourceNode::new(task.source.clone()));
                self.children
                    .last_mut()
                    .expect("source node pushed just above")
            }
        };
        source_node.push_task(task);
    }

    fn merge(&mut self, incoming: Self) {
        for source_node in incoming.children {
            match self
                .children
                .iter_mut()
                .find(|node| node.source == source_node.source)
            {
                Some(existing) => existing.tasks.extend(source_node.tasks),
                None => self.children.push(source_node),
            }
        }
    }

    /// Tasks under this period across all sources
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.children.iter().map(|node| node.tasks.len()).sum()
    }
}

/// A root-level subtree that failed temporal classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedEntry {
    /// Human-readable reason, e.g. `"invalid week range"`
    pub reason: String,
    /// The offending raw subtree, kept so the source can be located and fixed
    pub subtree: ListNode,
}

/// Top of one collection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAggregate {
    /// Temporal children, unique by [`Temporal`] value, in first-merge order
    pub children: Vec<TemporalNode>,
    /// Side-channel of entries that never joined the hierarchy
    pub malformed: Vec<MalformedEntry>,
}

impl RootAggregate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
            malformed: Vec::new(),
        }
    }

    /// Find-or-create the temporal chain and append the task
    pub fn insert_task(&mut self, task: TaskNode) {
        let temporal_node = match self
            .children
            .iter_mut()
            .find(|node| node.temporal == task.temporal)
        {
            Some(existing) => existing,
            None => {
                self.children.push(TemporalNode::new(task.temporal));
                self.children
                    .last_mut()
                    .expect("temporal node pushed just above")
            }
        };
        temporal_node.insert_task(task);
    }

    /// Record a subtree that failed classification
    pub fn push_malformed(&mut self, reason: impl Into<String>, subtree: ListNode) {
        self.malformed.push(MalformedEntry {
            reason: reason.into(),
            subtree,
        });
    }

    /// Look up the node for a temporal key
    #[must_use]
    pub fn find_temporal(&self, temporal: &Temporal) -> Option<&TemporalNode> {
        self.children.iter().find(|node| node.temporal == *temporal)
    }

    /// Merge another aggregate into this one
    ///
    /// Temporal subtrees move across wholesale when the key is absent;
    /// otherwise the merge recurses one level into source nodes with the
    /// same find-or-create-and-append rule. Malformed lists concatenate.
    /// Membership is order-independent, but child order within a level
    /// reflects merge order — that order is user-visible list order.
    pub fn merge(&mut self, incoming: Self) {
        for temporal_node in incoming.children {
            match self
                .children
                .iter_mut()
                .find(|node| node.temporal == temporal_node.temporal)
            {
                Some(existing) => existing.merge(temporal_node),
                None => self.children.push(temporal_node),
            }
        }
        self.malformed.extend(incoming.malformed);
    }

    /// Sort temporal children by anchor date
    ///
    /// Explicit and idempotent; invoked on demand rather than on every
    /// insertion. Stable, though temporal keys are unique by construction.
    pub fn sort_by_date(&mut self, order: SortOrder) {
        self.children.sort_by(|a, b| {
            let ordering = a.temporal.anchor().cmp(&b.temporal.anchor());
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    /// Total number of task leaves
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.children.iter().map(TemporalNode::task_count).sum()
    }

    /// Whether nothing was collected, malformed entries included
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.malformed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{Week, Ymd};

    fn source(name: &str) -> SourceFile {
        SourceFile::new(format!("vault://{name}"), name)
    }

    fn day(d: u32) -> Temporal {
        Temporal::Day {
            date: Ymd::new(2025, 3, d),
        }
    }

    fn week() -> Temporal {
        Temporal::Range {
            week: Week::containing(Ymd::new(2025, 3, 3)).unwrap(),
        }
    }

    fn task(temporal: Temporal, source: &SourceFile, text: &str) -> TaskNode {
        TaskNode::new(
            temporal,
            source.clone(),
            ListNode::new(text.into(), None, source.clone()),
        )
    }

    #[test]
    fn insert_creates_chain_once() {
        let mut root = RootAggregate::new();
        let file = source("plan.md");

        root.insert_task(task(day(3), &file, "a"));
        root.insert_task(task(day(3), &file, "b"));

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children.len(), 1);
        assert_eq!(root.children[0].children[0].tasks.len(), 2);
    }

    #[test]
    fn identical_tasks_are_not_deduplicated() {
        let mut root = RootAggregate::new();
        let file = source("plan.md");

        root.insert_task(task(day(3), &file, "same"));
        root.insert_task(task(day(3), &file, "same"));

        assert_eq!(root.task_count(), 2);
    }

    #[test]
    fn find_temporal_by_value() {
        let mut root = RootAggregate::new();
        root.insert_task(task(week(), &source("plan.md"), "a"));

        assert!(root.find_temporal(&week()).is_some());
        assert!(root.find_temporal(&day(3)).is_none());
    }

    #[test]
    fn merge_same_key_shares_shells() {
        let file = source("plan.md");

        let mut a = RootAggregate::new();
        a.insert_task(task(week(), &file, "one"));
        a.insert_task(task(week(), &file, "two"));

        let mut b = RootAggregate::new();
        b.insert_task(task(week(), &file, "three"));

        a.merge(b);

        assert_eq!(a.children.len(), 1, "one temporal shell");
        assert_eq!(a.children[0].children.len(), 1, "one source shell");
        assert_eq!(a.task_count(), 3);
    }

    #[test]
    fn merge_disjoint_keys_moves_subtrees() {
        let mut a = RootAggregate::new();
        a.insert_task(task(day(3), &source("a.md"), "a"));

        let mut b = RootAggregate::new();
        b.insert_task(task(day(4), &source("b.md"), "b"));

        a.merge(b);

        assert_eq!(a.children.len(), 2);
        assert_eq!(a.task_count(), 2);
    }

    #[test]
    fn merge_preserves_first_contribution_order_of_sources() {
        let first = source("first.md");
        let second = source("second.md");

        let mut a = RootAggregate::new();
        a.insert_task(task(week(), &first, "from first"));

        let mut b = RootAggregate::new();
        b.insert_task(task(week(), &second, "from second"));

        a.merge(b);

        let sources: Vec<_> = a.children[0]
            .children
            .iter()
            .map(|node| node.source.display_name.as_str())
            .collect();
        assert_eq!(sources, ["first.md", "second.md"]);

        // each source retains its own tasks, unmerged across files
        assert!(a.children[0].children[0].tasks[0].subtree.text == "from first");
        assert!(a.children[0].children[1].tasks[0].subtree.text == "from second");
    }

    #[test]
    fn merge_concatenates_malformed() {
        let file = source("plan.md");
        let mut a = RootAggregate::new();
        a.push_malformed("not a date or date range", ListNode::new("x".into(), None, file.clone()));

        let mut b = RootAggregate::new();
        b.push_malformed("invalid week range", ListNode::new("y".into(), None, file));

        a.merge(b);
        assert_eq!(a.malformed.len(), 2);
        assert_eq!(a.malformed[1].reason, "invalid week range");
    }

    #[test]
    fn sort_by_date_is_explicit_and_idempotent() {
        let file = source("plan.md");
        let mut root = RootAggregate::new();
        root.insert_task(task(day(9), &file, "later"));
        root.insert_task(task(day(1), &file, "earlier"));
        root.insert_task(task(week(), &file, "weekly"));

        // insertion order until sorted
        assert_eq!(root.children[0].temporal.anchor(), Ymd::new(2025, 3, 9));

        root.sort_by_date(SortOrder::Ascending);
        let anchors: Vec<_> = root.children.iter().map(|n| n.temporal.anchor()).collect();
        assert_eq!(
            anchors,
            [Ymd::new(2025, 3, 1), Ymd::new(2025, 3, 3), Ymd::new(2025, 3, 9)]
        );

        root.sort_by_date(SortOrder::Ascending);
        let again: Vec<_> = root.children.iter().map(|n| n.temporal.anchor()).collect();
        assert_eq!(anchors, again);

        root.sort_by_date(SortOrder::Descending);
        assert_eq!(root.children[0].temporal.anchor(), Ymd::new(2025, 3, 9));
    }
}
