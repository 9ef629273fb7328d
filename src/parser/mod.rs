//! Bullet-list parsing pipeline
//!
//! Raw document text flows through three stages: the [`HunkSplitter`] finds
//! maximal runs of bullet lines, the [`LineClassifier`] (used inside the
//! splitter) recognizes each line's indent and checkbox marker, and
//! [`tree::build_trees`] turns a hunk into owned [`crate::models::ListNode`]
//! trees using indentation alone. [`TemporalClassifier`] then decides whether
//! a root subtree names a day or a week.

pub mod classify;
pub mod hunk;
pub mod line;
pub mod tree;

pub use classify::TemporalClassifier;
pub use hunk::{Hunk, HunkSplitter};
pub use line::{LineClassifier, ListLine};
pub use tree::build_trees;
