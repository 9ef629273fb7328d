//! `UniFFI` bindings for the task collection engine
//!
//! This module provides an FFI interface so host applications can feed files
//! in, trigger collections, and read back flattened task rows without
//! touching the recursive trees.
#![allow(clippy::cast_possible_truncation, clippy::missing_panics_doc)]

use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::aggregate::visitor::{walk, NodeRef, TreeVisitor};
use crate::aggregate::SortOrder;
use crate::collect::Collector;
use crate::completion::is_all_checked;
use crate::date::Ymd;
use crate::error::WeeknoteError;
use crate::models::SourceFile;
use crate::template;

/// A flattened task row for FFI
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTask {
    /// Rendered temporal label, `"2025/03/03"` or `"2025/03/03 ~ 2025/03/09"`
    pub period: String,
    pub source_uri: String,
    pub source_name: String,
    pub text: String,
    pub all_checked: bool,
    pub subtask_count: u32,
}

/// A flattened malformed entry for FFI
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMalformed {
    pub reason: String,
    pub text: String,
    pub source_name: String,
}

struct State {
    root_paths: BTreeSet<String>,
    files: Vec<(SourceFile, String)>,
    collector: Collector,
}

/// Unified interface for running collections across platforms
#[derive(uniffi::Object)]
pub struct TaskCollection {
    state: Mutex<State>,
}

#[uniffi::export]
impl TaskCollection {
    /// Create a collection session for a set of root paths
    ///
    /// The set is the debounce cache key; path order does not matter.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(root_paths: Vec<String>) -> Self {
        Self {
            state: Mutex::new(State {
                root_paths: root_paths.into_iter().collect(),
                files: Vec::new(),
                collector: Collector::new(),
            }),
        }
    }

    /// Stage one file's identity and raw text for the next collection
    pub fn add_file(&self, open_uri: String, display_name: String, text: String) {
        let mut state = self.state.lock().unwrap();
        state
            .files
            .push((SourceFile::new(open_uri, display_name), text));
    }

    /// Drop all staged files
    pub fn clear_files(&self) {
        let mut state = self.state.lock().unwrap();
        state.files.clear();
    }

    /// Run a collection over the staged files; returns the task count
    ///
    /// Repeat calls within the debounce window answer from the cached tree.
    pub fn collect(&self) -> u32 {
        let mut state = self.state.lock().unwrap();
        let key = state.root_paths.clone();
        let files = state.files.clone();
        state.collector.collect(key, files).task_count() as u32
    }

    /// Number of task leaves in the last built tree
    pub fn task_count(&self) -> u32 {
        let state = self.state.lock().unwrap();
        state
            .collector
            .last(&state.root_paths)
            .map_or(0, |tree| tree.task_count() as u32)
    }

    /// Number of distinct temporal periods in the last built tree
    pub fn temporal_count(&self) -> u32 {
        let state = self.state.lock().unwrap();
        state
            .collector
            .last(&state.root_paths)
            .map_or(0, |tree| tree.children.len() as u32)
    }

    /// Flattened task rows from the last built tree, in tree order
    pub fn tasks(&self) -> Vec<FfiTask> {
        let state = self.state.lock().unwrap();
        let Some(tree) = state.collector.last(&state.root_paths) else {
            return Vec::new();
        };
        let mut flatten = Flatten {
            period: String::new(),
            out: Vec::new(),
        };
        walk(NodeRef::Root(tree), &mut flatten, &mut ());
        flatten.out
    }

    /// Malformed entries from the last built tree
    pub fn malformed_entries(&self) -> Vec<FfiMalformed> {
        let state = self.state.lock().unwrap();
        state
            .collector
            .last(&state.root_paths)
            .map_or_else(Vec::new, |tree| {
                tree.malformed
                    .iter()
                    .map(|entry| FfiMalformed {
                        reason: entry.reason.clone(),
                        text: entry.subtree.text.clone(),
                        source_name: entry.subtree.source.display_name.clone(),
                    })
                    .collect()
            })
    }

    /// Sort the last built tree's periods by anchor date
    pub fn sort_by_date(&self, ascending: bool) {
        let mut state = self.state.lock().unwrap();
        let key = state.root_paths.clone();
        if let Some(tree) = state.collector.last_mut(&key) {
            tree.sort_by_date(if ascending {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            });
        }
    }
}

/// Generate the flat day-per-line skeleton for `[from, to]`
///
/// # Errors
///
/// Returns an error for backwards bounds or non-calendar dates.
#[uniffi::export]
pub fn daily_skeleton(from: Ymd, to: Ymd) -> Result<String, WeeknoteError> {
    Ok(template::daily_skeleton(from, to)?)
}

/// Flattens the aggregate into rows, carrying the period label downward
struct Flatten {
    period: String,
    out: Vec<FfiTask>,
}

impl<'a> TreeVisitor<NodeRef<'a>> for Flatten {
    type Context = ();

    fn enter(&mut self, node: NodeRef<'a>, (): &mut ()) {
        match node {
            NodeRef::Temporal(temporal_node) => {
                self.period = temporal_node.temporal.to_string();
            }
            NodeRef::Task(task) => {
                self.out.push(FfiTask {
                    period: self.period.clone(),
                    source_uri: task.source.open_uri.clone(),
                    source_name: task.source.display_name.clone(),
                    text: task.subtree.text.clone(),
                    all_checked: is_all_checked(&task.subtree),
                    subtask_count: (task.subtree.node_count() - 1) as u32,
                });
            }
            NodeRef::Root(_) | NodeRef::Source(_) => {}
        }
    }

    fn child_context(&mut self, _node: NodeRef<'a>, (): &()) {}
}
