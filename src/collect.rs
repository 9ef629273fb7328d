//! Collection orchestration: per-file parsing and vault-wide merging
//!
//! Everything here is synchronous, single-threaded computation over owned
//! trees. Hosts with concurrent triggers must serialize collection requests
//! per root-path set; the cache below is plain value state, not a global.

use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use uuid::Uuid;

use crate::aggregate::{RootAggregate, TaskNode};
use crate::error::ClassifyError;
use crate::models::SourceFile;
use crate::parser::{build_trees, HunkSplitter, TemporalClassifier};

/// How long a built tree keeps answering repeat requests for the same roots
pub const STALENESS_WINDOW: Duration = Duration::from_secs(1);

/// Parse one file's text into a partial aggregate
///
/// Hunks that fail tree building are skipped whole (parse errors are fatal
/// per hunk, not per document). A hunk whose roots are all plain non-temporal
/// text is dropped silently so incidental Markdown lists never pollute the
/// malformed list; a hunk with at least one temporal or date-shaped root is
/// kept, and its failed roots are recorded as malformed.
#[must_use]
pub fn collect_document(source: &SourceFile, text: &str) -> RootAggregate {
    let splitter = HunkSplitter::new();
    let classifier = TemporalClassifier::new();
    let mut aggregate = RootAggregate::new();

    for hunk in splitter.split(text) {
        let roots = match build_trees(&hunk, source) {
            Ok(roots) => roots,
            Err(err) => {
                warn!(
                    "skipping hunk at line {} in {}: {err}",
                    hunk.start_line, source.display_name
                );
                continue;
            }
        };

        let classified: Vec<_> = roots
            .into_iter()
            .map(|root| {
                let outcome = classifier.classify(&root.text);
                (root, outcome)
            })
            .collect();

        let incidental = classified
            .iter()
            .all(|(_, outcome)| matches!(outcome, Err(ClassifyError::NotTemporal)));
        if incidental {
            debug!(
                "dropping hunk at line {} in {}: no temporal root",
                hunk.start_line, source.display_name
            );
            continue;
        }

        for (root, outcome) in classified {
            match outcome {
                Ok(temporal) => {
                    for child in root.children {
                        aggregate.insert_task(TaskNode::new(temporal, source.clone(), child));
                    }
                }
                Err(reason) => aggregate.push_malformed(reason.to_string(), root),
            }
        }
    }

    aggregate
}

struct CacheEntry {
    built_at: Instant,
    tree: RootAggregate,
}

/// Last-built trees keyed by the order-independent set of root paths
///
/// Lookup within the staleness window answers from cache instead of
/// re-collecting.
struct CollectionCache {
    entries: HashMap<BTreeSet<String>, CacheEntry>,
    window: Duration,
}

impl CollectionCache {
    fn new(window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            window,
        }
    }

    fn is_fresh(&self, key: &BTreeSet<String>, now: Instant) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| now.duration_since(entry.built_at) < self.window)
    }
}

/// Builds and caches vault-wide aggregates from per-file inputs
///
/// File enumeration belongs to the host: the collector receives each file as
/// a [`SourceFile`] identity plus raw text and never touches a filesystem.
pub struct Collector {
    cache: CollectionCache,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::with_staleness_window(STALENESS_WINDOW)
    }

    /// Override the debounce window (tests use zero or long windows)
    #[must_use]
    pub fn with_staleness_window(window: Duration) -> Self {
        Self {
            cache: CollectionCache::new(window),
        }
    }

    /// Run a full collection for `root_paths`, or answer from cache
    ///
    /// A request within the staleness window of the previous build for the
    /// same root-path set returns the cached tree without looking at `files`.
    pub fn collect<I>(&mut self, root_paths: BTreeSet<String>, files: I) -> &RootAggregate
    where
        I: IntoIterator<Item = (SourceFile, String)>,
    {
        let now = Instant::now();

        if self.cache.is_fresh(&root_paths, now) {
            debug!(
                "collection skipped: cache fresh for {} root path(s)",
                root_paths.len()
            );
        } else {
            let run = Uuid::new_v4();
            let mut tree = RootAggregate::new();
            let mut file_count = 0usize;
            for (source, text) in files {
                tree.merge(collect_document(&source, &text));
                file_count += 1;
            }
            info!(
                "collection {run}: {file_count} file(s), {} task(s), {} malformed",
                tree.task_count(),
                tree.malformed.len()
            );
            self.cache
                .entries
                .insert(root_paths.clone(), CacheEntry { built_at: now, tree });
        }

        &self
            .cache
            .entries
            .get(&root_paths)
            .expect("cache entry ensured above")
            .tree
    }

    /// The last tree built for a root-path set, regardless of freshness
    #[must_use]
    pub fn last(&self, root_paths: &BTreeSet<String>) -> Option<&RootAggregate> {
        self.cache.entries.get(root_paths).map(|entry| &entry.tree)
    }

    /// Mutable access to the last tree, e.g. for an on-demand date sort
    pub fn last_mut(&mut self, root_paths: &BTreeSet<String>) -> Option<&mut RootAggregate> {
        self.cache
            .entries
            .get_mut(root_paths)
            .map(|entry| &mut entry.tree)
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Ymd;
    use crate::models::Temporal;

    fn source(name: &str) -> SourceFile {
        SourceFile::new(format!("vault://{name}"), name)
    }

    fn roots(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn week_hunk_collects_one_task() {
        let aggregate =
            collect_document(&source("plan.md"), "- 2025/03/03 ~ 2025/03/09\n  - foo");

        assert_eq!(aggregate.children.len(), 1);
        assert!(aggregate.children[0].temporal.is_range());
        assert_eq!(aggregate.task_count(), 1);
        assert_eq!(
            aggregate.children[0].children[0].tasks[0].subtree.text,
            "foo"
        );
        assert!(aggregate.malformed.is_empty());
    }

    #[test]
    fn tuesday_start_is_recorded_malformed() {
        let text = "- 2025/03/03\n  - task\n- 2025/03/04 ~ 2025/03/09\n  - lost";
        let aggregate = collect_document(&source("plan.md"), text);

        assert_eq!(aggregate.task_count(), 1);
        assert_eq!(aggregate.malformed.len(), 1);
        assert_eq!(aggregate.malformed[0].reason, "invalid week range");
        assert_eq!(aggregate.malformed[0].subtree.text, "2025/03/04 ~ 2025/03/09");
    }

    #[test]
    fn lone_tuesday_start_hunk_is_still_malformed() {
        // date-shaped but semantically wrong: kept and reported, not dropped
        let aggregate = collect_document(&source("plan.md"), "- 2025/03/04 ~ 2025/03/09");

        assert_eq!(aggregate.task_count(), 0);
        assert_eq!(aggregate.malformed.len(), 1);
        assert_eq!(aggregate.malformed[0].reason, "invalid week range");
    }

    #[test]
    fn incidental_lists_are_dropped_silently() {
        let text = "- groceries\n  - milk\n  - eggs";
        let aggregate = collect_document(&source("notes.md"), text);

        assert!(aggregate.is_empty(), "no tasks and no malformed entries");
    }

    #[test]
    fn prose_root_beside_a_date_root_is_malformed() {
        let text = "- 2025/03/03\n  - task\n- reminder text";
        let aggregate = collect_document(&source("plan.md"), text);

        assert_eq!(aggregate.task_count(), 1);
        assert_eq!(aggregate.malformed.len(), 1);
        assert_eq!(aggregate.malformed[0].reason, "not a date or date range");
    }

    #[test]
    fn broken_hunk_is_skipped_but_rest_survives() {
        // second hunk has a non-multiple indent (6 % 4) and dies alone
        let text = "- 2025/03/03\n  - kept\n\n- 2025/03/04\n    - jumped\n      - deeper";
        let aggregate = collect_document(&source("plan.md"), text);

        assert_eq!(aggregate.task_count(), 1);
        assert_eq!(
            aggregate.find_temporal(&Temporal::Day {
                date: Ymd::new(2025, 3, 3)
            })
            .map(crate::aggregate::TemporalNode::task_count),
            Some(1)
        );
    }

    #[test]
    fn empty_date_root_contributes_nothing_but_is_not_malformed() {
        let aggregate = collect_document(&source("plan.md"), "- 2025/03/03");
        assert!(aggregate.children.is_empty());
        assert!(aggregate.malformed.is_empty());
    }

    #[test]
    fn two_files_merge_into_one_week_in_contribution_order() {
        let text = "- 2025/03/03 ~ 2025/03/09\n  - [ ] task";
        let mut merged = collect_document(&source("first.md"), text);
        merged.merge(collect_document(&source("second.md"), text));

        assert_eq!(merged.children.len(), 1);
        let sources: Vec<_> = merged.children[0]
            .children
            .iter()
            .map(|node| node.source.display_name.as_str())
            .collect();
        assert_eq!(sources, ["first.md", "second.md"]);
        assert_eq!(merged.task_count(), 2);
    }

    #[test]
    fn collector_debounces_within_window() {
        let mut collector = Collector::with_staleness_window(Duration::from_secs(600));
        let key = roots(&["notes"]);

        let first_tasks = collector
            .collect(
                key.clone(),
                vec![(source("a.md"), "- 2025/03/03\n  - one".to_string())],
            )
            .task_count();
        assert_eq!(first_tasks, 1);

        // different inputs, same key: answered from cache inside the window
        let second_tasks = collector
            .collect(
                key.clone(),
                vec![(source("b.md"), "- 2025/03/03\n  - two".to_string())],
            )
            .task_count();
        assert_eq!(second_tasks, 1);
        assert_eq!(collector.last(&key).map(RootAggregate::task_count), Some(1));
    }

    #[test]
    fn collector_rebuilds_after_window_expires() {
        let mut collector = Collector::with_staleness_window(Duration::ZERO);
        let key = roots(&["notes"]);

        collector.collect(
            key.clone(),
            vec![(source("a.md"), "- 2025/03/03\n  - one".to_string())],
        );
        let rebuilt = collector.collect(
            key.clone(),
            vec![(source("b.md"), "- 2025/03/03\n  - one\n  - two".to_string())],
        );
        assert_eq!(rebuilt.task_count(), 2);
    }

    #[test]
    fn cache_key_is_order_independent() {
        let mut collector = Collector::with_staleness_window(Duration::from_secs(600));
        collector.collect(
            roots(&["b", "a"]),
            vec![(source("a.md"), "- 2025/03/03\n  - one".to_string())],
        );
        assert!(collector.last(&roots(&["a", "b"])).is_some());
    }
}
