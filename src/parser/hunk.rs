//! Hunk splitting: partitioning a document into contiguous bullet runs

use super::line::{LineClassifier, ListLine};

/// A maximal run of consecutive list lines within a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// 0-based line number of the first line in the document
    pub start_line: usize,
    /// Classified lines in document order
    pub lines: Vec<ListLine>,
}

impl Hunk {
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Scans a document top to bottom and cuts it into [`Hunk`]s
///
/// Any non-list line flushes the current run, so prose interleaved with task
/// lists separates them into independent hunks.
#[derive(Debug, Default)]
pub struct HunkSplitter {
    classifier: LineClassifier,
}

impl HunkSplitter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
        }
    }

    /// Split `text` into hunks, in document order
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<Hunk> {
        let mut hunks = Vec::new();
        let mut buffer: Vec<ListLine> = Vec::new();
        let mut start_line = 0;

        for (number, raw) in text.lines().enumerate() {
            if let Some(line) = self.classifier.classify(raw) {
                if buffer.is_empty() {
                    start_line = number;
                }
                buffer.push(line);
            } else {
                Self::flush(&mut hunks, &mut buffer, start_line);
            }
        }
        Self::flush(&mut hunks, &mut buffer, start_line);

        hunks
    }

    fn flush(hunks: &mut Vec<Hunk>, buffer: &mut Vec<ListLine>, start_line: usize) {
        if buffer.is_empty() {
            return;
        }
        hunks.push(Hunk {
            start_line,
            lines: std::mem::take(buffer),
        });
    }
}
