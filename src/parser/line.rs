//! Line-level recognition of bullet list lines

use regex::Regex;

use crate::models::CheckboxState;

/// A single recognized bullet line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    /// Raw indent length in characters (spaces or tabs, not normalized)
    pub indent_width: usize,
    /// Checkbox marker, if the content carried a `[<c>] ` prefix
    pub checkbox: Option<CheckboxState>,
    /// Content with the bullet and checkbox prefix stripped
    pub text: String,
}

/// Recognizes `"<indent>- <content>"` and bare `"<indent>-"` lines
#[derive(Debug)]
pub struct LineClassifier {
    bullet: Regex,
    checkbox: Regex,
}

impl LineClassifier {
    /// Create a classifier with the bullet and checkbox patterns compiled
    #[must_use]
    pub fn new() -> Self {
        Self {
            bullet: Regex::new(r"^([ \t]*)-(?: (.*))?$").unwrap(),
            checkbox: Regex::new(r"^\[(.)\] (.*)$").unwrap(),
        }
    }

    /// Classify one raw line; `None` means it is not a list line
    ///
    /// A `[ ]` marker is undone, any other single-character marker is done,
    /// and content without the `[...] ` prefix carries no checkbox at all.
    #[must_use]
    pub fn classify(&self, raw: &str) -> Option<ListLine> {
        let caps = self.bullet.captures(raw)?;
        let indent_width = caps.get(1).map_or(0, |m| m.as_str().len());
        let content = caps.get(2).map_or("", |m| m.as_str());

        let (checkbox, text) = match self.checkbox.captures(content) {
            Some(marked) => {
                let marker = marked.get(1).map_or("", |m| m.as_str());
                let state = if marker == " " {
                    CheckboxState::Undone
                } else {
                    CheckboxState::Done
                };
                let rest = marked.get(2).map_or("", |m| m.as_str());
                (Some(state), rest.to_string())
            }
            None => (None, content.to_string()),
        };

        Some(ListLine {
            indent_width,
            checkbox,
            text,
        })
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
