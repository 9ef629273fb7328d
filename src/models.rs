//! Core data types shared across the parser and the aggregate tree

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::date::{Week, Ymd};

/// Identity and label for the file a task came from
///
/// Two values are equal iff both fields match; many nodes may share one
/// logical source file by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record)]
pub struct SourceFile {
    /// Opaque URI the host can use to open the file
    pub open_uri: String,
    /// Human-readable label for rendering
    pub display_name: String,
}

impl SourceFile {
    #[must_use]
    pub fn new(open_uri: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            open_uri: open_uri.into(),
            display_name: display_name.into(),
        }
    }
}

/// Marker state of a `[ ]` / `[x]` checkbox prefix
///
/// A node without any checkbox prefix carries `Option::<CheckboxState>::None`
/// instead; such nodes are neither done nor undone on their own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum,
)]
pub enum CheckboxState {
    /// `[<any non-space char>]`
    Done,
    /// `[ ]`
    Undone,
}

impl CheckboxState {
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// One node of a parsed bullet-list tree
///
/// Children are in document order. The tree is owned top-down and immutable
/// once the builder emits it; the aggregate only ever clones subtrees into
/// task leaves, never rewrites them. Parent links exist only inside the
/// builder's index arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode {
    /// Bullet text with the checkbox prefix stripped
    pub text: String,
    pub checkbox: Option<CheckboxState>,
    pub children: Vec<ListNode>,
    pub source: SourceFile,
}

impl ListNode {
    #[must_use]
    pub const fn new(text: String, checkbox: Option<CheckboxState>, source: SourceFile) -> Self {
        Self {
            text,
            checkbox,
            children: Vec::new(),
            source,
        }
    }

    /// Total number of nodes in this subtree, itself included
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ListNode::node_count)
            .sum::<usize>()
    }
}

/// The grouping key for tasks: a single day or a Monday-to-Sunday week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Temporal {
    Day { date: Ymd },
    Range { week: Week },
}

impl Temporal {
    /// Representative date used for ordering and overdue comparisons:
    /// the day itself, or the week's starting Monday
    #[must_use]
    pub const fn anchor(&self) -> Ymd {
        match self {
            Self::Day { date } => *date,
            Self::Range { week } => week.start(),
        }
    }
}

macro_rules! impl_temporal_helpers {
    ($($variant:ident { $field:ident: $ty:ty }),*) => {
        $(
            impl Temporal {
                paste::paste! {
                    #[must_use]
                    pub fn [<as_ $variant:snake>](&self) -> Option<&$ty> {
                        if let Self::$variant { $field } = self {
                            Some($field)
                        } else {
                            None
                        }
                    }

                    #[must_use]
                    pub fn [<is_ $variant:snake>](&self) -> bool {
                        self.[<as_ $variant:snake>]().is_some()
                    }
                }
            }
        )*
    };
}

impl_temporal_helpers!(Day { date: Ymd }, Range { week: Week });

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day { date } => date.fmt(f),
            Self::Range { week } => week.fmt(f),
        }
    }
}
