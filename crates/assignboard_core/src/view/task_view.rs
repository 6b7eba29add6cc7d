//! Filter + sort derivation for the to-do list.
//!
//! # Responsibility
//! - Project the task collection through one filter and one sort selector.
//!
//! # Invariants
//! - Filtering always happens before sorting.
//! - The source slice is never reordered.
//! - Sorting is stable: equal keys keep collection order.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Which tasks to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Placeholder text when the filtered list is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::All => "No tasks yet. Add some!",
            Self::Active => "No active tasks. Great job or add more!",
            Self::Completed => "No completed tasks yet.",
        }
    }
}

/// Display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskSort {
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
}

impl TaskSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "date-desc" => Some(Self::DateDesc),
            "date-asc" => Some(Self::DateAsc),
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            _ => None,
        }
    }
}

/// Returns the tasks to render, in render order.
pub fn derive_view(tasks: &[Task], filter: TaskFilter, sort: TaskSort) -> Vec<&Task> {
    let mut view = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .collect::<Vec<_>>();

    match sort {
        TaskSort::DateDesc => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        TaskSort::DateAsc => {
            // Collection is newest-first; reverse so same-millisecond ties
            // come out oldest-first too.
            view.reverse();
            view.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }
        TaskSort::NameAsc => view.sort_by(|a, b| compare_text(&a.text, &b.text)),
        TaskSort::NameDesc => view.sort_by(|a, b| compare_text(&b.text, &a.text)),
    }
    view
}

/// Collation-style text ordering for name sorts.
///
/// Levels, first difference wins: base letters ignoring case and accents,
/// then accents (unaccented first), then case (lowercase first).
pub fn compare_text(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| accented_letters(left).cmp(accented_letters(right)))
        .then_with(|| compare_case(left, right))
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}

fn compare_case(left: &str, right: &str) -> Ordering {
    left.nfd()
        .zip(right.nfd())
        .find(|(a, b)| a != b)
        .map_or_else(
            || left.nfd().count().cmp(&right.nfd().count()),
            |(a, b)| match (a.is_lowercase(), b.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => a.cmp(&b),
            },
        )
}
