//! Class set utility.
//!
//! A menu item's classes behave as a set (no duplicates) but keep the
//! order they were added in, so rendered output stays stable.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{MenuItem, MenuItemId};

/// The platform's "current" class vocabulary.
pub const CURRENT_VOCABULARY: [&str; 6] = [
    "current-menu-item",
    "current-menu-parent",
    "current-menu-ancestor",
    "current_page_item",
    "current_page_parent",
    "current_page_ancestor",
];

pub const CURRENT_MENU_ANCESTOR: &str = "current-menu-ancestor";

/// Added to every item whose referenced page/term is an ancestor of the current view.
pub const PAGE_ANCESTOR_CLASSES: [&str; 2] = ["current-page-ancestor", "current_page_ancestor"];

/// Added on top of [`PAGE_ANCESTOR_CLASSES`] for direct parents.
pub const PAGE_PARENT_CLASSES: [&str; 4] = [
    "current-page-parent",
    "current_page_parent",
    "current-menu-ancestor",
    "current-menu-parent",
];

/// Ordered, duplicate-free list of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassList(Vec<String>);

/// Classes gained and lost between two observations of the same item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ClassDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Add one class; returns `false` if it was already present.
    pub fn add(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.contains(&class) {
            return false;
        }
        self.0.push(class);
        true
    }

    /// Append classes in the given order, skipping any already present.
    pub fn add_all<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            self.add(class);
        }
    }

    /// Remove every class that appears in `classes`.
    pub fn remove_all<S: AsRef<str>>(&mut self, classes: &[S]) {
        self.0
            .retain(|c| !classes.iter().any(|remove| remove.as_ref() == c));
    }

    /// Whether any class is also in `other`.
    pub fn intersects<S: AsRef<str>>(&self, other: &[S]) -> bool {
        other.iter().any(|class| self.contains(class.as_ref()))
    }

    pub fn diff(before: &ClassList, after: &ClassList) -> ClassDiff {
        ClassDiff {
            added: after
                .iter()
                .filter(|c| !before.contains(c))
                .map(str::to_string)
                .collect(),
            removed: before
                .iter()
                .filter(|c| !after.contains(c))
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        list.add_all(iter);
        list
    }
}

// Deserializing goes through `add_all` so stored duplicates collapse.
impl<'de> Deserialize<'de> for ClassList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// Add `classes` to every item whose id is in `ids`.
pub fn add_classes_to_matching<S: AsRef<str>>(
    items: &mut [MenuItem],
    classes: &[S],
    ids: &HashSet<MenuItemId>,
) {
    for item in items.iter_mut().filter(|item| ids.contains(&item.id)) {
        item.classes
            .add_all(classes.iter().map(|class| class.as_ref().to_string()));
    }
}
