use serde::{Deserialize, Serialize};

use crate::classes::ClassList;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Platform ids use zero for "no parent"/"unset".
            pub fn non_zero(raw: u64) -> Option<Self> {
                (raw != 0).then_some(Self(raw))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }
    };
}

id_type!(
    /// Identifier of a navigation entry
    MenuItemId
);
id_type!(
    /// Identifier of a content object (post, page, attachment, ...)
    ObjectId
);

pub(crate) use id_type;

/// What a menu entry points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MenuItemKind {
    /// Links to a content object
    Content { object_id: ObjectId },
    /// Links to a taxonomy term archive
    Taxonomy { term_id: crate::TermId, taxonomy: String },
    /// Custom link or anything else the rules never match against
    Custom,
}

/// One navigation entry as handed over by the platform.
///
/// Only `classes` is ever mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub kind: MenuItemKind,
    #[serde(default, with = "crate::models::zero_as_none")]
    pub parent: Option<MenuItemId>,
    #[serde(default)]
    pub classes: ClassList,
}

impl MenuItem {
    pub fn new(id: u64, kind: MenuItemKind) -> Self {
        Self {
            id: MenuItemId(id),
            title: String::new(),
            kind,
            parent: None,
            classes: ClassList::new(),
        }
    }

    pub fn content(id: u64, object_id: u64) -> Self {
        Self::new(
            id,
            MenuItemKind::Content {
                object_id: ObjectId(object_id),
            },
        )
    }

    pub fn taxonomy(id: u64, term_id: u64, taxonomy: impl Into<String>) -> Self {
        Self::new(
            id,
            MenuItemKind::Taxonomy {
                term_id: crate::TermId(term_id),
                taxonomy: taxonomy.into(),
            },
        )
    }

    pub fn custom(id: u64) -> Self {
        Self::new(id, MenuItemKind::Custom)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_parent(mut self, parent: u64) -> Self {
        self.parent = MenuItemId::non_zero(parent);
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.add_all(classes);
        self
    }

    /// The referenced content object, for content entries.
    pub fn object_id(&self) -> Option<ObjectId> {
        match self.kind {
            MenuItemKind::Content { object_id } => Some(object_id),
            _ => None,
        }
    }

    /// The referenced term and its taxonomy, for taxonomy entries.
    pub fn term(&self) -> Option<(crate::TermId, &str)> {
        match &self.kind {
            MenuItemKind::Taxonomy { term_id, taxonomy } => Some((*term_id, taxonomy.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_parent_means_top_level() {
        let item = MenuItem::custom(1).with_parent(0);
        assert_eq!(item.parent, None);

        let item = MenuItem::custom(2).with_parent(1);
        assert_eq!(item.parent, Some(MenuItemId(1)));
    }

    #[test]
    fn test_referenced_object_and_term() {
        let page = MenuItem::content(1, 42);
        assert_eq!(page.object_id(), Some(ObjectId(42)));
        assert_eq!(page.term(), None);

        let news = MenuItem::taxonomy(2, 3, "category");
        assert_eq!(news.object_id(), None);
        assert_eq!(news.term(), Some((crate::TermId(3), "category")));
    }

    #[test]
    fn test_deserialize_menu_item_from_toml() {
        let item: MenuItem = toml::from_str(
            r#"
id = 100
title = "News"
kind = "taxonomy"
term_id = 3
taxonomy = "category"
parent = 0
classes = ["menu-item", "menu-item", "news"]
"#,
        )
        .unwrap();

        assert_eq!(item.id, MenuItemId(100));
        assert_eq!(item.parent, None);
        assert_eq!(item.term(), Some((crate::TermId(3), "category")));
        assert_eq!(item.classes.as_slice(), ["menu-item", "news"]);
    }
}
