//! The narrow read-only interface to the host content platform.

use crate::models::{MenuItemId, ObjectId, PageContext, Term, TermId};

/// How to look a term up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermLookup<'a> {
    Id(TermId),
    Slug(&'a str),
}

/// Queries the pipeline makes against the host platform.
///
/// All calls are synchronous and side-effect free. Ancestor lists are
/// ordered nearest first.
pub trait Platform {
    fn current_page_context(&self) -> PageContext;

    fn content_object_ancestors(&self, object: ObjectId) -> Vec<ObjectId>;

    fn term_ancestors(&self, term: TermId, taxonomy: &str) -> Vec<TermId>;

    fn term(&self, lookup: TermLookup<'_>, taxonomy: &str) -> Option<Term>;

    fn object_has_term(&self, object: ObjectId, taxonomy: &str, term: TermId) -> bool;

    fn known_content_types(&self) -> Vec<String>;

    fn known_public_taxonomies(&self) -> Vec<String>;

    /// Parent pointer persisted for a menu item, for items outside the rendered list.
    fn menu_item_parent(&self, _item: MenuItemId) -> Option<MenuItemId> {
        None
    }
}
