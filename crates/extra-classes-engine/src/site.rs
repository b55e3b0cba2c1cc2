//! In-memory [`Platform`] built from a serialized site description.
//!
//! Used by the command-line runner to replay a page render from a TOML
//! fixture, and by tests as a stand-in for the host platform.

use std::collections::{BTreeMap, HashSet};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::ancestors::menu_item_ancestor_ids;
use crate::error::MenuError;
use crate::models::{MenuItem, MenuItemId, ObjectId, PageContext, Term, TermId};
use crate::platform::{Platform, TermLookup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentObject {
    pub id: ObjectId,
    pub post_type: String,
    #[serde(default, with = "crate::models::zero_as_none")]
    pub parent: Option<ObjectId>,
    /// Directly assigned term ids, keyed by taxonomy.
    #[serde(default)]
    pub terms: BTreeMap<String, Vec<TermId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: TermId,
    pub slug: String,
    pub taxonomy: String,
    #[serde(default, with = "crate::models::zero_as_none")]
    pub parent: Option<TermId>,
}

impl TermRecord {
    fn to_term(&self) -> Term {
        Term {
            id: self.id,
            slug: self.slug.clone(),
            taxonomy: self.taxonomy.clone(),
        }
    }
}

/// A view to build a [`PageContext`] for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Single(ObjectId),
    Archive(String),
    Term { taxonomy: String, slug: String },
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSnapshot {
    pub known_types: Vec<String>,
    pub known_taxonomies: Vec<String>,
    pub context: PageContext,
    pub objects: Vec<ContentObject>,
    pub terms: Vec<TermRecord>,
    /// Menu items in render order.
    pub menu: Vec<MenuItem>,
}

impl SiteSnapshot {
    pub fn object(&self, id: ObjectId) -> Option<&ContentObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn term_record(&self, id: TermId, taxonomy: &str) -> Option<&TermRecord> {
        self.terms
            .iter()
            .find(|t| t.id == id && t.taxonomy == taxonomy)
    }

    /// Page context for `view`, or `None` if the view names something the site lacks.
    pub fn context_for(&self, view: &View) -> Option<PageContext> {
        match view {
            View::Single(id) => {
                let object = self.object(*id)?;
                if object.post_type == "attachment" {
                    Some(PageContext::attachment(
                        object.id.0,
                        object.parent.map_or(0, |p| p.0),
                    ))
                } else {
                    Some(PageContext::single(object.id.0, object.post_type.clone()))
                }
            }
            View::Archive(post_type) => Some(PageContext::post_type_archive(post_type.clone())),
            View::Term { taxonomy, slug } => self
                .term(TermLookup::Slug(slug), taxonomy)
                .map(PageContext::term_archive),
            View::NotFound => Some(PageContext::not_found()),
        }
    }

    /// Check that no term or menu-item parent chain loops.
    pub fn validate(&self) -> Result<(), MenuError> {
        for record in &self.terms {
            let mut seen = HashSet::from([record.id]);
            let mut current = record.parent;
            while let Some(parent) = current {
                if !seen.insert(parent) {
                    return Err(MenuError::CyclicTermAncestry {
                        term: record.id,
                        taxonomy: record.taxonomy.clone(),
                    });
                }
                current = self
                    .term_record(parent, &record.taxonomy)
                    .and_then(|t| t.parent);
            }
        }
        for item in &self.menu {
            menu_item_ancestor_ids(item.id, self.menu.as_slice())?;
        }
        Ok(())
    }

    pub fn with_known_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_known_taxonomies<I, S>(mut self, taxonomies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_taxonomies = taxonomies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_context(mut self, context: PageContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_object(mut self, id: u64, post_type: &str, parent: u64) -> Self {
        self.objects.push(ContentObject {
            id: ObjectId(id),
            post_type: post_type.to_string(),
            parent: ObjectId::non_zero(parent),
            terms: BTreeMap::new(),
        });
        self
    }

    /// Assign terms to an object added earlier with [`Self::with_object`].
    pub fn with_object_terms(mut self, id: u64, taxonomy: &str, terms: &[u64]) -> Self {
        if let Some(object) = self.objects.iter_mut().find(|o| o.id == ObjectId(id)) {
            object
                .terms
                .entry(taxonomy.to_string())
                .or_default()
                .extend(terms.iter().copied().map(TermId));
        }
        self
    }

    pub fn with_term(mut self, id: u64, slug: &str, taxonomy: &str, parent: u64) -> Self {
        self.terms.push(TermRecord {
            id: TermId(id),
            slug: slug.to_string(),
            taxonomy: taxonomy.to_string(),
            parent: TermId::non_zero(parent),
        });
        self
    }

    pub fn with_menu_item(mut self, item: MenuItem) -> Self {
        self.menu.push(item);
        self
    }
}

impl Platform for SiteSnapshot {
    fn current_page_context(&self) -> PageContext {
        self.context.clone()
    }

    fn content_object_ancestors(&self, object: ObjectId) -> Vec<ObjectId> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::from([object]);
        let mut current = self.object(object).and_then(|o| o.parent);
        while let Some(parent) = current {
            if !seen.insert(parent) {
                warn!("content object {object} has a cyclic parent chain at {parent}");
                break;
            }
            ancestors.push(parent);
            current = self.object(parent).and_then(|o| o.parent);
        }
        ancestors
    }

    fn term_ancestors(&self, term: TermId, taxonomy: &str) -> Vec<TermId> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::from([term]);
        let mut current = self.term_record(term, taxonomy).and_then(|t| t.parent);
        while let Some(parent) = current {
            if !seen.insert(parent) {
                warn!("term {term} in '{taxonomy}' has a cyclic parent chain at {parent}");
                break;
            }
            ancestors.push(parent);
            current = self.term_record(parent, taxonomy).and_then(|t| t.parent);
        }
        ancestors
    }

    fn term(&self, lookup: TermLookup<'_>, taxonomy: &str) -> Option<Term> {
        self.terms
            .iter()
            .filter(|t| t.taxonomy == taxonomy)
            .find(|t| match lookup {
                TermLookup::Id(id) => t.id == id,
                TermLookup::Slug(slug) => t.slug == slug,
            })
            .map(TermRecord::to_term)
    }

    fn object_has_term(&self, object: ObjectId, taxonomy: &str, term: TermId) -> bool {
        self.object(object)
            .and_then(|o| o.terms.get(taxonomy))
            .is_some_and(|terms| terms.contains(&term))
    }

    fn known_content_types(&self) -> Vec<String> {
        self.known_types.clone()
    }

    fn known_public_taxonomies(&self) -> Vec<String> {
        self.known_taxonomies.clone()
    }

    fn menu_item_parent(&self, item: MenuItemId) -> Option<MenuItemId> {
        self.menu
            .iter()
            .find(|i| i.id == item)
            .and_then(|i| i.parent)
    }
}
