//! Generic content-type / taxonomy toggle.
//!
//! A menu item tagged `type-marker-product` is fully "current" whenever a
//! product (single or archive) is being viewed, and every untagged item loses
//! its "current" classes at the same time. Taxonomy tags work the same way
//! for taxonomy archives.

use log::debug;

use crate::classes::CURRENT_VOCABULARY;
use crate::models::{MenuItem, PageContext};
use crate::platform::Platform;

pub const DEFAULT_TYPE_PREFIX: &str = "type-marker-";
pub const DEFAULT_TAXONOMY_PREFIX: &str = "taxonomy-marker-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericToggle {
    pub type_prefix: String,
    pub taxonomy_prefix: String,
}

impl Default for GenericToggle {
    fn default() -> Self {
        Self {
            type_prefix: DEFAULT_TYPE_PREFIX.to_string(),
            taxonomy_prefix: DEFAULT_TAXONOMY_PREFIX.to_string(),
        }
    }
}

impl GenericToggle {
    pub fn type_tag(&self, post_type: &str) -> String {
        format!("{}{post_type}", self.type_prefix)
    }

    pub fn taxonomy_tag(&self, taxonomy: &str) -> String {
        format!("{}{taxonomy}", self.taxonomy_prefix)
    }

    pub fn apply(&self, items: &mut [MenuItem], context: &PageContext, platform: &dyn Platform) {
        for post_type in platform.known_content_types() {
            if context.is_content_type_view(&post_type) {
                toggle(items, &self.type_tag(&post_type));
            }
        }
        for taxonomy in platform.known_public_taxonomies() {
            if context.is_taxonomy_view(&taxonomy) {
                toggle(items, &self.taxonomy_tag(&taxonomy));
            }
        }
    }
}

/// Give tagged items the full vocabulary and strip it from everything else.
fn toggle(items: &mut [MenuItem], tag: &str) {
    debug!("toggling current classes on '{tag}'");
    for item in items.iter_mut() {
        if item.classes.contains(tag) {
            item.classes.add_all(CURRENT_VOCABULARY);
        } else {
            item.classes.remove_all(&CURRENT_VOCABULARY);
        }
    }
}
