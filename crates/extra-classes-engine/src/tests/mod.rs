//! Shared fixtures for unit tests.

use crate::models::MenuItem;
use crate::site::SiteSnapshot;

/// Custom-link menu items from `(id, parent)` pairs; a parent of `0` is top level.
pub fn menu<const N: usize>(pairs: [(u64, u64); N]) -> Vec<MenuItem> {
    pairs
        .into_iter()
        .map(|(id, parent)| MenuItem::custom(id).with_parent(parent))
        .collect()
}

/// A small blog: nested categories, a page tree with an attachment, and a product type.
///
/// ```text
/// category: world(1) > europe(2) > france(3);  news(4)
/// post_tag: featured(20)
/// page: about(7) > team(42) > photo.jpg(50, attachment)
/// post: hello(10) in france + news, tagged featured
/// product: widget(60)
/// ```
pub fn blog_site() -> SiteSnapshot {
    SiteSnapshot::default()
        .with_known_types(["post", "page", "attachment", "product"])
        .with_known_taxonomies(["category", "post_tag"])
        .with_term(1, "world", "category", 0)
        .with_term(2, "europe", "category", 1)
        .with_term(3, "france", "category", 2)
        .with_term(4, "news", "category", 0)
        .with_term(20, "featured", "post_tag", 0)
        .with_object(7, "page", 0)
        .with_object(42, "page", 7)
        .with_object(50, "attachment", 42)
        .with_object(10, "post", 0)
        .with_object_terms(10, "category", &[3, 4])
        .with_object_terms(10, "post_tag", &[20])
        .with_object(60, "product", 0)
}

/// Classes of the item with `id`, as plain strings.
pub fn classes_of(items: &[MenuItem], id: u64) -> Vec<&str> {
    items
        .iter()
        .find(|item| item.id.0 == id)
        .map(|item| item.classes.iter().collect())
        .unwrap_or_default()
}
