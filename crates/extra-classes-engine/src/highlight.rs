//! Built-in page-context highlighting.
//!
//! Two independent passes, each a no-op unless the page context calls for it:
//!
//! - **single content in taxonomy**: while viewing a single post, taxonomy
//!   entries for the post's terms are marked as parents, entries for those
//!   terms' ancestor terms as ancestors.
//! - **attachment of page**: while viewing an attachment, content entries for
//!   the attachment's parent chain are marked as ancestors, the direct parent
//!   also as parent.
//!
//! Both passes then mark every matched item and all of its menu ancestors with
//! `current-menu-ancestor`, so dropdown parents light up too.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::ancestors::{MenuTree, taxonomy_term_ancestors};
use crate::classes::{
    CURRENT_MENU_ANCESTOR, PAGE_ANCESTOR_CLASSES, PAGE_PARENT_CLASSES, add_classes_to_matching,
};
use crate::error::MenuError;
use crate::models::{MenuItem, MenuItemId, PageContext, TermId};
use crate::platform::Platform;

/// Run both passes in order.
pub fn apply(
    items: &mut [MenuItem],
    context: &PageContext,
    platform: &dyn Platform,
) -> Result<(), MenuError> {
    highlight_single_in_taxonomy(items, context, platform)?;
    highlight_attachment_ancestors(items, context, platform)
}

pub fn highlight_single_in_taxonomy(
    items: &mut [MenuItem],
    context: &PageContext,
    platform: &dyn Platform,
) -> Result<(), MenuError> {
    if !context.is_single_content_view || context.is_attachment_view {
        return Ok(());
    }
    let Some(object) = context.current_object_id else {
        return Ok(());
    };

    let tree = MenuTree::new(items, platform);
    let mut term_ancestors: BTreeMap<String, HashSet<TermId>> = BTreeMap::new();
    let mut lineage = HashSet::new();

    for item in items.iter_mut() {
        let Some((term, taxonomy)) = item.term() else {
            continue;
        };
        if !platform.object_has_term(object, taxonomy, term) {
            continue;
        }

        let taxonomy = taxonomy.to_string();
        debug!("menu item {} is assigned term {term} in '{taxonomy}'", item.id);
        item.classes.add_all(PAGE_ANCESTOR_CLASSES);
        item.classes.add_all(PAGE_PARENT_CLASSES);

        term_ancestors
            .entry(taxonomy.clone())
            .or_default()
            .extend(taxonomy_term_ancestors(platform, term, &taxonomy));
        tree.collect_lineage(item.id, &mut lineage)?;
    }

    for item in items.iter_mut() {
        let Some((term, taxonomy)) = item.term() else {
            continue;
        };
        if term_ancestors
            .get(taxonomy)
            .is_some_and(|ancestors| ancestors.contains(&term))
        {
            debug!("menu item {} references ancestor term {term}", item.id);
            item.classes.add_all(PAGE_ANCESTOR_CLASSES);
            tree.collect_lineage(item.id, &mut lineage)?;
        }
    }

    mark_lineage(items, &lineage);
    Ok(())
}

pub fn highlight_attachment_ancestors(
    items: &mut [MenuItem],
    context: &PageContext,
    platform: &dyn Platform,
) -> Result<(), MenuError> {
    if !context.is_attachment_view {
        return Ok(());
    }
    let (Some(object), Some(parent)) = (context.current_object_id, context.parent_object_id) else {
        return Ok(());
    };

    let ancestors = platform.content_object_ancestors(object);
    let tree = MenuTree::new(items, platform);
    let mut lineage = HashSet::new();

    for item in items.iter_mut() {
        let Some(referenced) = item.object_id() else {
            continue;
        };
        if !ancestors.contains(&referenced) {
            continue;
        }

        item.classes.add_all(PAGE_ANCESTOR_CLASSES);
        if referenced == parent {
            debug!("menu item {} references the attachment parent {parent}", item.id);
            item.classes.add_all(PAGE_PARENT_CLASSES);
        }
        tree.collect_lineage(item.id, &mut lineage)?;
    }

    mark_lineage(items, &lineage);
    Ok(())
}

fn mark_lineage(items: &mut [MenuItem], lineage: &HashSet<MenuItemId>) {
    if !lineage.is_empty() {
        debug!("marking {} menu items as {CURRENT_MENU_ANCESTOR}", lineage.len());
    }
    add_classes_to_matching(items, &[CURRENT_MENU_ANCESTOR], lineage);
}
