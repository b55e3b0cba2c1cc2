use std::collections::{HashMap, HashSet};

use log::trace;

use crate::error::MenuError;
use crate::models::{MenuItem, MenuItemId, TermId};
use crate::platform::Platform;

/// Source of menu-item parent pointers.
pub trait MenuParents {
    fn parent_of(&self, item: MenuItemId) -> Option<MenuItemId>;
}

impl MenuParents for [MenuItem] {
    fn parent_of(&self, item: MenuItemId) -> Option<MenuItemId> {
        self.iter().find(|i| i.id == item).and_then(|i| i.parent)
    }
}

/// Parent pointers of the rendered items, falling back to the platform
/// for ids that are not part of the list.
pub struct MenuTree<'a> {
    parents: HashMap<MenuItemId, Option<MenuItemId>>,
    platform: &'a dyn Platform,
}

impl<'a> MenuTree<'a> {
    pub fn new(items: &[MenuItem], platform: &'a dyn Platform) -> Self {
        Self {
            parents: items.iter().map(|item| (item.id, item.parent)).collect(),
            platform,
        }
    }

    /// Collect `item` and all of its menu ancestors into `ids`.
    pub fn collect_lineage(
        &self,
        item: MenuItemId,
        ids: &mut HashSet<MenuItemId>,
    ) -> Result<(), MenuError> {
        ids.insert(item);
        ids.extend(menu_item_ancestor_ids(item, self)?);
        Ok(())
    }
}

impl MenuParents for MenuTree<'_> {
    fn parent_of(&self, item: MenuItemId) -> Option<MenuItemId> {
        match self.parents.get(&item) {
            Some(parent) => *parent,
            None => self.platform.menu_item_parent(item),
        }
    }
}

/// Ids of every ancestor of `item`, nearest first.
///
/// Fails with [`MenuError::CyclicAncestry`] if the chain loops back on itself.
pub fn menu_item_ancestor_ids<P>(item: MenuItemId, parents: &P) -> Result<Vec<MenuItemId>, MenuError>
where
    P: MenuParents + ?Sized,
{
    let mut ancestors = Vec::new();
    let mut visited = HashSet::from([item]);
    let mut current = parents.parent_of(item);

    while let Some(parent) = current {
        if !visited.insert(parent) {
            return Err(MenuError::CyclicAncestry {
                start: item,
                repeated: parent,
            });
        }
        ancestors.push(parent);
        current = parents.parent_of(parent);
    }

    trace!("menu item {item} ancestors: {ancestors:?}");
    Ok(ancestors)
}

/// Ancestor term ids of `term`, nearest first.
pub fn taxonomy_term_ancestors(platform: &dyn Platform, term: TermId, taxonomy: &str) -> Vec<TermId> {
    platform.term_ancestors(term, taxonomy)
}
