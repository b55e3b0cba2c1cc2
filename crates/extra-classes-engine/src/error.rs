use crate::models::{MenuItemId, TermId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("Cyclic menu ancestry: walking up from item {start} revisited item {repeated}")]
    CyclicAncestry {
        start: MenuItemId,
        repeated: MenuItemId,
    },
    #[error("Cyclic term ancestry: term {term} in taxonomy '{taxonomy}' is its own ancestor")]
    CyclicTermAncestry { term: TermId, taxonomy: String },
}
