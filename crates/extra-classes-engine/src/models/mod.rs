pub mod menu_item;
pub mod page_context;

pub use menu_item::{MenuItem, MenuItemId, MenuItemKind, ObjectId};
pub use page_context::{PageContext, Term, TermId};

/// Parent pointers are stored as plain integers where `0` means "top level".
pub(crate) mod zero_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(id: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Copy + Into<u64>,
        S: Serializer,
    {
        serializer.serialize_u64(id.map_or(0, Into::into))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: From<u64>,
        D: Deserializer<'de>,
    {
        let raw = Option::<u64>::deserialize(deserializer)?;
        Ok(raw.filter(|&raw| raw != 0).map(T::from))
    }
}
