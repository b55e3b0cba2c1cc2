//! State template engine.
//!
//! Site builders put state classes such as `ecms-single-product` or
//! `ecms-no-taxonomy-category` on menu items. Templates in the
//! [`TemplateRegistry`] describe which of those classes describe the current
//! view: each is expanded against the [`PageContext`], and items carrying a
//! matching selected state gain `current-menu-ancestor` while items carrying
//! a matching deselected state lose the whole "current" vocabulary.
//!
//! | template                                      | selects when viewing          |
//! |-----------------------------------------------|-------------------------------|
//! | `ecms-archive-%%post_type%%`                  | a post type archive or single |
//! | `ecms-single-%%post_type%%`                   | a post type archive or single |
//! | `ecms-taxonomy-%%taxonomy%%`                  | a taxonomy archive            |
//! | `ecms-taxonomy-%%taxonomy%%-term-%%term%%`    | a term archive (or a child's) |
//! | `ecms-%%404%%`                                | the not-found page            |
//!
//! Each has an `ecms-no-` deselecting twin.

mod expand;
mod registry;
mod template;

pub use expand::{DefaultStateHooks, StateEngine, StateHooks};
pub use registry::{
    BUILTIN_DESELECTED_STATES, BUILTIN_SELECTED_STATES, StateKind, TemplateRegistry,
};
pub use template::{Placeholder, Segment, StateTemplate, sanitize_state};
