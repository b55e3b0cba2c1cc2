//! # Extra Classes
//!
//! Adds the selected/ancestor classes a content platform leaves off its
//! navigation menus: highlighting a category while reading a post filed in
//! it, a page while viewing one of its attachments, and anything site
//! builders opt into (or out of) with marker classes on the menu items.
//!
//! ```rust
//! use extra_classes_engine::{MenuItem, MenuPipeline, PageContext, RenderArgs, SiteSnapshot};
//!
//! let site = SiteSnapshot::default()
//!     .with_term(3, "news", "category", 0)
//!     .with_object(10, "post", 0)
//!     .with_object_terms(10, "category", &[3]);
//!
//! let items = vec![
//!     MenuItem::custom(1).with_title("Blog"),
//!     MenuItem::taxonomy(2, 3, "category").with_title("News").with_parent(1),
//! ];
//!
//! let run = MenuPipeline::default().run(
//!     items,
//!     &PageContext::single(10, "post"),
//!     &RenderArgs::default(),
//!     &site,
//! );
//! assert!(run.items[0].classes.contains("current-menu-ancestor"));
//! assert!(run.items[1].classes.contains("current-menu-parent"));
//! ```

pub mod ancestors;
pub mod classes;
pub mod error;
pub mod highlight;
pub mod models;
pub mod pipeline;
pub mod platform;
pub mod site;
pub mod states;
pub mod toggle;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use classes::{CURRENT_VOCABULARY, ClassDiff, ClassList};
pub use error::MenuError;
pub use models::*;
pub use pipeline::{ItemClassFilter, MenuPipeline, PipelineRun, RenderArgs, Stage, StageFailure};
pub use platform::{Platform, TermLookup};
pub use site::{SiteSnapshot, View};
pub use states::{DefaultStateHooks, StateEngine, StateHooks, StateKind, TemplateRegistry};
pub use toggle::GenericToggle;
