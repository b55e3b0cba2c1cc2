//! Pipeline orchestrator.
//!
//! Runs the annotation stages in a fixed order over one menu render:
//!
//! ```text
//! menu items (already ordered, platform defaults applied)
//!     │
//!     ├──> Contextual highlight  (single post in taxonomy, attachment of page)
//!     ├──> State templates       (ecms-* selected/deselected states)
//!     ├──> Generic toggle        (type-marker-* / taxonomy-marker-* tags)
//!     └──> Item filters          (host-registered per-item class filters)
//! ```
//!
//! Each stage works on a copy of the items that is only committed when the
//! stage succeeds, so a failing stage leaves earlier results intact and the
//! remaining stages still run.

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};

use crate::error::MenuError;
use crate::highlight;
use crate::models::{MenuItem, PageContext};
use crate::platform::Platform;
use crate::states::{DefaultStateHooks, StateEngine, StateHooks, TemplateRegistry};
use crate::toggle::GenericToggle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ContextualHighlight,
    StateTemplates,
    GenericToggle,
    ItemFilters,
}

impl Stage {
    pub const ORDER: [Stage; 4] = [
        Stage::ContextualHighlight,
        Stage::StateTemplates,
        Stage::GenericToggle,
        Stage::ItemFilters,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ContextualHighlight => "contextual highlight",
            Stage::StateTemplates => "state templates",
            Stage::GenericToggle => "generic toggle",
            Stage::ItemFilters => "item filters",
        };
        f.write_str(name)
    }
}

/// Opaque arguments of the menu being rendered, passed through to item filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderArgs {
    pub menu: Option<String>,
    pub theme_location: Option<String>,
}

/// Host hook that may adjust one item's classes after the built-in stages.
pub trait ItemClassFilter {
    fn filter(&self, item: &mut MenuItem, context: &PageContext, args: &RenderArgs);
}

impl<F> ItemClassFilter for F
where
    F: Fn(&mut MenuItem, &PageContext, &RenderArgs),
{
    fn filter(&self, item: &mut MenuItem, context: &PageContext, args: &RenderArgs) {
        self(item, context, args)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: Stage,
    pub error: MenuError,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    pub items: Vec<MenuItem>,
    pub failures: Vec<StageFailure>,
}

pub struct MenuPipeline {
    registry: TemplateRegistry,
    hooks: Box<dyn StateHooks>,
    toggle: GenericToggle,
    item_filters: Vec<Box<dyn ItemClassFilter>>,
    disabled: HashSet<Stage>,
}

impl Default for MenuPipeline {
    fn default() -> Self {
        Self::new(TemplateRegistry::with_builtin_states())
    }
}

impl MenuPipeline {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry,
            hooks: Box::new(DefaultStateHooks),
            toggle: GenericToggle::default(),
            item_filters: Vec::new(),
            disabled: HashSet::new(),
        }
    }

    pub fn with_hooks(mut self, hooks: impl StateHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_toggle(mut self, toggle: GenericToggle) -> Self {
        self.toggle = toggle;
        self
    }

    pub fn with_item_filter(mut self, filter: impl ItemClassFilter + 'static) -> Self {
        self.item_filters.push(Box::new(filter));
        self
    }

    /// Stages always run in [`Stage::ORDER`]; this only switches one on or off.
    pub fn with_stage(mut self, stage: Stage, enabled: bool) -> Self {
        if enabled {
            self.disabled.remove(&stage);
        } else {
            self.disabled.insert(stage);
        }
        self
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn register_selected_state(&mut self, template: &str) -> bool {
        self.registry.register_selected(template)
    }

    pub fn register_deselected_state(&mut self, template: &str) -> bool {
        self.registry.register_deselected(template)
    }

    pub fn is_enabled(&self, stage: Stage) -> bool {
        !self.disabled.contains(&stage)
    }

    /// Run every enabled stage over `items` for `context`.
    pub fn run(
        &self,
        items: Vec<MenuItem>,
        context: &PageContext,
        args: &RenderArgs,
        platform: &dyn Platform,
    ) -> PipelineRun {
        let mut run = PipelineRun {
            items,
            failures: Vec::new(),
        };

        for stage in Stage::ORDER {
            if !self.is_enabled(stage) {
                debug!("skipping disabled stage: {stage}");
                continue;
            }

            let mut working = run.items.clone();
            match self.run_stage(stage, &mut working, context, args, platform) {
                Ok(()) => run.items = working,
                Err(error) => {
                    warn!("stage '{stage}' failed, keeping earlier results: {error}");
                    run.failures.push(StageFailure { stage, error });
                }
            }
        }

        run
    }

    /// Entry point for a menu render: reads the page context from the platform
    /// and returns the annotated items in their original order.
    pub fn transform_menu_items(
        &self,
        items: Vec<MenuItem>,
        args: &RenderArgs,
        platform: &dyn Platform,
    ) -> Vec<MenuItem> {
        let context = platform.current_page_context();
        self.run(items, &context, args, platform).items
    }

    fn run_stage(
        &self,
        stage: Stage,
        items: &mut [MenuItem],
        context: &PageContext,
        args: &RenderArgs,
        platform: &dyn Platform,
    ) -> Result<(), MenuError> {
        debug!("running stage: {stage}");
        match stage {
            Stage::ContextualHighlight => highlight::apply(items, context, platform)?,
            Stage::StateTemplates => {
                StateEngine::new(&self.registry, self.hooks.as_ref(), platform).apply(items, context)
            }
            Stage::GenericToggle => self.toggle.apply(items, context, platform),
            Stage::ItemFilters => {
                for item in items.iter_mut() {
                    for filter in &self.item_filters {
                        filter.filter(item, context, args);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{blog_site, classes_of};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_order_is_preserved() {
        let items = vec![
            MenuItem::custom(3),
            MenuItem::taxonomy(1, 4, "category"),
            MenuItem::content(2, 7),
        ];

        let run = MenuPipeline::default().run(
            items,
            &PageContext::single(10, "post"),
            &RenderArgs::default(),
            &blog_site(),
        );

        let ids: Vec<u64> = run.items.iter().map(|item| item.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(run.failures.is_empty());
    }

    #[test]
    fn test_later_stage_can_reselect_after_deselection() {
        // Deselected by its state class, then re-selected by its type tag.
        let items = vec![MenuItem::custom(1).with_classes([
            "ecms-no-single-product",
            "type-marker-product",
            "current-menu-item",
        ])];

        let run = MenuPipeline::default().run(
            items,
            &PageContext::single(60, "product"),
            &RenderArgs::default(),
            &blog_site(),
        );

        assert!(run.items[0].classes.contains("current-menu-item"));
    }

    #[test]
    fn test_failed_stage_keeps_earlier_and_runs_later_stages() {
        let items = vec![
            MenuItem::taxonomy(1, 4, "category").with_parent(2),
            MenuItem::custom(2).with_parent(1),
            MenuItem::custom(3).with_classes(["ecms-single-post"]),
        ];

        // The toggle would strip every untagged item on a post view.
        let run = MenuPipeline::default()
            .with_stage(Stage::GenericToggle, false)
            .run(
                items,
                &PageContext::single(10, "post"),
                &RenderArgs::default(),
                &blog_site(),
            );

        assert_eq!(run.failures.len(), 1);
        assert_eq!(run.failures[0].stage, Stage::ContextualHighlight);
        // The failed highlight pass left no partial classes behind.
        assert!(classes_of(&run.items, 1).is_empty());
        assert_eq!(
            classes_of(&run.items, 3),
            vec!["ecms-single-post", "current-menu-ancestor"]
        );
    }

    #[test]
    fn test_toggle_strips_after_state_selection() {
        let items = vec![MenuItem::custom(1).with_classes(["ecms-single-post"])];

        let run = MenuPipeline::default().run(
            items,
            &PageContext::single(10, "post"),
            &RenderArgs::default(),
            &blog_site(),
        );

        assert_eq!(classes_of(&run.items, 1), vec!["ecms-single-post"]);
    }

    #[test]
    fn test_disabled_stage_is_skipped() {
        let items = vec![MenuItem::custom(1).with_classes(["ecms-single-post"])];

        let run = MenuPipeline::default()
            .with_stage(Stage::StateTemplates, false)
            .run(
                items,
                &PageContext::single(10, "post"),
                &RenderArgs::default(),
                &blog_site(),
            );

        assert_eq!(classes_of(&run.items, 1), vec!["ecms-single-post"]);
    }

    #[test]
    fn test_item_filters_run_last_with_args() {
        let items = vec![MenuItem::custom(1).with_classes(["type-marker-post"])];
        let args = RenderArgs {
            menu: Some("primary".into()),
            ..RenderArgs::default()
        };

        let run = MenuPipeline::default()
            .with_item_filter(|item: &mut MenuItem, _: &PageContext, args: &RenderArgs| {
                if args.menu.as_deref() == Some("primary")
                    && item.classes.contains("current-menu-item")
                {
                    item.classes.add("is-active");
                }
            })
            .run(items, &PageContext::single(10, "post"), &args, &blog_site());

        assert_eq!(classes_of(&run.items, 1).last(), Some(&"is-active"));
    }

    #[test]
    fn test_registered_state_is_used() {
        let mut pipeline = MenuPipeline::default().with_stage(Stage::GenericToggle, false);
        assert!(pipeline.register_selected_state("shop-%%post_type%%"));
        let items = vec![MenuItem::custom(1).with_classes(["shop-product"])];

        let run = pipeline.run(
            items,
            &PageContext::post_type_archive("product"),
            &RenderArgs::default(),
            &blog_site(),
        );

        assert!(run.items[0].classes.contains("current-menu-ancestor"));
    }

    #[test]
    fn test_transform_reads_context_from_platform() {
        let site = blog_site().with_context(PageContext::not_found());
        let items = vec![MenuItem::custom(1).with_classes(["ecms-404"])];

        let items = MenuPipeline::default().transform_menu_items(items, &RenderArgs::default(), &site);

        assert!(items[0].classes.contains("current-menu-ancestor"));
    }
}
