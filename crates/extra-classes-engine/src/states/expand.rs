use log::{debug, trace, warn};

use super::registry::{StateKind, TemplateRegistry};
use super::template::{Placeholder, StateTemplate};
use crate::classes::{CURRENT_MENU_ANCESTOR, CURRENT_VOCABULARY};
use crate::models::{MenuItem, PageContext, Term};
use crate::platform::{Platform, TermLookup};

/// Overrides for the taxonomy and term templates are expanded against.
pub trait StateHooks {
    fn current_taxonomy(&self, context: &PageContext) -> Option<String> {
        context.active_taxonomy.clone()
    }

    fn current_term(&self, context: &PageContext) -> Option<Term> {
        context.active_term.clone()
    }
}

/// Uses the page context as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStateHooks;

impl StateHooks for DefaultStateHooks {}

/// Resolved placeholder values for one expansion.
#[derive(Clone, Copy)]
struct Values<'v> {
    post_type: Option<&'v str>,
    taxonomy: Option<&'v str>,
    term: Option<&'v str>,
    not_found: Option<&'v str>,
}

impl<'v> Values<'v> {
    fn get(&self, placeholder: Placeholder) -> Option<&'v str> {
        match placeholder {
            Placeholder::PostType => self.post_type,
            Placeholder::Taxonomy => self.taxonomy,
            Placeholder::Term => self.term,
            Placeholder::NotFound => self.not_found,
        }
    }
}

/// Expands registered templates for one page context and applies them to menu items.
pub struct StateEngine<'a> {
    registry: &'a TemplateRegistry,
    hooks: &'a dyn StateHooks,
    platform: &'a dyn Platform,
}

impl<'a> StateEngine<'a> {
    pub fn new(
        registry: &'a TemplateRegistry,
        hooks: &'a dyn StateHooks,
        platform: &'a dyn Platform,
    ) -> Self {
        Self {
            registry,
            hooks,
            platform,
        }
    }

    /// Concrete states `template` stands for in `context`; empty if any placeholder is unresolvable.
    ///
    /// A `%%term%%` placeholder yields one state for the active term followed by one
    /// per ancestor term, nearest first. It only resolves alongside `%%taxonomy%%`.
    pub fn expand(&self, template: &StateTemplate, context: &PageContext) -> Vec<String> {
        let taxonomy = if template.contains(Placeholder::Taxonomy) {
            self.hooks.current_taxonomy(context)
        } else {
            None
        };
        let values = Values {
            post_type: context.resolvable_post_type(),
            taxonomy: taxonomy.as_deref(),
            term: None,
            not_found: context.is_404.then_some("404"),
        };

        if !template.contains(Placeholder::Term) {
            return template.render(|p| values.get(p)).into_iter().collect();
        }
        if values.taxonomy.is_none() {
            return Vec::new();
        }
        let slugs = self.term_slugs(context);
        slugs
            .iter()
            .filter_map(|slug| {
                let values = Values {
                    term: Some(slug.as_str()),
                    ..values
                };
                template.render(|p| values.get(p))
            })
            .collect()
    }

    /// Slugs of the active term and its ancestors.
    fn term_slugs(&self, context: &PageContext) -> Vec<String> {
        let Some(term) = self.hooks.current_term(context) else {
            return Vec::new();
        };

        let mut slugs = vec![term.slug.clone()];
        for ancestor in self.platform.term_ancestors(term.id, &term.taxonomy) {
            match self.platform.term(TermLookup::Id(ancestor), &term.taxonomy) {
                Some(record) => slugs.push(record.slug),
                None => warn!(
                    "ancestor term {ancestor} of '{}' not found in '{}'",
                    term.slug, term.taxonomy
                ),
            }
        }
        slugs
    }

    /// Every registered template of `kind` expanded against `context`.
    pub fn current_states(&self, kind: StateKind, context: &PageContext) -> Vec<String> {
        let states: Vec<String> = self
            .registry
            .templates(kind)
            .iter()
            .flat_map(|template| self.expand(template, context))
            .filter(|state| !state.is_empty())
            .collect();
        debug!("current {kind:?} states: {states:?}");
        states
    }

    pub fn current_selected_states(&self, context: &PageContext) -> Vec<String> {
        self.current_states(StateKind::Selected, context)
    }

    pub fn current_deselected_states(&self, context: &PageContext) -> Vec<String> {
        self.current_states(StateKind::Deselected, context)
    }

    /// Deselect or select items whose classes name a current state.
    ///
    /// Deselection is checked first and excludes selection for the same item.
    pub fn apply(&self, items: &mut [MenuItem], context: &PageContext) {
        let selected = self.current_selected_states(context);
        let deselected = self.current_deselected_states(context);

        for item in items.iter_mut() {
            if item.classes.intersects(&deselected) {
                trace!("menu item {} deselected", item.id);
                item.classes.remove_all(&CURRENT_VOCABULARY);
            } else if item.classes.intersects(&selected) {
                trace!("menu item {} selected", item.id);
                item.classes.add(CURRENT_MENU_ANCESTOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{blog_site, classes_of};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn expand(raw: &str, context: &PageContext) -> Vec<String> {
        let site = blog_site();
        let registry = TemplateRegistry::new();
        let engine = StateEngine::new(&registry, &DefaultStateHooks, &site);
        engine.expand(&StateTemplate::parse(raw).unwrap(), context)
    }

    fn term(id: u64, slug: &str) -> Term {
        Term::new(id, slug, "category")
    }

    #[rstest]
    #[case("ecms-single-%%post_type%%", PageContext::single(10, "post"), vec!["ecms-single-post"])]
    #[case("ecms-archive-%%post_type%%", PageContext::post_type_archive("product"), vec!["ecms-archive-product"])]
    #[case("ecms-archive-%%post_type%%", PageContext::single(60, "product"), vec!["ecms-archive-product"])]
    #[case("ecms-single-%%post_type%%", PageContext::term_archive(term(4, "news")), vec![])]
    #[case("ecms-single-%%post_type%%", PageContext::not_found(), vec![])]
    #[case("ecms-taxonomy-%%taxonomy%%", PageContext::term_archive(term(4, "news")), vec!["ecms-taxonomy-category"])]
    #[case("ecms-taxonomy-%%taxonomy%%", PageContext::single(10, "post"), vec![])]
    #[case("ecms-%%404%%", PageContext::not_found(), vec!["ecms-404"])]
    #[case("ecms-%%404%%", PageContext::single(10, "post"), vec![])]
    #[case("ecms-no-%%404%%", PageContext::default(), vec![])]
    #[case("sale", PageContext::default(), vec!["sale"])]
    #[case("ecms-term-%%term%%", PageContext::term_archive(term(3, "france")), vec![])]
    fn test_expand(#[case] raw: &str, #[case] context: PageContext, #[case] expected: Vec<&str>) {
        assert_eq!(expand(raw, &context), expected);
    }

    #[test]
    fn test_term_expands_over_ancestors() {
        let context = PageContext::term_archive(term(3, "france"));

        assert_eq!(
            expand("ecms-taxonomy-%taxonomy%-term-%term%", &context),
            vec![
                "ecms-taxonomy-category-term-france",
                "ecms-taxonomy-category-term-europe",
                "ecms-taxonomy-category-term-world",
            ]
        );
    }

    #[test]
    fn test_term_without_active_term_is_empty() {
        let context = PageContext {
            active_taxonomy: Some("category".into()),
            ..PageContext::default()
        };

        assert!(expand("ecms-taxonomy-%%taxonomy%%-term-%%term%%", &context).is_empty());
        assert_eq!(
            expand("ecms-taxonomy-%%taxonomy%%", &context),
            vec!["ecms-taxonomy-category"]
        );
    }

    #[test]
    fn test_term_without_taxonomy_is_empty() {
        let context = PageContext {
            active_term: Some(term(3, "france")),
            ..PageContext::default()
        };

        assert!(expand("ecms-term-%%term%%", &context).is_empty());
    }

    struct TopicsAsCategories;

    impl StateHooks for TopicsAsCategories {
        fn current_taxonomy(&self, context: &PageContext) -> Option<String> {
            match context.active_taxonomy.as_deref() {
                Some("topic") => Some("category".to_string()),
                other => other.map(str::to_string),
            }
        }
    }

    #[test]
    fn test_hooks_override_taxonomy() {
        let site = blog_site();
        let registry = TemplateRegistry::new();
        let engine = StateEngine::new(&registry, &TopicsAsCategories, &site);
        let context = PageContext::term_archive(Term::new(70, "rust", "topic"));

        let states = engine.expand(
            &StateTemplate::parse("ecms-taxonomy-%%taxonomy%%-term-%%term%%").unwrap(),
            &context,
        );

        assert_eq!(states, vec!["ecms-taxonomy-category-term-rust"]);
    }

    #[test]
    fn test_current_states_concatenates_registry() {
        let site = blog_site();
        let registry = TemplateRegistry::with_builtin_states();
        let engine = StateEngine::new(&registry, &DefaultStateHooks, &site);
        let context = PageContext::term_archive(term(2, "europe"));

        assert_eq!(
            engine.current_selected_states(&context),
            vec![
                "ecms-taxonomy-category",
                "ecms-taxonomy-category-term-europe",
                "ecms-taxonomy-category-term-world",
            ]
        );
        assert_eq!(
            engine.current_deselected_states(&context),
            vec![
                "ecms-no-taxonomy-category",
                "ecms-no-taxonomy-category-term-europe",
                "ecms-no-taxonomy-category-term-world",
            ]
        );
    }

    fn apply_builtin(items: &mut [MenuItem], context: &PageContext) {
        let site = blog_site();
        let registry = TemplateRegistry::with_builtin_states();
        StateEngine::new(&registry, &DefaultStateHooks, &site).apply(items, context);
    }

    #[test]
    fn test_apply_selects_and_deselects() {
        let mut items = vec![
            MenuItem::custom(1).with_classes(["ecms-single-product"]),
            MenuItem::content(2, 7).with_classes(["ecms-no-single-product", "current-menu-item", "current_page_item"]),
            MenuItem::custom(3).with_classes(["ecms-single-post"]),
        ];

        apply_builtin(&mut items, &PageContext::single(60, "product"));

        assert_eq!(classes_of(&items, 1), vec!["ecms-single-product", "current-menu-ancestor"]);
        assert_eq!(classes_of(&items, 2), vec!["ecms-no-single-product"]);
        assert_eq!(classes_of(&items, 3), vec!["ecms-single-post"]);
    }

    #[test]
    fn test_deselection_wins() {
        let mut items = vec![MenuItem::custom(1).with_classes([
            "ecms-single-product",
            "ecms-no-archive-product",
            "current-menu-parent",
        ])];

        apply_builtin(&mut items, &PageContext::single(60, "product"));

        assert_eq!(
            classes_of(&items, 1),
            vec!["ecms-single-product", "ecms-no-archive-product"]
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut items = vec![
            MenuItem::custom(1).with_classes(["ecms-taxonomy-category-term-world"]),
            MenuItem::custom(2).with_classes(["ecms-no-taxonomy-category", "current-menu-item"]),
        ];
        let context = PageContext::term_archive(term(3, "france"));

        apply_builtin(&mut items, &context);
        let once = items.clone();
        apply_builtin(&mut items, &context);

        assert_eq!(items, once);
        assert_eq!(
            classes_of(&items, 1),
            vec!["ecms-taxonomy-category-term-world", "current-menu-ancestor"]
        );
    }
}
