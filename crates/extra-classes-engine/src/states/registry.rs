use log::debug;

use super::template::StateTemplate;

/// Which registry a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Selected,
    Deselected,
}

pub const BUILTIN_SELECTED_STATES: [&str; 5] = [
    "ecms-archive-%%post_type%%",
    "ecms-single-%%post_type%%",
    "ecms-taxonomy-%%taxonomy%%",
    "ecms-taxonomy-%%taxonomy%%-term-%%term%%",
    "ecms-%%404%%",
];

pub const BUILTIN_DESELECTED_STATES: [&str; 5] = [
    "ecms-no-archive-%%post_type%%",
    "ecms-no-single-%%post_type%%",
    "ecms-no-taxonomy-%%taxonomy%%",
    "ecms-no-taxonomy-%%taxonomy%%-term-%%term%%",
    "ecms-no-%%404%%",
];

/// Selected and deselected state templates, append-only and free of duplicates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    selected: Vec<StateTemplate>,
    deselected: Vec<StateTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_states() -> Self {
        let mut registry = Self::new();
        for state in BUILTIN_SELECTED_STATES {
            registry.register_selected(state);
        }
        for state in BUILTIN_DESELECTED_STATES {
            registry.register_deselected(state);
        }
        registry
    }

    /// Register a template unless an identical one (after sanitizing) is already present.
    ///
    /// Returns `true` if the registry changed.
    pub fn register(&mut self, kind: StateKind, raw: &str) -> bool {
        let Some(template) = StateTemplate::parse(raw) else {
            debug!("ignoring state template '{raw}': empty after sanitizing");
            return false;
        };
        let templates = match kind {
            StateKind::Selected => &mut self.selected,
            StateKind::Deselected => &mut self.deselected,
        };
        if templates.iter().any(|t| t.as_str() == template.as_str()) {
            return false;
        }
        debug!("registered {kind:?} state template '{template}'");
        templates.push(template);
        true
    }

    pub fn register_selected(&mut self, raw: &str) -> bool {
        self.register(StateKind::Selected, raw)
    }

    pub fn register_deselected(&mut self, raw: &str) -> bool {
        self.register(StateKind::Deselected, raw)
    }

    pub fn templates(&self, kind: StateKind) -> &[StateTemplate] {
        match kind {
            StateKind::Selected => &self.selected,
            StateKind::Deselected => &self.deselected,
        }
    }
}
