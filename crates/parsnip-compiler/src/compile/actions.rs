//! Custom-action registry and rule-mode dispatch.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parsnip_program::Fragment;

use crate::grammar::Grammar;

use super::compiler::EmitCtx;

/// A registered custom action: receives the compiled rule body and returns
/// a full replacement, taking over node construction.
pub type CustomFn = Arc<dyn Fn(&mut ActionCtx<'_>, Fragment) -> Fragment + Send + Sync>;

/// Per-rule compilation mode, resolved once before a pass begins.
#[derive(Clone, Default)]
pub enum RuleMode {
    /// Default node-construction protocol.
    #[default]
    Default,
    /// Skip rule: successful matches widen the shared ignore span instead
    /// of building a node.
    Ignore,
    /// Rule wrapping replaced by a registered transform.
    Custom(CustomFn),
    /// References to this rule expand its body in place (one level deep).
    Inline,
}

impl fmt::Debug for RuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleMode::Default => write!(f, "Default"),
            RuleMode::Ignore => write!(f, "Ignore"),
            RuleMode::Custom(_) => write!(f, "Custom(..)"),
            RuleMode::Inline => write!(f, "Inline"),
        }
    }
}

/// Registry of per-rule overrides fed to the compiler.
///
/// Registrations naming rules absent from the grammar are ignored, so one
/// registry can serve several related grammars.
#[derive(Clone, Default)]
pub struct Actions {
    custom: Vec<(String, CustomFn)>,
    ignore: Vec<String>,
    inline: Vec<String>,
}

impl Actions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom action. The first registration for a name wins.
    pub fn custom(
        mut self,
        name: impl Into<String>,
        action: impl Fn(&mut ActionCtx<'_>, Fragment) -> Fragment + Send + Sync + 'static,
    ) -> Self {
        self.custom.push((name.into(), Arc::new(action)));
        self
    }

    /// Mark a rule as a skip rule (whitespace, comments).
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore.push(name.into());
        self
    }

    /// Mark a rule as an inline candidate.
    pub fn inline(mut self, name: impl Into<String>) -> Self {
        self.inline.push(name.into());
        self
    }
}

/// Resolve the dispatch map for `grammar`. A custom action takes
/// precedence over an ignore mark, which takes precedence over an inline
/// mark.
pub(super) fn resolve_modes<'g>(
    grammar: &'g Grammar,
    actions: &Actions,
) -> IndexMap<&'g str, RuleMode> {
    let mut modes = IndexMap::new();
    for rule in &grammar.rules {
        let name = rule.name.as_str();
        let mode = if let Some((_, action)) =
            actions.custom.iter().find(|(n, _)| n.as_str() == name)
        {
            RuleMode::Custom(action.clone())
        } else if actions.ignore.iter().any(|n| n == name) {
            RuleMode::Ignore
        } else if actions.inline.iter().any(|n| n == name) {
            RuleMode::Inline
        } else {
            RuleMode::Default
        };
        modes.insert(name, mode);
    }
    modes
}

/// Context handed to a custom action.
pub struct ActionCtx<'c> {
    rule: &'c str,
    emit: &'c mut EmitCtx,
}

impl<'c> ActionCtx<'c> {
    pub(super) fn new(rule: &'c str, emit: &'c mut EmitCtx) -> Self {
        Self { rule, emit }
    }

    /// Name of the rule being compiled.
    pub fn rule(&self) -> &str {
        self.rule
    }

    /// Mint an anonymous helper procedure and return a call to it.
    pub fn helper(&mut self, body: Fragment) -> Fragment {
        Fragment::Call(self.emit.add_helper(body))
    }

    /// The default node-construction wrapping for this rule, for actions
    /// that decorate it rather than replace it.
    pub fn make_node(&self, body: Fragment) -> Fragment {
        Fragment::make_node(self.rule, body)
    }
}
