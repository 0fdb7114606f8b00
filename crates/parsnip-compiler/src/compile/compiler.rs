//! Compiler pass state and entry points.

use indexmap::IndexMap;
use parsnip_program::{Fragment, ProcId, ProcKind, Procedure, Program};

use crate::grammar::{Grammar, Rule};

use super::actions::{ActionCtx, Actions, RuleMode, resolve_modes};
use super::error::CompileError;

/// Compiler options.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompilerOptions {
    /// Expand every rule reference in place (one level deep) instead of
    /// only the rules marked inline in the action registry.
    pub inline_all: bool,
}

/// Compile `grammar` with an empty action registry and default options.
pub fn compile(grammar: &Grammar) -> Result<Program, CompileError> {
    Compiler::compile(grammar, &Actions::new(), CompilerOptions::default())
}

/// Compiler state for one grammar.
///
/// Read-only during a pass: the dispatch map and rule ids are resolved up
/// front, and all transient per-pass state lives in [`EmitCtx`], threaded
/// through the recursive compilation calls.
pub struct Compiler<'g> {
    pub(super) grammar: &'g Grammar,
    pub(super) options: CompilerOptions,
    pub(super) modes: IndexMap<&'g str, RuleMode>,
    pub(super) rule_ids: IndexMap<&'g str, ProcId>,
}

impl<'g> Compiler<'g> {
    /// Resolve dispatch for `grammar` and compile every rule.
    pub fn compile(
        grammar: &'g Grammar,
        actions: &Actions,
        options: CompilerOptions,
    ) -> Result<Program, CompileError> {
        let compiler = Self::resolve(grammar, actions, options)?;
        compiler.run()
    }

    fn resolve(
        grammar: &'g Grammar,
        actions: &Actions,
        options: CompilerOptions,
    ) -> Result<Self, CompileError> {
        if grammar.rules.is_empty() {
            return Err(CompileError::EmptyGrammar);
        }
        let mut rule_ids = IndexMap::new();
        for (i, rule) in grammar.rules.iter().enumerate() {
            if rule_ids
                .insert(rule.name.as_str(), ProcId(i as u32))
                .is_some()
            {
                return Err(CompileError::DuplicateRule(rule.name.clone()));
            }
        }
        Ok(Self {
            grammar,
            options,
            modes: resolve_modes(grammar, actions),
            rule_ids,
        })
    }

    fn run(&self) -> Result<Program, CompileError> {
        let mut ctx = EmitCtx::new(self.grammar.rules.len() as u32);
        let mut procedures = Vec::with_capacity(self.grammar.rules.len());
        for rule in &self.grammar.rules {
            ctx.enter_rule(&rule.name);
            let body = self.compile_rule(rule, &mut ctx)?;
            procedures.push(Procedure {
                name: rule.name.clone(),
                kind: ProcKind::Rule,
                body,
            });
        }
        procedures.append(&mut ctx.helpers);
        Ok(Program::new(procedures, ProcId(0))?)
    }

    /// Compile a rule body and apply its mode wrapping.
    pub(super) fn compile_rule(
        &self,
        rule: &Rule,
        ctx: &mut EmitCtx,
    ) -> Result<Fragment, CompileError> {
        let body = self.compile_expr(&rule.body, ctx)?;
        Ok(match self.modes.get(rule.name.as_str()) {
            None | Some(RuleMode::Default) | Some(RuleMode::Inline) => {
                Fragment::make_node(rule.name.as_str(), body)
            }
            Some(RuleMode::Ignore) => Fragment::ignore(body),
            Some(RuleMode::Custom(action)) => {
                let mut actx = ActionCtx::new(rule.name.as_str(), ctx);
                (action.as_ref())(&mut actx, body)
            }
        })
    }
}

/// Transient state for one compilation pass: the pending-helper accumulator
/// and the single-depth inlining guard.
pub(super) struct EmitCtx {
    /// Rule currently being compiled; used for helper names and diagnostics.
    pub(super) rule: String,
    helper_seq: u32,
    rule_count: u32,
    pub(super) helpers: Vec<Procedure>,
    /// True while expanding an inlined reference.
    pub(super) inlining: bool,
}

impl EmitCtx {
    fn new(rule_count: u32) -> Self {
        Self {
            rule: String::new(),
            helper_seq: 0,
            rule_count,
            helpers: Vec::new(),
            inlining: false,
        }
    }

    fn enter_rule(&mut self, name: &str) {
        self.rule = name.to_string();
        self.helper_seq = 0;
    }

    /// Mint an anonymous helper procedure and return its id.
    pub(super) fn add_helper(&mut self, body: Fragment) -> ProcId {
        self.helper_seq += 1;
        let id = ProcId(self.rule_count + self.helpers.len() as u32);
        self.helpers.push(Procedure {
            name: format!("{}#{}", self.rule, self.helper_seq),
            kind: ProcKind::Helper,
            body,
        });
        id
    }

    /// Factor a compound fragment behind a helper call; leave simple ones
    /// in place.
    pub(super) fn factor(&mut self, fragment: Fragment) -> Fragment {
        if needs_helper(&fragment) {
            Fragment::Call(self.add_helper(fragment))
        } else {
            fragment
        }
    }
}

/// Repetitions and lookaheads re-apply their operand; compound operands are
/// factored into a separate callable.
fn needs_helper(fragment: &Fragment) -> bool {
    matches!(
        fragment,
        Fragment::Group { .. } | Fragment::MakeNode { .. } | Fragment::Ignore(_)
    )
}
