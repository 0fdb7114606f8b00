//! Per-construct fragment translation.

use parsnip_program::{Fragment, GroupKind};

use crate::grammar::Expr;

use super::compiler::{Compiler, EmitCtx};
use super::error::CompileError;

impl Compiler<'_> {
    /// Translate one expression into a fragment, recursively.
    pub(super) fn compile_expr(
        &self,
        expr: &Expr,
        ctx: &mut EmitCtx,
    ) -> Result<Fragment, CompileError> {
        Ok(match expr {
            Expr::Literal(text) => compile_literal(text.as_bytes()),
            Expr::CharRange(a, b) => Fragment::CharRange(*a, *b),
            Expr::CharSet(bytes) => Fragment::CharSet(bytes.iter().copied().collect()),
            Expr::AnyChar => Fragment::AnyChar,
            Expr::Sequence(children) => {
                self.compile_group(GroupKind::AllRequired, children, ctx)?
            }
            Expr::Choice(children) => self.compile_group(GroupKind::OneRequired, children, ctx)?,
            Expr::ZeroOrMore(inner) => Fragment::ZeroOrMore(self.compile_operand(inner, ctx)?),
            Expr::OneOrMore(inner) => Fragment::OneOrMore(self.compile_operand(inner, ctx)?),
            Expr::Optional(inner) => Fragment::Optional(self.compile_operand(inner, ctx)?),
            Expr::AndLookahead(inner) => {
                Fragment::AndLookahead(self.compile_operand(inner, ctx)?)
            }
            Expr::NotLookahead(inner) => {
                Fragment::NotLookahead(self.compile_operand(inner, ctx)?)
            }
            Expr::Ref(name) => self.compile_ref(name, ctx)?,
        })
    }

    /// Compile the operand of a repetition or lookahead. Compound bodies
    /// are factored into an anonymous helper so the operand stays a single
    /// callable.
    fn compile_operand(
        &self,
        expr: &Expr,
        ctx: &mut EmitCtx,
    ) -> Result<Box<Fragment>, CompileError> {
        let inner = self.compile_expr(expr, ctx)?;
        Ok(Box::new(ctx.factor(inner)))
    }

    fn compile_ref(&self, name: &str, ctx: &mut EmitCtx) -> Result<Fragment, CompileError> {
        let Some(&id) = self.rule_ids.get(name) else {
            return Err(CompileError::UndefinedRule {
                name: name.to_string(),
                referenced_from: ctx.rule.clone(),
            });
        };
        let inline = self.options.inline_all
            || matches!(self.modes.get(name), Some(super::RuleMode::Inline));
        if inline && !ctx.inlining {
            // Single-depth expansion; references inside the copy stay calls.
            let rule = &self.grammar.rules[id.index()];
            ctx.inlining = true;
            let expanded = self.compile_rule(rule, ctx);
            ctx.inlining = false;
            return expanded;
        }
        Ok(Fragment::Call(id))
    }
}

/// A multi-byte literal lowers to an all-required group of single-byte
/// checks; the group machinery owns the restore and the furthest-failure
/// mark, so a mismatch mid-literal is recorded at its exact offset.
fn compile_literal(bytes: &[u8]) -> Fragment {
    if bytes.len() <= 1 {
        return Fragment::Literal(bytes.to_vec());
    }
    Fragment::all_of(bytes.iter().map(|&b| Fragment::Literal(vec![b])).collect())
}
