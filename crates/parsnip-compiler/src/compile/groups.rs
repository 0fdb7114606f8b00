//! Group composition for sequences and ordered choices.
//!
//! One compositional shape covers both group kinds; the continuation
//! policy (stop on first failure vs stop on first success) is carried by
//! [`GroupKind`] and applied by the runtime engine.

use parsnip_program::{Fragment, GroupKind};

use crate::grammar::Expr;

use super::compiler::{Compiler, EmitCtx};
use super::error::CompileError;

impl Compiler<'_> {
    /// Compose a group fragment from the children of a sequence or choice.
    pub(super) fn compile_group(
        &self,
        kind: GroupKind,
        children: &[Expr],
        ctx: &mut EmitCtx,
    ) -> Result<Fragment, CompileError> {
        let mut parts = Vec::with_capacity(children.len());
        for child in children {
            parts.push(self.compile_expr(child, ctx)?);
        }
        Ok(Fragment::group(kind, parts))
    }
}
