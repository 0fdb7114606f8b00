//! Compile errors.

use parsnip_program::ProgramError;

/// Errors surfaced while compiling a grammar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("grammar has no rules")]
    EmptyGrammar,

    #[error("duplicate rule definition `{0}`")]
    DuplicateRule(String),

    /// A reference names a rule with no definition. Surfaced at compile
    /// time; the compiler never emits a call to a missing procedure.
    #[error("rule `{referenced_from}` references undefined rule `{name}`")]
    UndefinedRule {
        name: String,
        referenced_from: String,
    },

    #[error(transparent)]
    Program(#[from] ProgramError),
}
