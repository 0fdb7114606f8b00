//! Program container: named procedures plus the entry point.

use serde::{Deserialize, Serialize};

use crate::fragment::{Fragment, ProcId};

/// Whether a procedure came from a grammar rule or was factored out by the
/// compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcKind {
    /// A named grammar rule.
    Rule,
    /// An anonymous helper minted for a compound lookahead or repetition
    /// operand.
    Helper,
}

/// One compiled procedure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,
    pub kind: ProcKind,
    pub body: Fragment,
}

/// A complete compiled parser: rule procedures in grammar order, followed
/// by the anonymous helpers minted while compiling them.
///
/// `ProcId(i)` indexes `procedures[i]`; the construction order guarantees a
/// rule's id equals its position in the source grammar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    procedures: Vec<Procedure>,
    entry: ProcId,
}

/// Structural defects of a [`Program`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("program has no procedures")]
    NoProcedures,
    #[error("entry procedure {0} is out of range")]
    EntryOutOfRange(ProcId),
    #[error("procedure `{name}` calls unknown procedure {target}")]
    UnknownProcedure { name: String, target: ProcId },
    #[error("malformed program artifact: {0}")]
    Decode(String),
}

impl Program {
    /// Assemble and validate a program.
    pub fn new(procedures: Vec<Procedure>, entry: ProcId) -> Result<Self, ProgramError> {
        let program = Self { procedures, entry };
        program.validate()?;
        Ok(program)
    }

    pub fn entry(&self) -> ProcId {
        self.entry
    }

    /// The procedure at `id`. Panics on an out-of-range id; construction
    /// and [`Program::validate`] guarantee every `Call` target is in range.
    pub fn procedure(&self, id: ProcId) -> &Procedure {
        &self.procedures[id.index()]
    }

    pub fn get(&self, id: ProcId) -> Option<&Procedure> {
        self.procedures.get(id.index())
    }

    /// Procedures in emission order: rules in grammar order, then helpers.
    pub fn iter(&self) -> impl Iterator<Item = &Procedure> {
        self.procedures.iter()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Check structural integrity: a non-empty procedure list, an in-range
    /// entry, and no dangling `Call` target.
    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.procedures.is_empty() {
            return Err(ProgramError::NoProcedures);
        }
        if self.entry.index() >= self.procedures.len() {
            return Err(ProgramError::EntryOutOfRange(self.entry));
        }
        for proc in &self.procedures {
            let mut dangling = None;
            proc.body.for_each_call(&mut |target| {
                if target.index() >= self.procedures.len() && dangling.is_none() {
                    dangling = Some(target);
                }
            });
            if let Some(target) = dangling {
                return Err(ProgramError::UnknownProcedure {
                    name: proc.name.clone(),
                    target,
                });
            }
        }
        Ok(())
    }

    /// Serialize to the compact binary artifact form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProgramError> {
        postcard::to_allocvec(self).map_err(|e| ProgramError::Decode(e.to_string()))
    }

    /// Deserialize a binary artifact and re-validate it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProgramError> {
        let program: Program =
            postcard::from_bytes(bytes).map_err(|e| ProgramError::Decode(e.to_string()))?;
        program.validate()?;
        Ok(program)
    }
}
