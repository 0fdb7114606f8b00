#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled parser program format for Parsnip.
//!
//! This crate contains:
//! - Fragment IR: the control-flow fragments the compiler emits
//! - Program container: named procedures, entry point, validation
//! - Binary artifact round-trip and a human-readable dump
//!
//! A backend emitter consumes [`Program::iter`] (or [`dump`] for the
//! reference textual form); the runtime engine interprets fragments
//! directly.

mod dump;
mod fragment;
mod program;

#[cfg(test)]
mod fragment_tests;
#[cfg(test)]
mod program_tests;

pub use dump::dump;
pub use fragment::{ByteSet, Fragment, GroupKind, ProcId};
pub use program::{ProcKind, Procedure, Program, ProgramError};
