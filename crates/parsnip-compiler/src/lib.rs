#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Parsnip compiler: grammar expression trees to executable parser programs.
//!
//! The pipeline:
//! - `grammar` - the caller-provided expression tree model
//! - `compile` - translation into `parsnip_program` fragments, one
//!   procedure per rule plus anonymous helpers
//!
//! The grammar's concrete syntax is out of scope; callers hand over
//! already-built [`Grammar`] values and receive a validated
//! [`Program`](parsnip_program::Program).

pub mod compile;
pub mod grammar;


pub use compile::{ActionCtx, Actions, CompileError, Compiler, CompilerOptions, RuleMode, compile};
pub use grammar::{Expr, Grammar, Rule};
