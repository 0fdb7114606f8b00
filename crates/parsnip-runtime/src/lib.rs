#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Runtime engine for executing compiled Parsnip parser programs.
//!
//! This crate interprets `parsnip_program` fragments over one input buffer,
//! building the range-addressed `parsnip_core` parse tree as rules accept
//! and backtracking out of the attempts that fail.

pub mod engine;

pub use engine::{CollectTracer, NoopTracer, ParseError, Parser, Tracer};
