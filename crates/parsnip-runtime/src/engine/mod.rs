//! Backtracking execution engine for compiled parser programs.
//!
//! Every fragment is interpreted under one contract: report accept or
//! reject, advance the cursor on accept, restore it on reject (lookaheads
//! never move it). Rule procedures additionally drive the
//! node-construction protocol against the shared root.

mod error;
mod parser;
mod trace;


pub use error::ParseError;
pub use parser::Parser;
pub use trace::{CollectTracer, NoopTracer, Tracer};
