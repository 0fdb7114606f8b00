#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Parsnip parse trees.
//!
//! Two building blocks:
//! - **`Region`**: a half-open `[begin, end)` byte span over an input buffer
//! - **`Node`**: a range-addressed parse-tree node, mutated in place by the
//!   runtime engine as rule attempts succeed or fail
//!
//! Nodes do not own their text. Anything that can slice the input buffer
//! implements [`DataSource`], and text-producing operations take one as an
//! argument.

mod node;
mod region;


pub use node::{DataSource, Node};
pub use region::Region;
