//! Execution tracing hooks.
//!
//! The engine reports rule entry/exit, constructed nodes, and group
//! restores to a [`Tracer`]. [`NoopTracer`] is the default and compiles
//! away; [`CollectTracer`] records one formatted line per event.

/// Hooks into a parse run. Every method defaults to a no-op.
pub trait Tracer {
    fn enter(&mut self, _rule: &str, _pos: usize) {}

    fn exit(&mut self, _rule: &str, _accept: bool, _pos: usize) {}

    fn node(&mut self, _name: &str, _begin: usize, _end: usize) {}

    fn backtrack(&mut self, _from: usize, _to: usize) {}
}

/// Tracer that records nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Tracer that collects one line per event, for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct CollectTracer {
    pub events: Vec<String>,
}

impl CollectTracer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tracer for CollectTracer {
    fn enter(&mut self, rule: &str, pos: usize) {
        self.events.push(format!("enter {rule} @{pos}"));
    }

    fn exit(&mut self, rule: &str, accept: bool, pos: usize) {
        let verdict = if accept { "accept" } else { "reject" };
        self.events.push(format!("exit {rule} {verdict} @{pos}"));
    }

    fn node(&mut self, name: &str, begin: usize, end: usize) {
        self.events.push(format!("node {name} [{begin},{end})"));
    }

    fn backtrack(&mut self, from: usize, to: usize) {
        self.events.push(format!("backtrack {from} -> {to}"));
    }
}
