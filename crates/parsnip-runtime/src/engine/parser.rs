//! Parser state and fragment interpretation.

use parsnip_core::{DataSource, Node, Region};
use parsnip_program::{Fragment, GroupKind, ProcId, Program, ProgramError};

use super::error::ParseError;
use super::trace::{NoopTracer, Tracer};

/// One generated-parser instance: a validated program plus per-run state.
///
/// Each `parse` call resets the per-run fields and owns them exclusively
/// until it returns, so a `Parser` value can be reused sequentially. To
/// parse from several threads, give each thread its own instance.
pub struct Parser<'p> {
    program: &'p Program,
    data: Vec<u8>,
    pos: usize,
    /// Accumulated ignorable span (whitespace, comments). A `begin` of 0
    /// doubles as "unset".
    ignore: Region,
    /// Furthest position at which any required match failed.
    last_error: usize,
    root: Node,
}

impl<'p> Parser<'p> {
    /// Create a parser for `program`, validating it once up front.
    pub fn new(program: &'p Program) -> Result<Self, ProgramError> {
        program.validate()?;
        Ok(Self {
            program,
            data: Vec::new(),
            pos: 0,
            ignore: Region::default(),
            last_error: 0,
            root: Node::default(),
        })
    }

    /// Run the entry rule over `input`. Returns whether it accepted; the
    /// input need not be exhausted.
    pub fn parse(&mut self, input: &str) -> bool {
        self.parse_with(input, &mut NoopTracer)
    }

    /// Run the entry rule over `input` with tracing hooks.
    pub fn parse_with<T: Tracer>(&mut self, input: &str, tracer: &mut T) -> bool {
        self.data = input.as_bytes().to_vec();
        self.pos = 0;
        self.ignore = Region::default();
        self.last_error = 0;
        self.root = Node::default();

        let entry = self.program.entry();
        let accept = self.call(entry, tracer);

        if let (Some(first), Some(last)) = (self.root.children.first(), self.root.children.last())
        {
            self.root.range = Region::new(first.range.begin, last.range.end);
        }
        accept
    }

    /// The tree built by the last run. Its children are the nodes the
    /// entry rule constructed; its range covers them.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Cursor position after the last run.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Furthest position at which any required match failed during the
    /// last run, kept even when a choice recovered locally.
    pub fn last_error(&self) -> usize {
        self.last_error
    }

    /// Diagnostic for the furthest failure of the last run.
    pub fn error(&self) -> ParseError {
        ParseError::at(&self.data, self.last_error)
    }

    /// The input text between `start` and `end`, clamped to the buffer.
    pub fn data(&self, start: usize, end: usize) -> String {
        let len = self.data.len();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return String::new();
        }
        String::from_utf8_lossy(&self.data[start..end]).into_owned()
    }

    fn call<T: Tracer>(&mut self, id: ProcId, tracer: &mut T) -> bool {
        let program: &'p Program = self.program;
        let proc = program.procedure(id);
        tracer.enter(&proc.name, self.pos);
        let accept = self.run(&proc.body, tracer);
        tracer.exit(&proc.name, accept, self.pos);
        accept
    }

    fn run<T: Tracer>(&mut self, fragment: &Fragment, tracer: &mut T) -> bool {
        match fragment {
            Fragment::Literal(bytes) => {
                if self.data[self.pos..].starts_with(bytes) {
                    self.pos += bytes.len();
                    true
                } else {
                    false
                }
            }
            Fragment::CharRange(a, b) => self.eat(|c| (*a..=*b).contains(&c)),
            Fragment::CharSet(set) => self.eat(|c| set.contains(c)),
            Fragment::AnyChar => self.eat(|_| true),
            Fragment::Group { kind, children } => self.run_group(*kind, children, tracer),
            Fragment::ZeroOrMore(inner) => {
                loop {
                    let before = self.pos;
                    if !self.run(inner, tracer) || self.pos == before {
                        break;
                    }
                }
                true
            }
            Fragment::OneOrMore(inner) => {
                let save = self.pos;
                if !self.run(inner, tracer) {
                    self.pos = save;
                    return false;
                }
                loop {
                    let before = self.pos;
                    if !self.run(inner, tracer) || self.pos == before {
                        break;
                    }
                }
                true
            }
            Fragment::Optional(inner) => {
                self.run(inner, tracer);
                true
            }
            Fragment::AndLookahead(inner) => {
                let save = self.pos;
                let accept = self.run(inner, tracer);
                self.pos = save;
                accept
            }
            Fragment::NotLookahead(inner) => {
                let save = self.pos;
                let accept = self.run(inner, tracer);
                self.pos = save;
                !accept
            }
            Fragment::Call(id) => self.call(*id, tracer),
            Fragment::MakeNode { name, body } => self.make_node(name, body, tracer),
            Fragment::Ignore(body) => self.ignore_span(body, tracer),
        }
    }

    fn eat(&mut self, accept: impl Fn(u8) -> bool) -> bool {
        match self.data.get(self.pos) {
            Some(&byte) if accept(byte) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// One compositional algorithm for both group kinds: all-required
    /// stops on the first failure, one-required stops on the first success.
    fn run_group<T: Tracer>(
        &mut self,
        kind: GroupKind,
        children: &[Fragment],
        tracer: &mut T,
    ) -> bool {
        let save = self.pos;
        match kind {
            GroupKind::AllRequired => {
                for child in children {
                    if !self.run(child, tracer) {
                        // Record the furthest failure before restoring.
                        self.last_error = self.last_error.max(self.pos);
                        tracer.backtrack(self.pos, save);
                        self.pos = save;
                        return false;
                    }
                }
                true
            }
            GroupKind::OneRequired => {
                for child in children {
                    if self.run(child, tracer) {
                        return true;
                    }
                }
                self.pos = save;
                false
            }
        }
    }

    /// Default node-construction protocol around a rule body.
    fn make_node<T: Tracer>(&mut self, name: &str, body: &Fragment, tracer: &mut T) -> bool {
        let start = self.pos;
        let accept = self.run(body, tracer);
        let end = self.pos;

        if accept {
            let mut node = self.root.cleanup(start, end);
            node.name = name.to_string();
            node.range = node.range.clip(self.ignore);
            tracer.node(&node.name, node.range.begin, node.range.end);
            self.root.append(node);
        } else {
            self.root.discard(start);
        }
        if self.ignore.begin >= end || self.ignore.end <= start {
            self.ignore = Region::default();
        }
        accept
    }

    /// Ignore-span accumulation around a skip rule's body.
    fn ignore_span<T: Tracer>(&mut self, body: &Fragment, tracer: &mut T) -> bool {
        let start = self.pos;
        let accept = self.run(body, tracer);
        if accept && self.pos != start {
            if start < self.ignore.begin || self.ignore.begin == 0 {
                self.ignore.begin = start;
            }
            self.ignore.end = self.pos;
        }
        accept
    }
}

impl DataSource for Parser<'_> {
    fn data(&self, start: usize, end: usize) -> String {
        Parser::data(self, start, end)
    }
}
