//! Grammar expression trees, the compiler's input model.
//!
//! The grammar's concrete syntax is the caller's concern; rules arrive here
//! as already-built expression trees.

use serde::{Deserialize, Serialize};

/// One parsing expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Exact text, matched byte-wise.
    Literal(String),
    /// One byte in the inclusive range.
    CharRange(u8, u8),
    /// One byte from the set.
    CharSet(Vec<u8>),
    /// Any single byte.
    AnyChar,
    /// All children in order.
    Sequence(Vec<Expr>),
    /// First accepting child, tried in order.
    Choice(Vec<Expr>),
    ZeroOrMore(Box<Expr>),
    OneOrMore(Box<Expr>),
    Optional(Box<Expr>),
    /// Positive lookahead; consumes nothing.
    AndLookahead(Box<Expr>),
    /// Negative lookahead; consumes nothing.
    NotLookahead(Box<Expr>),
    /// Reference to a named rule.
    Ref(String),
}

impl Expr {
    pub fn lit(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn char_range(a: u8, b: u8) -> Self {
        Expr::CharRange(a, b)
    }

    pub fn char_set(bytes: &[u8]) -> Self {
        Expr::CharSet(bytes.to_vec())
    }

    pub fn any() -> Self {
        Expr::AnyChar
    }

    pub fn seq(children: Vec<Expr>) -> Self {
        Expr::Sequence(children)
    }

    pub fn choice(children: Vec<Expr>) -> Self {
        Expr::Choice(children)
    }

    pub fn zero_or_more(inner: Expr) -> Self {
        Expr::ZeroOrMore(Box::new(inner))
    }

    pub fn one_or_more(inner: Expr) -> Self {
        Expr::OneOrMore(Box::new(inner))
    }

    pub fn optional(inner: Expr) -> Self {
        Expr::Optional(Box::new(inner))
    }

    pub fn and_lookahead(inner: Expr) -> Self {
        Expr::AndLookahead(Box::new(inner))
    }

    pub fn not_lookahead(inner: Expr) -> Self {
        Expr::NotLookahead(Box::new(inner))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Expr::Ref(name.into())
    }
}

/// A named rule definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub body: Expr,
}

impl Rule {
    pub fn new(name: impl Into<String>, body: Expr) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

/// A whole grammar. The first rule is the parse entry point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    pub rules: Vec<Rule>,
}

impl Grammar {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// The entry rule, if the grammar has any rules.
    pub fn entry(&self) -> Option<&Rule> {
        self.rules.first()
    }
}
