//! Control-flow fragment IR.
//!
//! Every fragment obeys one contract when interpreted: it reports accept or
//! reject, advances the cursor on accept, and restores the cursor to its
//! entry value on reject. Lookaheads are the exception: they never move it.

use serde::{Deserialize, Serialize};

/// Index of a procedure within its [`Program`](crate::Program).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ProcId(pub u32);

impl ProcId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ProcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// How a group treats its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    /// Every child must accept, in order (sequence). Stops on the first
    /// failure, records the furthest-failure position, restores the cursor.
    AllRequired,
    /// One child must accept (ordered choice). Stops on the first success;
    /// restores the cursor when all fail.
    OneRequired,
}

/// A 256-entry byte membership set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteSet([u64; 4]);

impl ByteSet {
    pub fn new() -> Self {
        Self([0; 4])
    }

    pub fn insert(&mut self, byte: u8) {
        self.0[(byte >> 6) as usize] |= 1 << (byte & 63);
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.0[(byte >> 6) as usize] & (1 << (byte & 63)) != 0
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == [0; 4]
    }

    /// Member bytes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(|&b| self.contains(b))
    }
}

impl Default for ByteSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<u8> for ByteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for byte in iter {
            set.insert(byte);
        }
        set
    }
}

impl std::fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One compiled control-flow fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fragment {
    /// Match the exact byte string; no partial consumption on reject.
    Literal(Vec<u8>),
    /// Match one byte in the inclusive range.
    CharRange(u8, u8),
    /// Match one byte in the set.
    CharSet(ByteSet),
    /// Match any single byte.
    AnyChar,
    /// Sequence or ordered choice over the children.
    Group {
        kind: GroupKind,
        children: Vec<Fragment>,
    },
    /// Longest run of the inner fragment; never rejects.
    ZeroOrMore(Box<Fragment>),
    /// Longest run of the inner fragment; rejects iff the first
    /// application rejects.
    OneOrMore(Box<Fragment>),
    /// Apply the inner fragment once, keeping its effect only on accept;
    /// never rejects.
    Optional(Box<Fragment>),
    /// Accept iff the inner fragment accepts; cursor never moves.
    AndLookahead(Box<Fragment>),
    /// Accept iff the inner fragment rejects; cursor never moves.
    NotLookahead(Box<Fragment>),
    /// Invoke another procedure of the same program.
    Call(ProcId),
    /// Default node-construction protocol around the body: on accept,
    /// detach the children built within the matched span into a node named
    /// `name`, clip it against the shared ignore span, and append it to the
    /// root; on reject, discard the speculative children.
    MakeNode { name: String, body: Box<Fragment> },
    /// Ignore-span accumulation around the body: on accept with non-zero
    /// consumption, widen the shared ignore span instead of building a node.
    Ignore(Box<Fragment>),
}

impl Fragment {
    pub fn literal(bytes: impl Into<Vec<u8>>) -> Self {
        Fragment::Literal(bytes.into())
    }

    pub fn group(kind: GroupKind, children: Vec<Fragment>) -> Self {
        Fragment::Group { kind, children }
    }

    pub fn all_of(children: Vec<Fragment>) -> Self {
        Self::group(GroupKind::AllRequired, children)
    }

    pub fn one_of(children: Vec<Fragment>) -> Self {
        Self::group(GroupKind::OneRequired, children)
    }

    pub fn zero_or_more(inner: Fragment) -> Self {
        Fragment::ZeroOrMore(Box::new(inner))
    }

    pub fn one_or_more(inner: Fragment) -> Self {
        Fragment::OneOrMore(Box::new(inner))
    }

    pub fn optional(inner: Fragment) -> Self {
        Fragment::Optional(Box::new(inner))
    }

    pub fn and_lookahead(inner: Fragment) -> Self {
        Fragment::AndLookahead(Box::new(inner))
    }

    pub fn not_lookahead(inner: Fragment) -> Self {
        Fragment::NotLookahead(Box::new(inner))
    }

    pub fn make_node(name: impl Into<String>, body: Fragment) -> Self {
        Fragment::MakeNode {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn ignore(body: Fragment) -> Self {
        Fragment::Ignore(Box::new(body))
    }

    /// Visit every `Call` target in this fragment tree.
    pub fn for_each_call(&self, visit: &mut impl FnMut(ProcId)) {
        match self {
            Fragment::Literal(_)
            | Fragment::CharRange(..)
            | Fragment::CharSet(_)
            | Fragment::AnyChar => {}
            Fragment::Group { children, .. } => {
                for child in children {
                    child.for_each_call(visit);
                }
            }
            Fragment::ZeroOrMore(inner)
            | Fragment::OneOrMore(inner)
            | Fragment::Optional(inner)
            | Fragment::AndLookahead(inner)
            | Fragment::NotLookahead(inner)
            | Fragment::Ignore(inner) => inner.for_each_call(visit),
            Fragment::MakeNode { body, .. } => body.for_each_call(visit),
            Fragment::Call(id) => visit(*id),
        }
    }
}
