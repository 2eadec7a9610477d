//! picoscan: fixed-capacity multi-pattern exact-string matching.
//!
//! An Aho-Corasick automaton built for memory-constrained, streaming
//! environments: all state lives in stores sized by compile-time capacities
//! (see [`limits`]), allocated once at construction and never grown, and the
//! search side is cheap enough to run one byte at a time from an interrupt
//! handler or a tight polling loop.
//!
//! Matching is case-insensitive over ASCII letters; any other byte is a hard
//! delimiter during search (no match spans it). Matches surface through a
//! caller-supplied [`MatchSink`], invoked synchronously once per
//! `(pattern, end position)` pair:
//!
//! ```
//! use picoscan::{Automaton, MatchLog};
//!
//! let mut ac = Automaton::new(MatchLog::new());
//! for pattern in ["he", "she", "his", "hers"] {
//!     ac.add_pattern(pattern).unwrap();
//! }
//! ac.build();
//!
//! ac.search(b"ushers");
//! // "she" and "he" both end at position 3, "hers" at position 5.
//! assert_eq!(ac.sink().matches(), &[(1, 3), (0, 3), (3, 5)]);
//! ```
//!
//! A closure works as a sink too:
//!
//! ```
//! use picoscan::{Automaton, Match};
//!
//! let mut hits = Vec::new();
//! let mut ac = Automaton::new(|m: Match<'_>| hits.push(m.end));
//! ac.add_pattern("virus").unwrap();
//! ac.build();
//! ac.search(b"a VIRUS is here");
//! drop(ac);
//! // the final 'S' of VIRUS sits at index 6
//! assert_eq!(hits, vec![6]);
//! ```

mod automaton;
pub mod filter;

pub use automaton::alphabet;
pub use automaton::limits;
pub use automaton::Automaton;

use std::fmt;

/// Errors that can occur while registering a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern was empty.
    EmptyPattern,
    /// A compile-time capacity was exhausted. The automaton is undersized
    /// for the pattern set; retrying cannot succeed.
    CapacityExceeded(Capacity),
}

/// Which compile-time capacity was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// The vertex store ([`limits::MAX_VERTICES`]).
    Vertices,
    /// The global pattern table ([`limits::MAX_PATTERNS`]).
    Patterns,
    /// One vertex's transition list ([`limits::MAX_TRANSITIONS_PER_VERTEX`]).
    VertexTransitions,
    /// One vertex's pattern-reference list
    /// ([`limits::MAX_PATTERN_REFS_PER_VERTEX`]).
    VertexPatternRefs,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyPattern => write!(f, "empty pattern"),
            PatternError::CapacityExceeded(cap) => write!(f, "capacity exceeded: {}", cap),
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Vertices => write!(f, "vertex store full"),
            Capacity::Patterns => write!(f, "pattern table full"),
            Capacity::VertexTransitions => write!(f, "vertex transition list full"),
            Capacity::VertexPatternRefs => write!(f, "vertex pattern-reference list full"),
        }
    }
}

impl std::error::Error for PatternError {}

/// One reported match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'p> {
    /// The pattern text as registered.
    pub pattern: &'p str,
    /// Insertion-order index of the pattern.
    pub pattern_index: usize,
    /// 0-based position of the last byte of the match within the stream
    /// passed to the current `search` call.
    pub end: usize,
}

/// The match-reporting capability, captured when the automaton is created.
///
/// Invoked synchronously on the searching caller's stack, once per match,
/// so implementations must be fast and non-blocking and must not re-enter
/// the automaton.
pub trait MatchSink {
    fn on_match(&mut self, m: Match<'_>);
}

/// Any `FnMut(Match)` closure is a sink.
impl<F> MatchSink for F
where
    F: FnMut(Match<'_>),
{
    fn on_match(&mut self, m: Match<'_>) {
        self(m)
    }
}

/// A ready-made sink that records `(pattern_index, end)` pairs in report
/// order.
#[derive(Debug, Default, Clone)]
pub struct MatchLog {
    matches: Vec<(usize, usize)>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded matches, oldest first.
    pub fn matches(&self) -> &[(usize, usize)] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Forget all recorded matches.
    pub fn clear(&mut self) {
        self.matches.clear();
    }
}

impl MatchSink for MatchLog {
    fn on_match(&mut self, m: Match<'_>) {
        self.matches.push((m.pattern_index, m.end));
    }
}
