//! Vertex storage for the trie/automaton.
//!
//! Vertices live in one contiguous backing store and reference each other by
//! `VertexId`, a small `Copy` index with a `NONE` sentinel. Per-vertex lists
//! (outgoing transitions, terminating pattern refs) are `SmallVec`s whose
//! inline capacity equals the compile-time cap; explicit length checks keep
//! them from ever spilling to the heap.

use smallvec::SmallVec;

use super::limits::{MAX_PATTERN_REFS_PER_VERTEX, MAX_TRANSITIONS_PER_VERTEX};

/// A vertex identifier - just an index into the vertex store.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VertexId(u16);

impl VertexId {
    /// Sentinel for "no vertex"; also the state of a failure link before
    /// `build` assigns it.
    pub const NONE: VertexId = VertexId(u16::MAX);

    /// The root vertex, always at index 0.
    pub const ROOT: VertexId = VertexId(0);

    #[inline]
    pub(crate) const fn new(raw: u16) -> Self {
        VertexId(raw)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u16::MAX
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One labeled trie edge.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    /// Symbol index from the alphabet mapper, not a raw byte.
    pub symbol: u8,
    pub target: VertexId,
}

/// One trie node / automaton state.
#[derive(Clone, Debug)]
pub struct Vertex {
    /// Outgoing edges, kept sorted by symbol for binary-search lookup.
    transitions: SmallVec<[Transition; MAX_TRANSITIONS_PER_VERTEX]>,
    /// Failure link; `NONE` until assigned by `build` (root links to itself).
    pub failure: VertexId,
    /// True when one or more patterns terminate here.
    pub is_output: bool,
    /// Indices of the patterns terminating exactly at this vertex.
    pattern_refs: SmallVec<[u16; MAX_PATTERN_REFS_PER_VERTEX]>,
}

impl Vertex {
    pub fn new() -> Self {
        Self {
            transitions: SmallVec::new(),
            failure: VertexId::NONE,
            is_output: false,
            pattern_refs: SmallVec::new(),
        }
    }

    /// Look up the outgoing edge for a symbol.
    #[inline]
    pub fn transition(&self, symbol: u8) -> Option<VertexId> {
        self.transitions
            .binary_search_by_key(&symbol, |t| t.symbol)
            .ok()
            .map(|pos| self.transitions[pos].target)
    }

    /// Add an edge for a symbol not already present.
    ///
    /// Returns false (leaving the vertex untouched) when the transition table
    /// is full. Construction never attempts a duplicate symbol.
    pub fn add_transition(&mut self, symbol: u8, target: VertexId) -> bool {
        if self.transitions.len() == MAX_TRANSITIONS_PER_VERTEX {
            return false;
        }
        match self.transitions.binary_search_by_key(&symbol, |t| t.symbol) {
            Ok(_) => {
                debug_assert!(false, "duplicate transition on symbol {}", symbol);
                false
            }
            Err(pos) => {
                self.transitions.insert(pos, Transition { symbol, target });
                true
            }
        }
    }

    /// Record that a pattern terminates at this vertex.
    ///
    /// Returns false (leaving the vertex untouched) when the per-vertex
    /// pattern-reference list is full.
    pub fn add_pattern_ref(&mut self, pattern_index: u16) -> bool {
        if self.pattern_refs.len() == MAX_PATTERN_REFS_PER_VERTEX {
            return false;
        }
        self.pattern_refs.push(pattern_index);
        self.is_output = true;
        true
    }

    /// Outgoing edges in symbol order.
    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Pattern indices terminating here, in insertion order.
    #[inline]
    pub fn pattern_refs(&self) -> &[u16] {
        &self.pattern_refs
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new()
    }
}
