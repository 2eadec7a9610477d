//! The automaton itself: trie construction, failure-link computation and
//! streaming search.
//!
//! Vertices are allocated from a contiguous store created with capacity
//! `MAX_VERTICES` and never grown past it; `build` uses one transient
//! bounded queue, and the search path allocates nothing, which is what lets
//! it run from an interrupt handler. The lifecycle is strict: `add_pattern`
//! calls, then exactly one `build`, then any number of `search` calls. There
//! is no incremental rebuild; changing the pattern set means `reset` and
//! start over.
//!
//! Unmapped bytes (anything that is not an ASCII letter) are handled
//! asymmetrically, faithfully to the original engine this implements:
//! `add_pattern` *skips* them, storing the pattern as if they were absent,
//! while `search` treats them as a hard delimiter and resets to the root.
//! A pattern containing punctuation therefore can never match an input that
//! also contains that punctuation. The tests pin both sides of this behavior
//! so any future change is deliberate.

use crate::{Capacity, Match, MatchSink, PatternError};

use super::alphabet::symbol_index;
use super::limits::{MAX_PATTERNS, MAX_VERTICES};
use super::queue::VertexQueue;
use super::vertex::{Vertex, VertexId};

/// A fixed-capacity Aho-Corasick automaton over borrowed patterns.
///
/// `'p` is the lifetime of the pattern text: patterns are referenced, not
/// copied, and the borrow checker enforces that they outlive the automaton.
/// `S` is the match-reporting capability, captured at construction and
/// invoked synchronously from inside [`search`](Automaton::search); it must
/// be fast and non-blocking.
pub struct Automaton<'p, S: MatchSink> {
    vertices: Vec<Vertex>,
    patterns: Vec<&'p str>,
    sink: S,
}

impl<'p, S: MatchSink> Automaton<'p, S> {
    /// Create a root-only automaton with the given match reporter.
    ///
    /// The vertex store and the pattern table are allocated once here, at
    /// their full compile-time capacity, and never grow.
    pub fn new(sink: S) -> Self {
        let mut vertices = Vec::with_capacity(MAX_VERTICES);
        let mut root = Vertex::new();
        root.failure = VertexId::ROOT;
        vertices.push(root);
        Self {
            vertices,
            patterns: Vec::with_capacity(MAX_PATTERNS),
            sink,
        }
    }

    /// Discard all patterns and vertices, returning to the root-only state.
    ///
    /// The reporter is kept. This is the only way to change the pattern set
    /// once [`build`](Automaton::build) has run.
    pub fn reset(&mut self) {
        self.vertices.clear();
        let mut root = Vertex::new();
        root.failure = VertexId::ROOT;
        self.vertices.push(root);
        self.patterns.clear();
    }

    /// Insert one pattern into the trie.
    ///
    /// Bytes without a symbol (anything that is not an ASCII letter) are
    /// skipped: the trie walk neither advances nor aborts on them. Each
    /// failure kind is reported distinctly; on a capacity failure, vertices
    /// already created for earlier bytes of the same pattern are not rolled
    /// back, but no structure is ever left half-written.
    pub fn add_pattern(&mut self, pattern: &'p str) -> Result<(), PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        if self.patterns.len() == MAX_PATTERNS {
            return Err(PatternError::CapacityExceeded(Capacity::Patterns));
        }

        let mut current = VertexId::ROOT;
        for &byte in pattern.as_bytes() {
            let Some(symbol) = symbol_index(byte) else {
                continue;
            };
            current = match self.vertices[current.index()].transition(symbol) {
                Some(next) => next,
                None => self.alloc_child(current, symbol)?,
            };
        }

        let pattern_index = self.patterns.len() as u16;
        if !self.vertices[current.index()].add_pattern_ref(pattern_index) {
            return Err(PatternError::CapacityExceeded(Capacity::VertexPatternRefs));
        }
        self.patterns.push(pattern);
        Ok(())
    }

    /// Allocate a fresh vertex and link it under `parent`.
    ///
    /// Both capacities are checked before anything is written, so a failure
    /// here leaves `parent` exactly as it was.
    fn alloc_child(&mut self, parent: VertexId, symbol: u8) -> Result<VertexId, PatternError> {
        if self.vertices.len() == MAX_VERTICES {
            return Err(PatternError::CapacityExceeded(Capacity::Vertices));
        }
        let child = VertexId::new(self.vertices.len() as u16);
        if !self.vertices[parent.index()].add_transition(symbol, child) {
            return Err(PatternError::CapacityExceeded(Capacity::VertexTransitions));
        }
        self.vertices.push(Vertex::new());
        Ok(child)
    }

    /// Compute failure links for every vertex in one breadth-first pass.
    ///
    /// Children are enqueued only after their link is assigned, so a parent's
    /// link is always known before its children are processed. No-op on a
    /// root-only automaton. Deterministic for a given trie, so running it
    /// twice reproduces the same links, though once per pattern set is the
    /// intended use.
    pub fn build(&mut self) {
        if self.vertices.len() <= 1 {
            return;
        }

        let mut queue = VertexQueue::new();

        for i in 0..self.vertices[VertexId::ROOT.index()].transitions().len() {
            let child = self.vertices[VertexId::ROOT.index()].transitions()[i].target;
            self.vertices[child.index()].failure = VertexId::ROOT;
            let ok = queue.enqueue(child);
            debug_assert!(ok, "BFS queue overflow: sized to MAX_VERTICES");
        }

        while let Some(vertex) = queue.dequeue() {
            for i in 0..self.vertices[vertex.index()].transitions().len() {
                let transition = self.vertices[vertex.index()].transitions()[i];
                let fail_from = self.vertices[vertex.index()].failure;
                let link = self.next_state(fail_from, transition.symbol);
                self.vertices[transition.target.index()].failure = link;
                let ok = queue.enqueue(transition.target);
                debug_assert!(ok, "BFS queue overflow: sized to MAX_VERTICES");
            }
        }
    }

    /// The combined goto/fail transition function, shared by `build` and
    /// `search`: direct edge if present, else follow failure links, else
    /// stay at the root. Total - the root fails to itself.
    fn next_state(&self, mut state: VertexId, symbol: u8) -> VertexId {
        loop {
            if let Some(next) = self.vertices[state.index()].transition(symbol) {
                return next;
            }
            if state == VertexId::ROOT {
                return VertexId::ROOT;
            }
            state = self.vertices[state.index()].failure;
            if state.is_none() {
                // Links are assigned by `build`; an unassigned link acts as root.
                return VertexId::ROOT;
            }
        }
    }

    /// Stream `text` through the automaton, reporting every match.
    ///
    /// Bytes are consumed strictly left to right. An unmapped byte resets
    /// the cursor to the root - it is a hard match boundary, stricter than
    /// the skip policy of insertion. Each match is reported once through the
    /// sink as `(pattern, end position)`; when several patterns end at the
    /// same position, the longest is reported first, followed by its proper
    /// suffixes in failure-chain order.
    ///
    /// Never mutates automaton state (only the sink); each call starts a
    /// fresh traversal at the root, so independent streams are independent
    /// calls. No-op when no patterns are registered.
    pub fn search(&mut self, text: &[u8]) {
        if self.patterns.is_empty() {
            return;
        }

        let mut cursor = VertexId::ROOT;
        for (pos, &byte) in text.iter().enumerate() {
            let Some(symbol) = symbol_index(byte) else {
                cursor = VertexId::ROOT;
                continue;
            };
            cursor = self.next_state(cursor, symbol);
            self.report_matches(cursor, pos);
        }
    }

    /// Walk the failure chain from `state` (root excluded) and report every
    /// pattern terminating along it, each ending at `pos`.
    fn report_matches(&mut self, state: VertexId, pos: usize) {
        let mut cursor = state;
        while cursor != VertexId::ROOT && !cursor.is_none() {
            let vertex = &self.vertices[cursor.index()];
            if vertex.is_output {
                for &pattern_index in vertex.pattern_refs() {
                    self.sink.on_match(Match {
                        pattern: self.patterns[pattern_index as usize],
                        pattern_index: pattern_index as usize,
                        end: pos,
                    });
                }
            }
            cursor = vertex.failure;
        }
    }

    /// Number of vertices in use, including the root.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of registered patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Registered patterns in insertion order.
    pub fn patterns(&self) -> &[&'p str] {
        &self.patterns
    }

    /// The match reporter.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the match reporter (e.g. to drain collected
    /// matches between searches).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
