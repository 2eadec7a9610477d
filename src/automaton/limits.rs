//! Compile-time capacities for the automaton.
//!
//! Every structure in the engine is sized by these constants and never grows
//! past them. Exceeding a capacity is reported as a
//! [`CapacityExceeded`](crate::PatternError::CapacityExceeded) error at
//! construction time, never as a panic or a reallocation. To resize the
//! engine for a different pattern set, change the constants and rebuild.

/// Maximum number of trie vertices, including the root.
///
/// Worst case one vertex per pattern byte; shared prefixes need fewer.
pub const MAX_VERTICES: usize = 160;

/// Maximum number of registered patterns.
pub const MAX_PATTERNS: usize = 80;

/// Maximum number of patterns that may terminate at the same vertex.
///
/// More than one happens only when identical (post-mapping) patterns are
/// inserted repeatedly.
pub const MAX_PATTERN_REFS_PER_VERTEX: usize = 2;

/// Maximum outgoing transitions per vertex, bounded by the alphabet size.
pub const MAX_TRANSITIONS_PER_VERTEX: usize = 12;
