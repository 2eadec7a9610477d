//! Fixed-capacity Aho-Corasick engine.
//!
//! The automaton lives in a contiguous vertex store addressed by small
//! integer handles; all capacities are compile-time constants and exceeding
//! one is an error, never a reallocation. The key components are:
//!
//! - `limits`: the compile-time capacities
//! - `alphabet`: byte-to-symbol mapping (case-insensitive ASCII letters)
//! - `vertex`: the vertex store primitives (`VertexId`, `Vertex`)
//! - `queue`: the bounded FIFO driving breadth-first link construction
//! - `machine`: the `Automaton` - insertion, `build`, goto function, search
//!
//! Only `Automaton`, the alphabet mapper and the capacity constants are part
//! of the public surface; the queue and vertex store are internal
//! collaborators.

pub mod alphabet;
pub mod limits;
mod machine;
mod queue;
mod vertex;

pub use machine::Automaton;

#[cfg(test)]
mod tests;
