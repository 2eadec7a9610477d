//! Bounded FIFO queue of vertex ids.
//!
//! A plain circular buffer with `head`, `tail` and `len`; wraparound is
//! modulo capacity. The queue exists only to drive the breadth-first
//! failure-link pass in `build` and is sized to `MAX_VERTICES`, the worst
//! case of every vertex being enqueued exactly once.

use super::limits::MAX_VERTICES;
use super::vertex::VertexId;

/// Fixed-capacity FIFO of vertex indices.
pub(crate) struct VertexQueue {
    buf: Box<[VertexId]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl VertexQueue {
    /// Create an empty queue with room for `MAX_VERTICES` entries.
    pub(crate) fn new() -> Self {
        Self {
            buf: vec![VertexId::NONE; MAX_VERTICES].into_boxed_slice(),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Append to the tail. Returns false (with no side effects) when full.
    pub(crate) fn enqueue(&mut self, vertex: VertexId) -> bool {
        if self.len == self.buf.len() {
            return false;
        }
        self.buf[self.tail] = vertex;
        self.tail = (self.tail + 1) % self.buf.len();
        self.len += 1;
        true
    }

    /// Remove and return the head item, or `None` when empty.
    pub(crate) fn dequeue(&mut self) -> Option<VertexId> {
        if self.len == 0 {
            return None;
        }
        let vertex = self.buf[self.head];
        self.head = (self.head + 1) % self.buf.len();
        self.len -= 1;
        Some(vertex)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}
