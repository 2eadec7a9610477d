//! Maps input bytes to the dense symbol space of the automaton.
//!
//! The alphabet is the 26 ASCII letters, folded case-insensitively onto
//! `0..26`. Every other byte has no symbol. Insertion and search share this
//! mapping but react differently to unmapped bytes: insertion skips them,
//! search treats them as a hard match boundary (see `machine.rs`).

/// Number of distinct symbols: one per ASCII letter.
pub const ALPHABET_SIZE: usize = 26;

/// Map a byte to its symbol index, case-insensitively.
///
/// Returns `None` for anything that is not an ASCII letter.
#[inline]
pub fn symbol_index(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a'),
        _ => None,
    }
}
