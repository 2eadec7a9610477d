//! Packet-filter front-end: a byte-at-a-time framing and command parser
//! that feeds packet payloads through the automaton.
//!
//! This is the demonstration glue around the engine, kept free of any I/O:
//! bytes go in one at a time (from a UART interrupt, a socket, stdin - the
//! filter does not care) and completed work comes back as [`FilterEvent`]s
//! for the caller to format and transmit. The wire protocol is line
//! oriented:
//!
//! - `PKT:<data>\r\n` - scan `<data>` (up to 256 bytes) for loaded patterns
//! - `STATUS\r\n` - report counters
//! - `VERTICES\r\n` - report capacity usage
//! - `RESET\r\n` - clear the counters

use crate::limits::{MAX_PATTERNS, MAX_VERTICES};
use crate::{Automaton, MatchLog, PatternError};

/// Largest packet payload accepted between `PKT:` and `\r\n`.
pub const PACKET_BUFFER_SIZE: usize = 256;

const COMMAND_BUFFER_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    /// Waiting for a command.
    Idle,
    /// Accumulating packet payload after `PKT:`.
    Receiving,
    /// Saw `\r`, waiting for the closing `\n`.
    Processing,
}

/// Something the filter wants the caller to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// A packet was scanned.
    Packet(PacketReport),
    /// `STATUS` was received.
    Status(StatusReport),
    /// `VERTICES` was received.
    Usage(UsageReport),
    /// `RESET` was received and the counters were cleared.
    CountersCleared,
    /// A packet exceeded [`PACKET_BUFFER_SIZE`] and was discarded.
    PacketOverflow,
}

/// Outcome of scanning one packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketReport {
    /// 1-based ordinal of this packet since the last counter reset.
    pub packet_number: u32,
    /// Payload length in bytes.
    pub length: usize,
    /// Every `(pattern index, end position)` hit, in report order.
    pub matches: Vec<(usize, usize)>,
}

/// Counter snapshot for `STATUS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub packets_processed: u32,
    pub matches_found: u32,
    pub pattern_count: usize,
    pub vertex_count: usize,
}

/// Capacity snapshot for `VERTICES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageReport {
    pub vertex_count: usize,
    pub vertex_capacity: usize,
    pub pattern_count: usize,
    pub pattern_capacity: usize,
}

/// The framing state machine plus the automaton it feeds.
///
/// An explicitly owned value with an explicit lifetime - construct one per
/// input stream, no process-wide singleton.
pub struct PacketFilter<'p> {
    automaton: Automaton<'p, MatchLog>,
    buffer: [u8; PACKET_BUFFER_SIZE],
    length: usize,
    state: FilterState,
    command: [u8; COMMAND_BUFFER_SIZE],
    command_len: usize,
    packets_processed: u32,
    matches_found: u32,
}

impl<'p> PacketFilter<'p> {
    /// Load a pattern set and build the automaton.
    ///
    /// A `CapacityExceeded` error here means the engine is undersized for
    /// the pattern set - a configuration problem, reported with the exact
    /// capacity that ran out.
    pub fn new(patterns: &[&'p str]) -> Result<Self, PatternError> {
        let mut automaton = Automaton::new(MatchLog::new());
        for pattern in patterns {
            automaton.add_pattern(pattern)?;
        }
        automaton.build();
        Ok(Self {
            automaton,
            buffer: [0; PACKET_BUFFER_SIZE],
            length: 0,
            state: FilterState::Idle,
            command: [0; COMMAND_BUFFER_SIZE],
            command_len: 0,
            packets_processed: 0,
            matches_found: 0,
        })
    }

    /// Feed one input byte; returns an event when something completed.
    pub fn push_byte(&mut self, byte: u8) -> Option<FilterEvent> {
        match self.state {
            FilterState::Idle => self.push_command_byte(byte),
            FilterState::Receiving => {
                if byte == b'\r' {
                    self.state = FilterState::Processing;
                    None
                } else if self.length < PACKET_BUFFER_SIZE {
                    self.buffer[self.length] = byte;
                    self.length += 1;
                    None
                } else {
                    self.state = FilterState::Idle;
                    self.length = 0;
                    Some(FilterEvent::PacketOverflow)
                }
            }
            FilterState::Processing => {
                if byte == b'\n' {
                    self.state = FilterState::Idle;
                    let report = self.analyze();
                    self.length = 0;
                    Some(FilterEvent::Packet(report))
                } else {
                    None
                }
            }
        }
    }

    fn push_command_byte(&mut self, byte: u8) -> Option<FilterEvent> {
        if self.command_len == 0 {
            // Commands start with one of P/S/R/V; everything else is noise.
            if matches!(byte, b'P' | b'S' | b'R' | b'V') {
                self.command[0] = byte;
                self.command_len = 1;
            }
            return None;
        }

        if self.command_len < COMMAND_BUFFER_SIZE {
            self.command[self.command_len] = byte;
            self.command_len += 1;
        }

        match &self.command[..self.command_len] {
            b"PKT:" => {
                self.state = FilterState::Receiving;
                self.length = 0;
                self.command_len = 0;
                None
            }
            b"STATUS" => {
                self.command_len = 0;
                Some(FilterEvent::Status(self.status()))
            }
            b"VERTICES" => {
                self.command_len = 0;
                Some(FilterEvent::Usage(self.usage()))
            }
            b"RESET" => {
                self.packets_processed = 0;
                self.matches_found = 0;
                self.command_len = 0;
                Some(FilterEvent::CountersCleared)
            }
            _ => {
                // No command is longer than 10 bytes; give up and resync.
                if self.command_len >= 10 {
                    self.command_len = 0;
                }
                None
            }
        }
    }

    /// Scan the buffered payload and roll the result into the counters.
    fn analyze(&mut self) -> PacketReport {
        self.automaton.sink_mut().clear();
        self.automaton.search(&self.buffer[..self.length]);

        self.packets_processed += 1;
        let matches = self.automaton.sink().matches().to_vec();
        self.matches_found += matches.len() as u32;

        PacketReport {
            packet_number: self.packets_processed,
            length: self.length,
            matches,
        }
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            packets_processed: self.packets_processed,
            matches_found: self.matches_found,
            pattern_count: self.automaton.pattern_count(),
            vertex_count: self.automaton.vertex_count(),
        }
    }

    pub fn usage(&self) -> UsageReport {
        UsageReport {
            vertex_count: self.automaton.vertex_count(),
            vertex_capacity: MAX_VERTICES,
            pattern_count: self.automaton.pattern_count(),
            pattern_capacity: MAX_PATTERNS,
        }
    }

    /// The loaded patterns, for turning report indices back into text.
    pub fn patterns(&self) -> &[&'p str] {
        self.automaton.patterns()
    }
}
