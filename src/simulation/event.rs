//! Timestamped events and the time-ordered event queue.
//!
//! Events are popped in `(timestamp, kind priority, sequence)` order. The
//! kind priority puts a CPU release (Completion, Preempt) ahead of an
//! Arrival at the same instant; the insertion sequence settles same-kind
//! ties. The queue never looks at process state.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::models::{ProcessId, Time};

/// What an event does to its process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The process finishes its last run slice.
    Completion,
    /// The process exhausts its quantum with work left.
    Preempt,
    /// The process enters the ready set.
    Arrival,
}

impl EventKind {
    /// Tie-break rank at equal timestamps; lower is popped first.
    #[inline]
    pub fn priority(&self) -> u8 {
        match self {
            Self::Completion => 0,
            Self::Preempt => 1,
            Self::Arrival => 2,
        }
    }
}

/// An immutable scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: Time,
    pub kind: EventKind,
    pub process_id: ProcessId,
    /// Insertion counter. Only used to order otherwise-equal events.
    pub sequence: u64,
}

impl Event {
    fn key(&self) -> (Time, u8, u64) {
        (self.timestamp, self.kind.priority(), self.sequence)
    }
}

// BinaryHeap is a max-heap, so the ordering is reversed.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered queue of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Event>,
    next_sequence: u64,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules an event, stamping it with the next sequence number.
    pub fn push(&mut self, timestamp: Time, kind: EventKind, process_id: ProcessId) -> Event {
        let event = Event {
            timestamp,
            kind,
            process_id,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(event);
        event
    }

    /// Removes and returns the earliest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop()
    }

    /// Timestamp of the earliest event without removing it.
    pub fn peek_time(&self) -> Option<Time> {
        self.heap.peek().map(|e| e.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
