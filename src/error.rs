use thiserror::Error;

/// Caller-input errors. Every fallible operation checks its preconditions
/// before touching the queue, so an `Err` leaves the queue as it was.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("logical index {position} is out of range for capacity {capacity}")]
    OutOfRange { position: usize, capacity: usize },

    #[error("all {capacity} logical indices are occupied")]
    CapacityExhausted { capacity: usize },

    #[error("queue is empty")]
    Empty,

    #[error("logical index {position} holds no value")]
    InvalidPosition { position: usize },
}
