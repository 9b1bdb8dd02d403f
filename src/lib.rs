//! Fixed-capacity priority queue whose values stay addressable by a stable
//! logical index while the heap reorders them.
//!
//! ```
//! use indexed_pq::IndexedPriorityQueue;
//!
//! let mut queue = IndexedPriorityQueue::new(4);
//! queue.push(30).unwrap();
//! queue.push(10).unwrap();
//! queue.insert(0, 5).unwrap();
//!
//! assert_eq!(queue.get(1), Ok(&10));
//! assert_eq!(queue.pop(), Ok(5));
//! assert_eq!(queue.pop(), Ok(10));
//! ```

mod error;
pub use error::QueueError;

mod pool;

mod queue;
pub use queue::IndexedPriorityQueue;

#[cfg(test)]
mod stress_test;
