//! Fixed-capacity bounded queues over a circular buffer.
//!
//! Two queue types share the same storage layout but use incompatible
//! synchronization disciplines, so each lives behind its own type:
//!
//! - [`AtomicQueue`]: lock-free, optimistic, single-attempt operations that
//!   fail fast when the queue is full, empty, or a concurrent operation
//!   raced ahead. Callers own the retry loop.
//! - [`BlockingQueue`]: mutex + condition variables; `put` and `get`
//!   suspend the calling thread until a slot or a value is available.
//!
//! Neither type supports timeouts, cancellation, or resizing.

mod atomic;
mod blocking;
pub mod error;
mod loom;
mod raw_ring;

pub use crate::atomic::AtomicQueue;
pub use crate::blocking::BlockingQueue;
