//! Bounded FIFO channels connecting datapath stages.
//!
//! A channel handle is a cheap clone sharing one lock-free queue; the
//! producing stage holds one handle, the consuming stage another. Reads and
//! writes are single atomic operations, so a pipeline of stages needs no
//! locking of its own. Endpoints are expected to be used
//! single-producer/single-consumer; that discipline is a usage contract,
//! not enforced here.

use std::sync::Arc;

use crossbeam_queue::ArrayQueue;

/// A bounded FIFO of fixed-size items.
pub struct FifoChannel<T> {
    queue: Arc<ArrayQueue<T>>,
}

impl<T> Clone for FifoChannel<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<T> FifoChannel<T> {
    /// Create a channel holding at most `capacity` items.
    ///
    /// Panics if `capacity` is zero; a zero-depth channel can never transfer
    /// an item.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: Arc::new(ArrayQueue::new(capacity)),
        }
    }

    /// Non-blocking read: the oldest item, or None if the channel is empty.
    pub fn try_read(&self) -> Option<T> {
        self.queue.pop()
    }

    /// Non-blocking write. A full channel hands the item back so the caller
    /// can hold it and retry on a later step.
    pub fn try_write(&self, item: T) -> Result<(), T> {
        self.queue.push(item)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}
