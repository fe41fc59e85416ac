use crate::loom::{Condvar, Mutex};
use crate::raw_ring::RawRing;
use std::fmt;

struct Pos {
    head: u64,
    tail: u64,
}

impl Pos {
    fn len(&self) -> usize {
        (self.tail - self.head) as usize
    }
}

/// Bounded queue whose operations block the calling thread.
///
/// One mutex guards the head/tail positions; `not_full` and `not_empty`
/// condition variables park producers and consumers. There are no
/// timeouts and no cancellation: a `put` against a full queue with no
/// consumer, or a `get` against an empty queue with no producer, waits
/// forever. Callers needing deadlines must wrap this type externally.
pub struct BlockingQueue<T> {
    ring: RawRing<T>,
    pos: Mutex<Pos>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> BlockingQueue<T> {
    /// Creates a queue holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, which would make every `put` block
    /// forever.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: RawRing::with_capacity(capacity),
            pos: Mutex::new(Pos { head: 0, tail: 0 }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Occupied-slot count at the moment the lock was held. Advisory only
    /// under concurrent mutation.
    pub fn len(&self) -> usize {
        self.pos.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.ring.capacity()
    }

    /// Appends `value`, waiting for a free slot if the queue is full.
    pub fn put(&self, value: T) {
        let mut pos = self.pos.lock().unwrap();
        // Re-check after every wake: another producer may have taken the
        // slot, and condvars may wake spuriously.
        while pos.len() >= self.ring.capacity() {
            pos = self.not_full.wait(pos).unwrap();
        }

        let idx = self.ring.index(pos.tail);
        unsafe {
            // The lock makes us the only owner of this slot.
            self.ring.slot_write(idx, value);
        }
        pos.tail += 1;
        drop(pos);

        self.not_empty.notify_one();
    }

    /// Removes the oldest value, waiting for one if the queue is empty.
    pub fn get(&self) -> T {
        let mut pos = self.pos.lock().unwrap();
        while pos.len() == 0 {
            pos = self.not_empty.wait(pos).unwrap();
        }

        let idx = self.ring.index(pos.head);
        let value = unsafe { self.ring.slot_read(idx) };
        let was_full = pos.len() == self.ring.capacity();
        pos.head += 1;
        drop(pos);

        // Only the full-to-partial transition relieves backpressure, so
        // producers are only woken then. This must wake every parked
        // producer: a single wake could be swallowed by one that finishes
        // without refilling the queue, stranding the rest.
        if was_full {
            self.not_full.notify_all();
        }
        value
    }
}

impl<T> Drop for BlockingQueue<T> {
    fn drop(&mut self) {
        let pos = self.pos.lock().unwrap();
        let (head, len) = (pos.head, pos.len());
        drop(pos);
        unsafe {
            self.ring.drop_range(head, len);
        }
    }
}

impl<T> fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.pos.lock().unwrap();
        f.debug_struct("BlockingQueue")
            .field("capacity", &self.ring.capacity())
            .field("len", &pos.len())
            .field("head", &pos.head)
            .field("tail", &pos.tail)
            .finish()
    }
}
