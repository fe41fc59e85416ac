use self::inner::AtomicPos;
use crate::error::{PutError, TryGetError, TryPutError};
use crate::loom::AtomicU64;
use crate::raw_ring::RawRing;
use std::fmt;
use std::sync::atomic::Ordering;

#[cfg(feature = "cache-padded")]
mod inner {
    use crate::loom::AtomicU64;
    use cache_padded::CachePadded;
    use core::ops::Deref;

    #[derive(Default)]
    pub(crate) struct AtomicPos {
        inner: CachePadded<AtomicU64>,
    }

    impl Deref for AtomicPos {
        type Target = AtomicU64;

        fn deref(&self) -> &Self::Target {
            &self.inner
        }
    }
}

#[cfg(not(feature = "cache-padded"))]
mod inner {
    use crate::loom::AtomicU64;
    use core::ops::Deref;

    #[derive(Default)]
    pub(crate) struct AtomicPos {
        inner: AtomicU64,
    }

    impl Deref for AtomicPos {
        type Target = AtomicU64;

        fn deref(&self) -> &Self::Target {
            &self.inner
        }
    }
}

/// Lock-free bounded queue with optimistic, single-attempt operations.
///
/// `head` and `tail` are monotonically increasing positions; the occupied
/// count is their difference, so a single compare-and-swap on one counter
/// advances position and count together. A per-slot stamp tracks whether
/// the slot's value for a given lap has been written yet, which keeps a
/// winning consumer from reading a slot a winning producer is still
/// filling.
///
/// Every operation makes exactly one attempt. Losing a race reports
/// [`Contended`](PutError::Contended) and mutates nothing; retrying is the
/// caller's job and is expected behavior under load, not an exceptional
/// condition.
pub struct AtomicQueue<T> {
    ring: RawRing<T>,
    stamps: Box<[AtomicU64]>,
    head: AtomicPos,
    tail: AtomicPos,
}

impl<T> AtomicQueue<T> {
    /// Creates a queue holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a queue that can never accept a value
    /// is always a caller bug.
    pub fn with_capacity(capacity: usize) -> Self {
        let ring = RawRing::with_capacity(capacity);
        // Slot at position p is writable when its stamp equals p, readable
        // when it equals p + 1.
        let stamps = (0..capacity).map(|i| AtomicU64::new(i as u64)).collect();
        Self {
            ring,
            stamps,
            head: Default::default(),
            tail: Default::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Occupied-slot count. Advisory only: under concurrent mutation the
    /// snapshot may be stale by the time the caller looks at it.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        // The two loads are not a consistent snapshot, so clamp.
        tail.wrapping_sub(head).min(self.ring.capacity() as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.ring.capacity()
    }

    /// Attempts to append `value` without blocking.
    ///
    /// Fails with [`PutError::Full`] when no capacity remains, or with
    /// [`PutError::Contended`] when another operation raced ahead between
    /// the capacity check and the position update. Either way the rejected
    /// value comes back via [`TryPutError::into_inner`].
    pub fn try_put(&self, value: T) -> Result<(), TryPutError<T>> {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);

        if tail.wrapping_sub(head) >= self.ring.capacity() as u64 {
            return Err(TryPutError {
                err: PutError::Full,
                val: value,
            });
        }

        let idx = self.ring.index(tail);
        // A producer that already claimed this position may still be
        // filling the slot; its stamp lags until the write lands.
        if self.stamps[idx].load(Ordering::Acquire) != tail {
            return Err(TryPutError {
                err: PutError::Contended,
                val: value,
            });
        }

        if self
            .tail
            .compare_exchange(tail, tail + 1, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return Err(TryPutError {
                err: PutError::Contended,
                val: value,
            });
        }

        unsafe {
            self.ring.slot_write(idx, value);
        }
        self.stamps[idx].store(tail + 1, Ordering::Release);
        Ok(())
    }

    /// Attempts to remove the oldest value without blocking.
    ///
    /// Mirrors [`try_put`](Self::try_put): [`TryGetError::Empty`] when
    /// nothing is buffered, [`TryGetError::Contended`] on a lost race.
    pub fn try_get(&self) -> Result<T, TryGetError> {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);

        if head == tail {
            return Err(TryGetError::Empty);
        }

        let idx = self.ring.index(head);
        if self.stamps[idx].load(Ordering::Acquire) != head + 1 {
            return Err(TryGetError::Contended);
        }

        if self
            .head
            .compare_exchange(head, head + 1, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return Err(TryGetError::Contended);
        }

        let value = unsafe { self.ring.slot_read(idx) };
        // Recycle the slot for the producer one lap ahead.
        self.stamps[idx].store(head + self.ring.capacity() as u64, Ordering::Release);
        Ok(value)
    }
}

impl<T> Drop for AtomicQueue<T> {
    fn drop(&mut self) {
        let head = self.head.load(Ordering::Acquire);
        let len = self.len();
        unsafe {
            self.ring.drop_range(head, len);
        }
    }
}

impl<T> fmt::Debug for AtomicQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        f.debug_struct("AtomicQueue")
            .field("capacity", &self.ring.capacity())
            .field("len", &self.len())
            .field("head", &head)
            .field("tail", &tail)
            .finish()
    }
}
