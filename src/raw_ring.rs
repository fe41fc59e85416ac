use crate::loom::UnsafeCell;
use std::mem::MaybeUninit;

unsafe impl<T: Send> Send for RawRing<T> {}
unsafe impl<T: Send> Sync for RawRing<T> {}

/// Fixed-capacity slot storage shared by both queue flavors.
///
/// Positions are monotonically increasing `u64` counters owned by the
/// caller; this type only maps them onto slots and moves values in and
/// out. All synchronization lives in the queues on top.
pub(crate) struct RawRing<T> {
    buf: Box<[UnsafeCell<MaybeUninit<T>>]>,
    cap: usize,
}

impl<T> RawRing<T> {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        assert!(cap > 0, "queue capacity must be positive");

        let buf = (0..cap)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect();
        Self { buf, cap }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn index(&self, pos: u64) -> usize {
        (pos % self.cap as u64) as usize
    }

    /// Moves the value out of the slot, leaving it logically empty.
    ///
    /// # Safety
    ///
    /// The caller must hold exclusive ownership of `idx` and the slot must
    /// contain an initialized value.
    pub(crate) unsafe fn slot_read(&self, idx: usize) -> T {
        let cell = self.buf.get_unchecked(idx);
        cell.with(|inner| inner.read().assume_init())
    }

    /// # Safety
    ///
    /// The caller must hold exclusive ownership of `idx` and the slot must
    /// be empty (a previous value would leak, or double-drop later).
    pub(crate) unsafe fn slot_write(&self, idx: usize, value: T) {
        let cell = self.buf.get_unchecked(idx);
        cell.with_mut(|ptr| ptr.write(MaybeUninit::new(value)));
    }

    /// Drops the `len` live values starting at position `pos`.
    ///
    /// # Safety
    ///
    /// Exactly the slots `[pos, pos + len)` must hold initialized values
    /// and no other thread may touch the ring. Used by the queues' `Drop`.
    pub(crate) unsafe fn drop_range(&mut self, pos: u64, len: usize) {
        for off in 0..len as u64 {
            let idx = self.index(pos + off);
            let cell = self.buf.get_unchecked(idx);
            cell.with_mut(|ptr| std::ptr::drop_in_place((*ptr).as_mut_ptr()));
        }
    }
}
