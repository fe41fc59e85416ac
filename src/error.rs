use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PutError {
    Full,
    Contended,
}

impl fmt::Display for PutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            PutError::Full => write!(f, "put failed because queue is full"),
            PutError::Contended => write!(f, "put failed because a concurrent operation raced ahead"),
        }
    }
}

impl std::error::Error for PutError {}

impl PutError {
    pub fn is_full(&self) -> bool {
        matches!(&self, PutError::Full)
    }

    pub fn is_contended(&self) -> bool {
        matches!(&self, PutError::Contended)
    }
}

/// Error of a failed [`try_put`](crate::AtomicQueue::try_put), carrying the
/// value that was not stored.
#[derive(Clone, PartialEq, Eq)]
pub struct TryPutError<T> {
    pub(crate) err: PutError,
    pub(crate) val: T,
}

impl<T> fmt::Debug for TryPutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryPutError")
            .field("kind", &self.err)
            .finish()
    }
}

impl<T> fmt::Display for TryPutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.err.fmt(f)
    }
}

impl<T: core::any::Any> std::error::Error for TryPutError<T> {}

impl<T> TryPutError<T> {
    pub fn is_full(&self) -> bool {
        self.err.is_full()
    }

    pub fn is_contended(&self) -> bool {
        self.err.is_contended()
    }

    pub fn into_inner(self) -> T {
        self.val
    }

    pub fn into_put_error(self) -> PutError {
        self.err
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TryGetError {
    Empty,
    Contended,
}

impl fmt::Display for TryGetError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TryGetError::Empty => "getting from an empty queue".fmt(fmt),
            TryGetError::Contended => "get failed because a concurrent operation raced ahead".fmt(fmt),
        }
    }
}

impl std::error::Error for TryGetError {}

impl TryGetError {
    pub fn is_empty(&self) -> bool {
        matches!(self, TryGetError::Empty)
    }

    pub fn is_contended(&self) -> bool {
        matches!(self, TryGetError::Contended)
    }
}
