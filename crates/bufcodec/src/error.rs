use thiserror::Error;

/// Errors raised by buffer, memory and codec operations.
///
/// Every variant describes a caller mistake detected before any state was
/// touched: a failed call leaves the buffer or codec exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parameter is structurally invalid (for example, an index computation
    /// that overflows, or a size larger than any allocation can be).
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// An index, count or capacity does not fit the bounds of its target.
    /// Also raised when a destination is smaller than the exact output size.
    #[error("`{name}` out of range: {value} exceeds {limit}")]
    OutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// The value supplied (or the size required).
        value: usize,
        /// The bound it had to respect.
        limit: usize,
    },
    /// The operation's precondition does not hold, e.g. removing from an
    /// empty buffer.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

/// The three failure categories, without their payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidArgument`].
    InvalidArgument,
    /// See [`Error::OutOfRange`].
    OutOfRange,
    /// See [`Error::InvalidState`].
    InvalidState,
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::InvalidState(_) => ErrorKind::InvalidState,
        }
    }

    pub(crate) fn out_of_range(name: &'static str, value: usize, limit: usize) -> Self {
        Error::OutOfRange { name, value, limit }
    }

    pub(crate) fn overflow(name: &'static str) -> Self {
        Error::InvalidArgument {
            name,
            reason: "arithmetic overflow",
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        let kind = match err.kind() {
            ErrorKind::InvalidArgument | ErrorKind::OutOfRange => std::io::ErrorKind::InvalidInput,
            ErrorKind::InvalidState => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
