/// Detailed cause of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A value supplied to a mutator cannot be stored in its component.
    ///
    /// The error index points to the first offending byte of the value.
    InvalidInput,
}

/// An error occurred when supplying a malformed value to a mutator of [`Uri`].
///
/// Parsing itself never fails; see [`Uri::parse`].
///
/// [`Uri`]: crate::Uri
/// [`Uri::parse`]: crate::Uri::parse
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Error {
    pub(crate) index: usize,
    pub(crate) kind: ErrorKind,
}

impl Error {
    pub(crate) fn invalid_input(index: usize) -> Self {
        Self {
            index,
            kind: ErrorKind::InvalidInput,
        }
    }

    /// Returns the index at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
