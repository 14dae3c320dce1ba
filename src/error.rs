//! Errors reported by the skip list.
//!
//! Lookups that simply find nothing (a rank past the end, an absent key) are
//! not errors and come back as `None`. [`Error`] is reserved for handles that
//! break the list's preconditions.

use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// A handle was used on a list it does not belong to, or after its node was
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The handle was issued by a different list.
    ForeignHandle,
    /// The handle's node has already been removed.
    StaleHandle,
}

impl Error {
    /// Returns `true` if this error is the `ForeignHandle` variant.
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::ForeignHandle)
    }

    /// Returns `true` if this error is the `StaleHandle` variant.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleHandle)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForeignHandle => write!(f, "handle belongs to a different list"),
            Self::StaleHandle => write!(f, "handle refers to a removed node"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod error_test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::ForeignHandle.to_string(),
            "handle belongs to a different list"
        );
        assert_eq!(
            Error::StaleHandle.to_string(),
            "handle refers to a removed node"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(Error::ForeignHandle.is_foreign());
        assert!(!Error::ForeignHandle.is_stale());
        assert!(Error::StaleHandle.is_stale());
    }
}
