//! Error types for the dfpwm codec.

use thiserror::Error;

/// Result type for codec operations.
pub type DfpwmResult<T> = Result<T, DfpwmError>;

/// Errors returned by the codec and its streaming helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DfpwmError {
    /// Generic contract violation.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong.
        reason: String,
    },

    /// Encode was asked for a sample count that does not fill whole bytes.
    #[error("invalid argument: sample count {count} is not a multiple of 8")]
    UnalignedSampleCount {
        /// The rejected count.
        count: usize,
    },

    /// An offset/length pair runs past the end of a buffer.
    #[error("invalid argument: {what} range {offset}..{offset}+{len} exceeds buffer of {capacity}")]
    OutOfBounds {
        /// Which buffer.
        what: &'static str,
        /// Start offset.
        offset: usize,
        /// Requested element count.
        len: usize,
        /// Buffer length.
        capacity: usize,
    },

    /// A streaming encoder would grow past its configured bound.
    #[error("output limit of {limit} bytes exceeded")]
    LimitExceeded {
        /// The configured bound.
        limit: usize,
    },
}

impl DfpwmError {
    /// true for caller contract violations
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            DfpwmError::InvalidArgument { .. }
                | DfpwmError::UnalignedSampleCount { .. }
                | DfpwmError::OutOfBounds { .. }
        )
    }
}

/// check that `offset..offset + len` lies inside a buffer of `capacity`
pub(crate) fn check_range(
    what: &'static str,
    offset: usize,
    len: usize,
    capacity: usize,
) -> DfpwmResult<()> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(DfpwmError::OutOfBounds {
            what,
            offset,
            len,
            capacity,
        }),
    }
}
