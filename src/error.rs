//! Error kinds raised while parsing and splitting network blocks.

use thiserror::Error;

/// Every failure is an input-validation failure; nothing here is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Text that is not a network block in CIDR notation.
    #[error("invalid cidr: {input}: {reason}")]
    MalformedCidr { input: String, reason: String },

    #[error("target prefix /{target} is smaller than original prefix /{original}")]
    PrefixTooShort { target: u32, original: u8 },

    #[error("target prefix /{target} is larger than max bits {max_bits}")]
    PrefixTooLong { target: u32, max_bits: u8 },

    /// Prefix difference above the configured cap.
    #[error("requested split too large: diff={diff} exceeds limit of {limit}")]
    SplitTooLarge { diff: u32, limit: u32 },

    #[error("size must be > 0, got {size}")]
    NonPositiveSize { size: i128 },

    #[error("size must be a power of two, got {size}")]
    SizeNotPowerOfTwo { size: i128 },

    #[error("requested size {size} yields prefix /{target} which is smaller than original prefix /{original}")]
    SizeTooLarge { size: i128, target: i64, original: u8 },
}

/// Coarse classification of [`SplitError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedCidr,
    InvalidPrefix,
    SplitTooLarge,
    InvalidSize,
}

impl SplitError {
    pub fn malformed(input: &str, reason: impl ToString) -> Self {
        SplitError::MalformedCidr {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SplitError::MalformedCidr { .. } => ErrorKind::MalformedCidr,
            SplitError::PrefixTooShort { .. } | SplitError::PrefixTooLong { .. } => {
                ErrorKind::InvalidPrefix
            }
            SplitError::SplitTooLarge { .. } => ErrorKind::SplitTooLarge,
            SplitError::NonPositiveSize { .. }
            | SplitError::SizeNotPowerOfTwo { .. }
            | SplitError::SizeTooLarge { .. } => ErrorKind::InvalidSize,
        }
    }
}
