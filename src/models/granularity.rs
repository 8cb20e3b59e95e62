//! Target granularity for a split.

use std::fmt;

/// How finely a block should be split.
///
/// Both forms describe the same quantity: a block of `Size(s)` addresses has
/// prefix `max_bits - log2(s)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Granularity {
    /// Target prefix length, e.g. 26 for /26 sub-blocks.
    Prefix(u32),
    /// Target address count per sub-block, must be a power of two.
    Size(i128),
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Granularity::Prefix(p) => write!(f, "prefix /{p}"),
            Granularity::Size(s) => write!(f, "size {s}"),
        }
    }
}
