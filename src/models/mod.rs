//! Domain models for CIDR splitting.
//!
//! - [`NetworkBlock`] - address block in CIDR notation, IPv4 or IPv6
//! - [`AddressFamily`] - 32-bit or 128-bit address space
//! - [`Granularity`] - target prefix length or target block size

mod granularity;
mod network;

// Re-export public types
pub use granularity::Granularity;
pub use network::{AddressFamily, NetworkBlock, MAX_LENGTH_V4, MAX_LENGTH_V6};
