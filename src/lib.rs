//! Deterministic splitting of IPv4 and IPv6 CIDR blocks into equally sized,
//! ordered sub-blocks.
//!
//! ```
//! use chunk_cidr::{split_by_prefix, NetworkBlock};
//!
//! let block: NetworkBlock = "192.168.0.0/24".parse().unwrap();
//! let subnets = split_by_prefix(&block, 26).unwrap();
//! assert_eq!(subnets.len(), 4);
//! assert_eq!(subnets[1].to_string(), "192.168.0.64/26");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{ErrorKind, SplitError};
pub use models::{AddressFamily, Granularity, NetworkBlock};
pub use processing::{
    chunk_cidr, chunk_cidr_by_size, split_by_prefix, split_by_size, split_lines, BatchEntry,
    Splitter, DEFAULT_MAX_SPLIT_BITS,
};
