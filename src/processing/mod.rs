//! Splitting logic.
//!
//! - [`split`] - the splitter for prefix and size granularities
//! - [`address_int`] - address to big-integer conversion
//! - [`batch`] - line-by-line splitting of an input stream

mod address_int;
mod batch;
mod split;

// Re-export public functions
pub use address_int::{addr_to_biguint, biguint_to_addr};
pub use batch::{split_lines, BatchEntry};
pub use split::{
    chunk_cidr, chunk_cidr_by_size, prefix_for_size, split_by_prefix, split_by_size, Splitter,
    DEFAULT_MAX_SPLIT_BITS,
};
