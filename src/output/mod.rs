//! Output formatting for split results.
//!
//! - [`terminal`] - plain lines and error lines
//! - [`json`] - JSON lines output

mod format;
mod json;
mod terminal;

use crate::models::NetworkBlock;
use std::io::{self, Write};

pub use format::OutputFormat;
pub use json::{write_json, SplitRecord};
pub use terminal::{format_error, write_plain};

/// Write the sub-blocks of one input in the requested format.
pub fn write_blocks<W: Write>(
    out: &mut W,
    format: OutputFormat,
    input: &str,
    blocks: &[NetworkBlock],
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, blocks),
        OutputFormat::Json => write_json(
            out,
            &SplitRecord {
                cidr: input,
                subnets: blocks,
            },
        ),
    }
}
