//! Splitting a stream of CIDRs, one per line.
//!
//! A bad line produces an error entry and processing moves on to the next.

use super::split::Splitter;
use crate::error::SplitError;
use crate::models::{Granularity, NetworkBlock};
use std::io::{self, BufRead};

/// Outcome of splitting a single input line.
#[derive(Debug)]
pub struct BatchEntry {
    /// 1-based line number in the input stream.
    pub line_no: usize,
    /// The trimmed input text.
    pub input: String,
    pub result: Result<Vec<NetworkBlock>, SplitError>,
}

/// Split every non-blank line read from `reader`.
///
/// Only read failures are returned as `Err`; split failures are carried in
/// [`BatchEntry::result`]. A line that is not valid UTF-8 is a malformed
/// CIDR like any other bad line.
pub fn split_lines<R: BufRead>(
    reader: R,
    splitter: Splitter,
    granularity: Granularity,
) -> impl Iterator<Item = io::Result<BatchEntry>> {
    reader
        .split(b'\n')
        .enumerate()
        .filter_map(move |(i, line)| {
            let bytes = match line {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(e)),
            };
            let (line, utf8_ok) = match String::from_utf8(bytes) {
                Ok(line) => (line, true),
                Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), false),
            };
            let input = line.trim();
            if input.is_empty() {
                return None;
            }

            let result = if utf8_ok {
                NetworkBlock::parse(input).and_then(|block| splitter.split(&block, granularity))
            } else {
                Err(SplitError::malformed(input, "line is not valid UTF-8"))
            };
            if let Err(e) = &result {
                log::debug!("line {}: {input}: {e}", i + 1);
            }
            Some(Ok(BatchEntry {
                line_no: i + 1,
                input: input.to_string(),
                result,
            }))
        })
}
