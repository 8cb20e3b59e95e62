//! JSON lines output.

use crate::models::NetworkBlock;
use serde::Serialize;
use std::io::{self, Write};

/// One input CIDR and the sub-blocks it was split into.
#[derive(Serialize, Debug)]
pub struct SplitRecord<'a> {
    pub cidr: &'a str,
    pub subnets: &'a [NetworkBlock],
}

/// Write `record` as a single JSON line.
pub fn write_json<W: Write>(out: &mut W, record: &SplitRecord) -> io::Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    writeln!(out)
}
