//! Command-line surface.
//!
//! `--cidr` splits a single block; without it CIDRs are read from stdin one
//! per line and a bad line is reported and skipped.

use crate::config::Config;
use crate::models::{Granularity, NetworkBlock};
use crate::output::{format_error, write_blocks, OutputFormat};
use crate::processing::{split_lines, Splitter};
use clap::{ArgAction, ArgGroup, Parser};
use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};

pub const EXIT_OK: u8 = 0;
pub const EXIT_SPLIT_ERROR: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

/// Split a CIDR block into equally sized sub-blocks.
#[derive(Parser, Debug)]
#[command(name = "chunk-cidr", version)]
#[command(group(ArgGroup::new("target").required(true).args(["prefix", "size"])))]
#[command(after_help = "Examples:\n  chunk-cidr --cidr 192.168.0.0/24 --prefix 26\n  echo 199.66.248.0/29 | chunk-cidr --size 8")]
pub struct Cli {
    /// CIDR to split, e.g. 192.168.0.0/24 (optional if CIDRs are provided via stdin)
    #[arg(long)]
    pub cidr: Option<String>,

    /// Target prefix length for chunks (e.g. 26)
    #[arg(long)]
    pub prefix: Option<u32>,

    /// Target chunk size in number of IPs (must be power of two, e.g. 8 for /29)
    #[arg(long, allow_negative_numbers = true)]
    pub size: Option<i128>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Refuse splits whose prefix difference exceeds this many bits
    #[arg(long)]
    pub max_split_bits: Option<u32>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn granularity(&self) -> Option<Granularity> {
        match (self.prefix, self.size) {
            (Some(prefix), None) => Some(Granularity::Prefix(prefix)),
            (None, Some(size)) => Some(Granularity::Size(size)),
            _ => None,
        }
    }
}

/// Counts for one batch run.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Everything needed to split inputs and print results.
#[derive(Debug, Copy, Clone)]
pub struct Runner {
    pub splitter: Splitter,
    pub granularity: Granularity,
    pub format: OutputFormat,
    /// Color the error lines.
    pub color: bool,
}

impl Runner {
    /// Split one CIDR. Returns the process exit code.
    pub fn run_single<W: Write, E: Write>(
        &self,
        cidr: &str,
        out: &mut W,
        err_out: &mut E,
    ) -> io::Result<u8> {
        let result =
            NetworkBlock::parse(cidr).and_then(|block| self.splitter.split(&block, self.granularity));
        match result {
            Ok(blocks) => {
                write_blocks(out, self.format, cidr.trim(), &blocks)?;
                Ok(EXIT_OK)
            }
            Err(e) => {
                log::debug!("{cidr}: {e}");
                writeln!(err_out, "{}", format_error(None, &e, self.color))?;
                Ok(EXIT_SPLIT_ERROR)
            }
        }
    }

    /// Split every line of `input`, reporting failures and carrying on.
    pub fn run_batch<R: BufRead, W: Write, E: Write>(
        &self,
        input: R,
        out: &mut W,
        err_out: &mut E,
    ) -> io::Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        for entry in split_lines(input, self.splitter, self.granularity) {
            let entry = entry?;
            summary.processed += 1;
            match entry.result {
                Ok(blocks) => write_blocks(out, self.format, &entry.input, &blocks)?,
                Err(e) => {
                    summary.failed += 1;
                    writeln!(
                        err_out,
                        "{}",
                        format_error(Some(&entry.input), &e, self.color)
                    )?;
                }
            }
        }
        log::info!(
            "processed {} CIDR(s), {} failed",
            summary.processed,
            summary.failed
        );
        Ok(summary)
    }
}

/// Run the command. Returns the process exit code.
pub fn run(cli: &Cli, config: Config) -> Result<u8, Box<dyn Error>> {
    let granularity = cli
        .granularity()
        .ok_or("specify either --prefix or --size, not both")?;
    let config = config.with_overrides(cli.max_split_bits, cli.format);
    let runner = Runner {
        splitter: config.splitter(),
        granularity,
        format: config.format,
        color: io::stderr().is_terminal(),
    };
    log::debug!("{config:?}, {granularity}");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err_out = io::stderr();

    if let Some(cidr) = cli.cidr.as_deref().filter(|c| !c.trim().is_empty()) {
        return Ok(runner.run_single(cidr, &mut out, &mut err_out)?);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("usage: chunk-cidr --cidr CIDR (--prefix N | --size S)");
        eprintln!("   or: echo CIDR | chunk-cidr (--prefix N | --size S)");
        return Ok(EXIT_USAGE);
    }

    runner
        .run_batch(stdin.lock(), &mut out, &mut err_out)
        .map_err(|e| format!("error reading stdin: {e}"))?;
    out.flush()?;
    Ok(EXIT_OK)
}
