//! Splitting a network block into equal, ordered sub-blocks.
//!
//! Sub-block boundaries are computed with arbitrary-precision integers so the
//! same code path serves the 32-bit and 128-bit address spaces.

use super::address_int::{addr_to_biguint, biguint_to_addr};
use crate::error::SplitError;
use crate::models::{Granularity, NetworkBlock};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Default limit on `target_prefix - original_prefix`.
///
/// A difference of 32 already allows about 4.3 billion sub-blocks.
pub const DEFAULT_MAX_SPLIT_BITS: u32 = 32;

/// Upper bound on the up-front allocation for the result vector.
const MAX_PREALLOC: usize = 1 << 16;

/// Splits network blocks, refusing splits wider than `max_split_bits`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Splitter {
    max_split_bits: u32,
}

impl Default for Splitter {
    fn default() -> Self {
        Splitter {
            max_split_bits: DEFAULT_MAX_SPLIT_BITS,
        }
    }
}

impl Splitter {
    pub fn new(max_split_bits: u32) -> Splitter {
        Splitter { max_split_bits }
    }

    pub fn max_split_bits(&self) -> u32 {
        self.max_split_bits
    }

    /// Split `block` at the given granularity.
    pub fn split(
        &self,
        block: &NetworkBlock,
        granularity: Granularity,
    ) -> Result<Vec<NetworkBlock>, SplitError> {
        match granularity {
            Granularity::Prefix(prefix) => self.split_by_prefix(block, prefix),
            Granularity::Size(size) => self.split_by_size(block, size),
        }
    }

    /// Split `block` into sub-blocks of prefix length `target_prefix`.
    ///
    /// The result holds 2^(target_prefix - prefix) blocks in ascending
    /// address order that together cover `block` exactly.
    pub fn split_by_prefix(
        &self,
        block: &NetworkBlock,
        target_prefix: u32,
    ) -> Result<Vec<NetworkBlock>, SplitError> {
        let original = block.prefix();
        let max_bits = block.max_bits();

        if target_prefix < u32::from(original) {
            return Err(SplitError::PrefixTooShort {
                target: target_prefix,
                original,
            });
        }
        if target_prefix > u32::from(max_bits) {
            return Err(SplitError::PrefixTooLong {
                target: target_prefix,
                max_bits,
            });
        }
        if target_prefix == u32::from(original) {
            return Ok(vec![*block]);
        }

        let diff = target_prefix - u32::from(original);
        if diff > self.max_split_bits {
            return Err(SplitError::SplitTooLarge {
                diff,
                limit: self.max_split_bits,
            });
        }

        // target_prefix <= max_bits, so it fits in a u8.
        let new_prefix = target_prefix as u8;
        let count = BigUint::one() << diff as usize;
        let step = BigUint::one() << usize::from(max_bits - new_prefix);
        let base = addr_to_biguint(block.addr());
        let family = block.family();

        log::debug!("split {block} into {count} blocks of /{new_prefix}");

        let capacity = 1usize.checked_shl(diff).unwrap_or(usize::MAX);
        let mut blocks = Vec::with_capacity(capacity.min(MAX_PREALLOC));
        let mut i = BigUint::zero();
        while i < count {
            let cur = &base + &i * &step;
            let addr = biguint_to_addr(&cur, family);
            blocks.push(NetworkBlock::new(addr, new_prefix)?);
            i += 1u32;
        }

        Ok(blocks)
    }

    /// Split `block` into sub-blocks of `size` addresses each.
    pub fn split_by_size(
        &self,
        block: &NetworkBlock,
        size: i128,
    ) -> Result<Vec<NetworkBlock>, SplitError> {
        let target_prefix = prefix_for_size(block, size)?;
        self.split_by_prefix(block, target_prefix)
    }
}

/// Prefix length whose blocks hold `size` addresses within `block`'s family.
///
/// `size` must be a positive power of two no larger than `block` itself.
pub fn prefix_for_size(block: &NetworkBlock, size: i128) -> Result<u32, SplitError> {
    if size <= 0 {
        return Err(SplitError::NonPositiveSize { size });
    }
    if size & (size - 1) != 0 {
        return Err(SplitError::SizeNotPowerOfTwo { size });
    }

    // Exact: a single bit is set.
    let log2 = size.trailing_zeros();
    let target = i64::from(block.max_bits()) - i64::from(log2);
    if target < i64::from(block.prefix()) {
        return Err(SplitError::SizeTooLarge {
            size,
            target,
            original: block.prefix(),
        });
    }

    Ok(target as u32)
}

/// Split with the default limit. See [`Splitter::split_by_prefix`].
pub fn split_by_prefix(
    block: &NetworkBlock,
    target_prefix: u32,
) -> Result<Vec<NetworkBlock>, SplitError> {
    Splitter::default().split_by_prefix(block, target_prefix)
}

/// Split with the default limit. See [`Splitter::split_by_size`].
pub fn split_by_size(block: &NetworkBlock, size: i128) -> Result<Vec<NetworkBlock>, SplitError> {
    Splitter::default().split_by_size(block, size)
}

/// Parse `cidr` and split it to `target_prefix`, returning CIDR strings.
///
/// # Examples
/// ```
/// let subnets = chunk_cidr::chunk_cidr("10.0.0.0/23", 24).unwrap();
/// assert_eq!(subnets, vec!["10.0.0.0/24", "10.0.1.0/24"]);
/// ```
pub fn chunk_cidr(cidr: &str, target_prefix: u32) -> Result<Vec<String>, SplitError> {
    let block = NetworkBlock::parse(cidr)?;
    Ok(to_strings(&split_by_prefix(&block, target_prefix)?))
}

/// Parse `cidr` and split it into blocks of `size` addresses.
pub fn chunk_cidr_by_size(cidr: &str, size: i128) -> Result<Vec<String>, SplitError> {
    let block = NetworkBlock::parse(cidr)?;
    Ok(to_strings(&split_by_size(&block, size)?))
}

fn to_strings(blocks: &[NetworkBlock]) -> Vec<String> {
    blocks.iter().map(NetworkBlock::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn block(s: &str) -> NetworkBlock {
        NetworkBlock::parse(s).unwrap()
    }

    #[test]
    fn test_split_ipv4_by_prefix() {
        let res = chunk_cidr("192.168.0.0/24", 26).unwrap();
        let want = vec![
            "192.168.0.0/26",
            "192.168.0.64/26",
            "192.168.0.128/26",
            "192.168.0.192/26",
        ];
        assert_eq!(res, want);
    }

    #[test]
    fn test_split_same_prefix() {
        let res = chunk_cidr("10.0.0.0/8", 8).unwrap();
        assert_eq!(res, vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_split_same_prefix_normalizes() {
        let res = chunk_cidr("10.1.2.3/8", 8).unwrap();
        assert_eq!(res, vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_split_unaligned_input_uses_network_address() {
        let res = chunk_cidr("192.168.0.77/24", 25).unwrap();
        assert_eq!(res, vec!["192.168.0.0/25", "192.168.0.128/25"]);
    }

    #[test]
    fn test_split_by_size_whole_block() {
        let res = chunk_cidr_by_size("199.66.248.0/29", 8).unwrap();
        assert_eq!(res, vec!["199.66.248.0/29"]);
    }

    #[test]
    fn test_split_by_size_64() {
        let res = chunk_cidr_by_size("192.168.0.0/24", 64).unwrap();
        assert_eq!(res, chunk_cidr("192.168.0.0/24", 26).unwrap());
        assert_eq!(res.len(), 4);
    }

    #[test]
    fn test_split_ipv6() {
        let res = chunk_cidr("2001:db8::/32", 34).unwrap();
        let want = vec![
            "2001:db8::/34",
            "2001:db8:4000::/34",
            "2001:db8:8000::/34",
            "2001:db8:c000::/34",
        ];
        assert_eq!(res, want);
    }

    #[test]
    fn test_split_to_host_routes() {
        let res = chunk_cidr("10.0.0.0/30", 32).unwrap();
        assert_eq!(
            res,
            vec!["10.0.0.0/32", "10.0.0.1/32", "10.0.0.2/32", "10.0.0.3/32"]
        );
        let res6 = chunk_cidr_by_size("2001:db8::/127", 1).unwrap();
        assert_eq!(res6, vec!["2001:db8::/128", "2001:db8::1/128"]);
    }

    #[test]
    fn test_split_top_of_address_space() {
        let res = chunk_cidr("255.255.255.0/24", 25).unwrap();
        assert_eq!(res, vec!["255.255.255.0/25", "255.255.255.128/25"]);

        let res6 = chunk_cidr("ffff::/16", 17).unwrap();
        assert_eq!(res6, vec!["ffff::/17", "ffff:8000::/17"]);
    }

    #[test]
    fn test_split_whole_space() {
        let res = chunk_cidr("0.0.0.0/0", 2).unwrap();
        assert_eq!(
            res,
            vec!["0.0.0.0/2", "64.0.0.0/2", "128.0.0.0/2", "192.0.0.0/2"]
        );
        let res6 = chunk_cidr("::/0", 1).unwrap();
        assert_eq!(res6, vec!["::/1", "8000::/1"]);
    }

    #[test]
    fn test_split_mapped_ipv6_stays_ipv6() {
        // Sub-blocks inside ::ffff:0:0/96 must not turn into IPv4 blocks.
        let res = split_by_prefix(&block("::fffe:0:0/95"), 96).unwrap();
        assert_eq!(res.len(), 2);
        assert!(res.iter().all(|b| b.max_bits() == 128));
        assert_eq!(res[1].addr(), "::ffff:0:0".parse::<std::net::IpAddr>().unwrap());
    }

    #[test]
    fn test_invalid_prefix() {
        let err = chunk_cidr("192.168.1.0/24", 22).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPrefix);
        assert_eq!(
            err,
            SplitError::PrefixTooShort {
                target: 22,
                original: 24
            }
        );

        let err = chunk_cidr("192.168.1.0/24", 33).unwrap_err();
        assert_eq!(
            err,
            SplitError::PrefixTooLong {
                target: 33,
                max_bits: 32
            }
        );
        assert_eq!(
            chunk_cidr("2001:db8::/32", 129).unwrap_err().kind(),
            ErrorKind::InvalidPrefix
        );
    }

    #[test]
    fn test_split_too_large() {
        let err = chunk_cidr("2001:db8::/32", 65).unwrap_err();
        assert_eq!(err, SplitError::SplitTooLarge { diff: 33, limit: 32 });
        assert_eq!(err.kind(), ErrorKind::SplitTooLarge);
    }

    #[test]
    fn test_custom_limit() {
        let splitter = Splitter::new(2);
        assert_eq!(splitter.max_split_bits(), 2);
        assert_eq!(
            splitter
                .split_by_prefix(&block("10.0.0.0/24"), 27)
                .unwrap_err(),
            SplitError::SplitTooLarge { diff: 3, limit: 2 }
        );
        assert_eq!(
            splitter
                .split_by_prefix(&block("10.0.0.0/24"), 26)
                .unwrap()
                .len(),
            4
        );
        // Identity is never capped.
        let zero = Splitter::new(0);
        assert_eq!(
            zero.split_by_prefix(&block("10.0.0.0/24"), 24).unwrap(),
            vec![block("10.0.0.0/24")]
        );
    }

    #[test]
    fn test_invalid_size() {
        for size in [0, -1, -64] {
            let err = chunk_cidr_by_size("10.0.0.0/24", size).unwrap_err();
            assert_eq!(err, SplitError::NonPositiveSize { size });
        }
        for size in [3, 5, 7, 100] {
            let err = chunk_cidr_by_size("10.0.0.0/24", size).unwrap_err();
            assert_eq!(err, SplitError::SizeNotPowerOfTwo { size });
        }
        let err = chunk_cidr_by_size("10.0.0.0/24", 512).unwrap_err();
        assert_eq!(
            err,
            SplitError::SizeTooLarge {
                size: 512,
                target: 23,
                original: 24
            }
        );
        // Larger than the whole IPv4 space.
        let err = chunk_cidr_by_size("0.0.0.0/0", 1 << 40).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSize);
    }

    #[test]
    fn test_size_errors_propagate_from_prefix_split() {
        // /8 into single hosts is a 24 bit difference.
        let splitter = Splitter::new(8);
        let err = splitter
            .split_by_size(&block("10.0.0.0/8"), 1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SplitTooLarge);
    }

    #[test]
    fn test_prefix_for_size() {
        assert_eq!(prefix_for_size(&block("10.0.0.0/8"), 1).unwrap(), 32);
        assert_eq!(prefix_for_size(&block("10.0.0.0/8"), 256).unwrap(), 24);
        assert_eq!(prefix_for_size(&block("2001:db8::/32"), 1 << 64).unwrap(), 64);
    }

    #[test]
    fn test_split_dispatch() {
        let splitter = Splitter::default();
        let b = block("192.168.0.0/24");
        assert_eq!(
            splitter.split(&b, Granularity::Prefix(26)).unwrap(),
            splitter.split(&b, Granularity::Size(64)).unwrap()
        );
    }

    #[test]
    fn test_malformed_cidr() {
        let err = chunk_cidr("not-a-cidr", 24).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedCidr);
        let err = chunk_cidr_by_size("not-a-cidr", 8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedCidr);
    }
}
