//! Network blocks in CIDR notation for both address families.
//!
//! Provides [`NetworkBlock`] along with the mask helpers used to normalize
//! addresses and compute block boundaries.

use crate::error::SplitError;
use num_bigint::BigUint;
use num_traits::One;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length for IPv4 (32 bits).
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for IPv6 (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// Width of the prefix of an IPv4-mapped IPv6 address (`::ffff:0:0/96`).
const MAPPED_V4_PREFIX: u8 = 96;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(addr: IpAddr) -> AddressFamily {
        match addr {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }

    /// Address width in bits (32 or 128).
    pub fn max_bits(self) -> u8 {
        match self {
            AddressFamily::V4 => MAX_LENGTH_V4,
            AddressFamily::V6 => MAX_LENGTH_V6,
        }
    }

    /// Address width in bytes (4 or 16).
    pub fn byte_len(self) -> usize {
        usize::from(self.max_bits()) / 8
    }

    /// Build an address of this family from its low-order bits.
    pub fn addr_from_bits(self, bits: u128) -> IpAddr {
        match self {
            AddressFamily::V4 => IpAddr::V4(Ipv4Addr::from(bits as u32)),
            AddressFamily::V6 => IpAddr::V6(Ipv6Addr::from(bits)),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// Numeric value of an address, widened to 128 bits.
pub(crate) fn addr_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

/// Network mask for a prefix length, as the low `max_bits` bits of a u128.
pub(crate) fn get_cidr_mask(len: u8, family: AddressFamily) -> u128 {
    let max_bits = family.max_bits();
    let len = len.min(max_bits);
    let right_len = u32::from(max_bits - len);
    let all_bits = u128::MAX >> (128 - u32::from(max_bits));

    all_bits
        .checked_shr(right_len)
        .and_then(|bits| bits.checked_shl(right_len))
        .unwrap_or(0)
}

/// Network (lowest) address for a given address and prefix length.
pub(crate) fn cut_addr(addr: IpAddr, len: u8) -> IpAddr {
    let family = AddressFamily::of(addr);
    family.addr_from_bits(addr_bits(addr) & get_cidr_mask(len, family))
}

/// Broadcast (highest) address for a given address and prefix length.
pub(crate) fn broadcast_addr(addr: IpAddr, len: u8) -> IpAddr {
    let family = AddressFamily::of(addr);
    let mask = get_cidr_mask(len, family);
    let all_bits = get_cidr_mask(family.max_bits(), family);
    family.addr_from_bits((addr_bits(addr) & mask) | (!mask & all_bits))
}

/// An address block: network address plus prefix length.
///
/// The address always has its host bits zeroed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkBlock {
    addr: IpAddr,
    prefix: u8,
}

impl NetworkBlock {
    /// Create a block from an address and prefix, zeroing the host bits.
    pub fn new(addr: IpAddr, prefix: u8) -> Result<NetworkBlock, SplitError> {
        let max_bits = AddressFamily::of(addr).max_bits();
        if prefix > max_bits {
            return Err(SplitError::PrefixTooLong {
                target: u32::from(prefix),
                max_bits,
            });
        }
        Ok(NetworkBlock::normalized(addr, prefix))
    }

    /// Parse CIDR text such as "10.0.0.0/8" or "2001:db8::/32".
    pub fn parse(text: &str) -> Result<NetworkBlock, SplitError> {
        let cidr = text.trim();
        let parts: Vec<&str> = cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(SplitError::malformed(cidr, "expected address/prefix"));
        }

        let addr: IpAddr = parts[0]
            .parse()
            .map_err(|_| SplitError::malformed(cidr, format!("invalid address {}", parts[0])))?;

        let prefix_text = parts[1];
        if prefix_text.is_empty() || !prefix_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SplitError::malformed(
                cidr,
                format!("invalid prefix length {prefix_text}"),
            ));
        }
        let family = AddressFamily::of(addr);
        let prefix = prefix_text
            .parse::<u8>()
            .ok()
            .filter(|p| *p <= family.max_bits())
            .ok_or_else(|| {
                SplitError::malformed(
                    cidr,
                    format!("prefix length {prefix_text} out of range for {family}"),
                )
            })?;

        // IPv4-mapped IPv6 blocks are plain IPv4 blocks.
        let (addr, prefix) = match addr {
            IpAddr::V6(v6) if prefix >= MAPPED_V4_PREFIX => match v6.to_ipv4_mapped() {
                Some(v4) => (IpAddr::V4(v4), prefix - MAPPED_V4_PREFIX),
                None => (addr, prefix),
            },
            _ => (addr, prefix),
        };
        Ok(NetworkBlock::normalized(addr, prefix))
    }

    fn normalized(addr: IpAddr, prefix: u8) -> NetworkBlock {
        NetworkBlock {
            addr: cut_addr(addr, prefix),
            prefix,
        }
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(self.addr)
    }

    /// 32 for IPv4, 128 for IPv6.
    pub fn max_bits(&self) -> u8 {
        self.family().max_bits()
    }

    /// Lowest address in the block.
    pub fn network(&self) -> IpAddr {
        self.addr
    }

    /// Highest address in the block.
    pub fn broadcast(&self) -> IpAddr {
        broadcast_addr(self.addr, self.prefix)
    }

    /// Number of addresses covered, 2^(max_bits - prefix).
    pub fn num_addresses(&self) -> BigUint {
        BigUint::one() << usize::from(self.max_bits() - self.prefix)
    }

    /// True when `other` lies entirely inside this block.
    pub fn contains(&self, other: &NetworkBlock) -> bool {
        self.family() == other.family()
            && other.prefix >= self.prefix
            && cut_addr(other.addr, self.prefix) == self.addr
    }
}

impl FromStr for NetworkBlock {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkBlock::parse(s)
    }
}

impl fmt::Display for NetworkBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl Serialize for NetworkBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkBlock {
    fn deserialize<D>(deserializer: D) -> Result<NetworkBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NetworkBlock::parse(&s).map_err(de::Error::custom)
    }
}
