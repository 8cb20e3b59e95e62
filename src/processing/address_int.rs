//! Conversion between fixed-width address bytes and big integers.

use crate::models::AddressFamily;
use num_bigint::BigUint;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Big-endian value of an address over its full width (4 or 16 bytes).
pub fn addr_to_biguint(addr: IpAddr) -> BigUint {
    match addr {
        IpAddr::V4(v4) => BigUint::from_bytes_be(&v4.octets()),
        IpAddr::V6(v6) => BigUint::from_bytes_be(&v6.octets()),
    }
}

/// Big-endian bytes of `value`, exactly `width` long.
///
/// Short encodings are left-padded with zeros. Long encodings keep the
/// least-significant `width` bytes.
pub(crate) fn to_fixed_width(value: &BigUint, width: usize) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    if bytes.len() < width {
        let mut padded = vec![0u8; width];
        padded[width - bytes.len()..].copy_from_slice(&bytes);
        padded
    } else {
        bytes[bytes.len() - width..].to_vec()
    }
}

/// Address of the given family whose value is `value`.
pub fn biguint_to_addr(value: &BigUint, family: AddressFamily) -> IpAddr {
    let bytes = to_fixed_width(value, family.byte_len());
    match family {
        AddressFamily::V4 => {
            let mut octets = [0u8; 4];
            octets.copy_from_slice(&bytes);
            IpAddr::V4(Ipv4Addr::from(octets))
        }
        AddressFamily::V6 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&bytes);
            IpAddr::V6(Ipv6Addr::from(octets))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    #[test]
    fn test_addr_to_biguint() {
        let v4: IpAddr = "192.168.0.64".parse().unwrap();
        assert_eq!(addr_to_biguint(v4), BigUint::from(0xC0A8_0040u32));

        let v6: IpAddr = "::1".parse().unwrap();
        assert_eq!(addr_to_biguint(v6), BigUint::one());

        let top: IpAddr = "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff".parse().unwrap();
        assert_eq!(addr_to_biguint(top), BigUint::from(u128::MAX));
    }

    #[test]
    fn test_to_fixed_width_pads_left() {
        // Zero encodes as a single byte.
        assert_eq!(to_fixed_width(&BigUint::zero(), 4), vec![0, 0, 0, 0]);
        assert_eq!(
            to_fixed_width(&BigUint::from(0x0A00u32), 4),
            vec![0, 0, 0x0A, 0]
        );
    }

    #[test]
    fn test_to_fixed_width_keeps_low_bytes() {
        let value = BigUint::from(0x01_C0A8_0000u64);
        assert_eq!(to_fixed_width(&value, 4), vec![0xC0, 0xA8, 0, 0]);
    }

    #[test]
    fn test_biguint_to_addr() {
        assert_eq!(
            biguint_to_addr(&BigUint::from(0x0A00_0000u32), AddressFamily::V4),
            "10.0.0.0".parse::<IpAddr>().unwrap()
        );
        assert_eq!(
            biguint_to_addr(&BigUint::zero(), AddressFamily::V6),
            "::".parse::<IpAddr>().unwrap()
        );
        let v6: IpAddr = "2001:db8:4000::".parse().unwrap();
        assert_eq!(biguint_to_addr(&addr_to_biguint(v6), AddressFamily::V6), v6);
    }
}
