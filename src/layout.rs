//! Version, variant and timestamp fields of the 16-byte RFC 9562 layout.
//!
//! All functions take and return the byte array by value so that they are usable in `const`
//! contexts and never touch anything but the bits they are documented to touch.

/// Returns `bytes` with the high nibble of byte 6 replaced by `version`.
///
/// Only the low four bits of `version` are used; the low nibble of byte 6 is preserved.
pub const fn with_version(mut bytes: [u8; 16], version: u8) -> [u8; 16] {
    bytes[6] = (bytes[6] & 0x0f) | (version << 4);
    bytes
}

/// Returns `bytes` with the top two bits of byte 8 set to `10`, preserving the other six.
pub const fn with_variant(mut bytes: [u8; 16]) -> [u8; 16] {
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    bytes
}

/// Reads the 48-bit `unix_ts_ms` field if the version nibble at byte 6 is `7`.
///
/// This is a structural check only: any identifier that carries the version 7 nibble is reported
/// as having a timestamp, whoever produced it.
pub const fn unix_ts_ms(bytes: &[u8; 16]) -> Option<u64> {
    let front = u64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ]);
    if front & 0xf000 == 0x7000 {
        Some(front >> 16)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{unix_ts_ms, with_variant, with_version};

    /// Replaces version nibble without touching neighboring bits
    #[test]
    fn replaces_version_nibble_without_touching_neighboring_bits() {
        for version in [0u8, 4, 5, 7, 15] {
            for seed in [0x00u8, 0x5a, 0xa5, 0xff] {
                let bytes = with_version([seed; 16], version);
                assert_eq!(bytes[6] >> 4, version);
                assert_eq!(bytes[6] & 0x0f, seed & 0x0f);
                for (i, e) in bytes.iter().enumerate() {
                    if i != 6 {
                        assert_eq!(*e, seed);
                    }
                }
            }
        }
    }

    /// Forces variant bits to 10 and keeps the rest
    #[test]
    fn forces_variant_bits_to_10_and_keeps_the_rest() {
        for b8 in 0..=255u8 {
            let mut src = [0x33u8; 16];
            src[8] = b8;
            let bytes = with_variant(src);
            assert_eq!(bytes[8] >> 6, 0b10);
            assert_eq!(bytes[8] & 0x3f, b8 & 0x3f);
            assert_eq!(bytes[..8], src[..8]);
            assert_eq!(bytes[9..], src[9..]);
        }
    }

    /// Extracts timestamp only from version 7 layout
    #[test]
    fn extracts_timestamp_only_from_version_7_layout() {
        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&0x0123_4567_89abu64.to_be_bytes()[2..]);

        assert_eq!(unix_ts_ms(&with_version(bytes, 7)), Some(0x0123_4567_89ab));
        for version in [0u8, 1, 4, 5, 6, 8, 15] {
            assert_eq!(unix_ts_ms(&with_version(bytes, version)), None);
        }

        assert_eq!(unix_ts_ms(&with_version([0xff; 16], 7)), Some((1 << 48) - 1));
        assert_eq!(unix_ts_ms(&with_version([0x00; 16], 7)), Some(0));
    }
}
