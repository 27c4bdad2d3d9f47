#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use fstr::FStr;

use crate::layout;

/// Represents a Universally Unique IDentifier.
///
/// The sixteen bytes are kept in network (big-endian) order, so the derived [`Ord`] sorts UUIDv7
/// values by their embedded timestamp and counter.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Namespace for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8u128.to_be_bytes());

    /// Namespace for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self(0x6ba7b811_9dad_11d1_80b4_00c04fd430c8u128.to_be_bytes());

    /// Namespace for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self(0x6ba7b812_9dad_11d1_80b4_00c04fd430c8u128.to_be_bytes());

    /// Namespace for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self =
        Self(0x6ba7b814_9dad_11d1_80b4_00c04fd430c8u128.to_be_bytes());

    /// Creates an object from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from UUIDv7 field values.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` exceeds 48 bits, `counter` exceeds 12 bits, or `rand_b` exceeds 62
    /// bits.
    pub const fn from_fields_v7(unix_ts_ms: u64, counter: u16, rand_b: u64) -> Self {
        if unix_ts_ms >= 1 << 48 || counter >= 1 << 12 || rand_b >= 1 << 62 {
            panic!("invalid field value");
        }

        let front = (unix_ts_ms << 16 | counter as u64).to_be_bytes();
        let back = rand_b.to_be_bytes();
        let bytes = [
            front[0], front[1], front[2], front[3], front[4], front[5], front[6], front[7],
            back[0], back[1], back[2], back[3], back[4], back[5], back[6], back[7],
        ];
        Self(layout::with_variant(layout::with_version(bytes, 7)))
    }

    /// Creates a UUIDv5 object from a SHA-1 digest, discarding the last four digest bytes.
    pub(crate) const fn from_sha1_digest(digest: &[u8; 20]) -> Self {
        let mut bytes = [0u8; 16];
        let mut i = 0;
        while i < 16 {
            bytes[i] = digest[i];
            i += 1;
        }
        Self(layout::with_variant(layout::with_version(bytes, 5)))
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    ///
    /// For convenience, this method reports [`Variant::Nil`] or [`Variant::Max`] if `self`
    /// represents the Nil or Max UUID, although the Nil and Max UUIDs are technically subsumed
    /// under the variants `0b0` and `0b111`, respectively.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => {
                if u128::from_be_bytes(self.0) == 0 {
                    Variant::Nil
                } else {
                    Variant::Var0
                }
            }
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => {
                if u128::from_be_bytes(self.0) == u128::MAX {
                    Variant::Max
                } else {
                    Variant::VarReserved
                }
            }
        }
    }

    /// Returns the version field value of the UUID or `None` if `self` does not have the variant
    /// field value of `0b10`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid57::Uuid;
    ///
    /// assert_eq!(uuid57::uuid7().version(), Some(7));
    /// assert_eq!(Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"www.example.com").version(), Some(5));
    /// assert_eq!(Uuid::NIL.version(), None);
    /// ```
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the Unix timestamp in milliseconds embedded in a UUIDv7, or `None` if the version
    /// nibble is not `7`.
    ///
    /// Only the version nibble is inspected; a UUID is not verified to have come from a UUIDv7
    /// generator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid57::Uuid;
    ///
    /// let x = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse::<Uuid>()?;
    /// assert_eq!(x.unix_ts_ms(), Some(0x017f_22e2_79b0));
    ///
    /// let y = "2ed6657d-e927-568b-95e1-2665a8aea6a2".parse::<Uuid>()?;
    /// assert_eq!(y.unix_ts_ms(), None);
    /// # Ok::<(), uuid57::ParseError>(())
    /// ```
    pub const fn unix_ts_ms(&self) -> Option<u64> {
        layout::unix_ts_ms(&self.0)
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the 8-4-4-4-12
    /// canonical hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid57::Uuid;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "01809424-3e59-7c05-9219-566f82fff672");
    /// assert_eq!(format!("{}", y), "01809424-3e59-7c05-9219-566f82fff672");
    /// # Ok::<(), uuid57::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut j = 0;
        for (i, e) in self.0.iter().enumerate() {
            buffer[j] = DIGITS[(e >> 4) as usize];
            buffer[j + 1] = DIGITS[(e & 15) as usize];
            j += 2;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                buffer[j] = b'-';
                j += 1;
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer only consists of ASCII hex digits and hyphens.
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// The reserved UUID variants and the special Nil and Max values.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// The Nil UUID (00000000-0000-0000-0000-000000000000).
    Nil,

    /// The variant field value of `0b0` (reserved for NCS backward compatibility).
    Var0,

    /// The variant field value of `0b10` used by RFC 9562 UUIDs, including v5 and v7.
    Var10,

    /// The variant field value of `0b110` (reserved for Microsoft backward compatibility).
    Var110,

    /// The reserved variant field value of `0b111`.
    VarReserved,

    /// The Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff).
    Max,
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError {}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    impl Uuid {
        /// Returns the creation time embedded in a UUIDv7, or `None` if the version nibble is not
        /// `7`.
        ///
        /// See [`Uuid::unix_ts_ms`] for the caveats of this check.
        pub fn timestamp(&self) -> Option<SystemTime> {
            self.unix_ts_ms()
                .map(|ms| UNIX_EPOCH + Duration::from_millis(ms))
        }
    }

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "2ed6657d-e927-568b-95e1-2665a8aea6a2",
                    &[
                        46, 214, 101, 125, 233, 39, 86, 139, 149, 225, 38, 101, 168, 174, 166, 162,
                    ],
                ),
                (
                    "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
                    &[
                        1, 127, 34, 226, 121, 176, 124, 195, 152, 196, 220, 12, 12, 7, 57, 143,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }
    }
}
