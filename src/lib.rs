//! Name-based (UUIDv5) and time-ordered (UUIDv7) UUID generation
//!
//! ```rust
//! use uuid57::{uuid5, uuid7, Uuid};
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.unix_ts_ms()); // e.g. Some(1651986071129)
//!
//! let uuid = uuid5(&Uuid::NAMESPACE_DNS, b"www.example.com");
//! assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # UUIDv7 field and bit layout
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        counter        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                         rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 12-bit `counter` field accommodates the sequence counter that ensures the
//!   monotonic order of IDs generated within the same millisecond. The counter is
//!   incremented by one for each new ID generated within the same timestamp and is
//!   randomly initialized whenever the `unix_ts_ms` changes.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 62 `rand` bits are filled with a cryptographically strong random
//!   number.
//!
//! When the 12-bit `counter` field reaches the maximum value and can no more be
//! incremented within the same timestamp, the generator increments the
//! `unix_ts_ms`; therefore, the `unix_ts_ms` may have a larger value than that of
//! the real-time clock. The generator goes on with such larger `unix_ts_ms` values,
//! and with the previous `unix_ts_ms` when the system clock moves back, so the
//! UUIDs of one generator never decrease.
//!
//! The monotonic order is kept per generator. [`uuid7`] keeps one generator per
//! thread; construct a [`V7Generator`] to give any other unit of work its own.
//!
//! # UUIDv5
//!
//! A UUIDv5 is the SHA-1 digest of a namespace UUID followed by a name, truncated
//! to 128 bits with the version set at `0101` and the variant at `10`. The name can
//! be passed in memory ([`uuid5`]), streamed from a reader
//! ([`uuid5_from_reader`]) or from an async reader (`uuid5_async`, with the `tokio`
//! feature) without ever concatenating namespace and name in memory.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{ParseError, Uuid, Variant};

pub mod layout;

pub mod generator;
#[doc(inline)]
pub use generator::V7Generator;

pub mod v5;
#[doc(inline)]
pub use v5::{uuid5, uuid5_from_concatenated};

#[cfg(feature = "std")]
#[doc(inline)]
pub use v5::uuid5_from_reader;

#[cfg(feature = "tokio")]
#[doc(inline)]
pub use v5::uuid5_async;

mod entry;
#[cfg(feature = "global_gen")]
pub use entry::uuid7;
