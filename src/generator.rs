//! UUIDv7 generator and related types.

use crate::Uuid;

pub mod with_rand08;


/// A trait that defines the minimum random number generator interface for [`V7Generator`].
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// A trait that defines the minimum system clock interface for [`V7Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that reads the system clock through [`std::time::SystemTime`].
///
/// A clock set before the Unix epoch is read as zero.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

const MAX_COUNTER: u16 = 0x0fff;

/// Represents a UUIDv7 generator that encapsulates a 12-bit counter and guarantees the monotonic
/// order of UUIDs generated within the same millisecond.
///
/// A generator is the monotonic state of one owner: the guaranteed order only holds among the
/// UUIDs produced by the same instance. Give each thread or task its own generator, or wrap one
/// in a lock when process-wide order is needed.
///
/// # Examples
///
/// ```rust
/// use uuid57::V7Generator;
///
/// let mut g = V7Generator::with_rand08(rand::rngs::OsRng);
/// let x = g.generate();
/// let y = g.generate();
/// assert!(x < y);
/// assert_eq!(x.version(), Some(7));
/// ```
///
/// # State transitions
///
/// Each call reads the clock once and advances the `(timestamp, counter)` pair exactly once:
///
/// | Condition                                 | `timestamp`   | `counter`         |
/// | ----------------------------------------- | ------------- | ----------------- |
/// | clock is ahead of `timestamp`             | clock value   | random in 0..4096 |
/// | clock is not ahead, counter below `0xfff` | unchanged     | incremented       |
/// | clock is not ahead, counter at `0xfff`    | incremented   | random in 0..4096 |
///
/// A clock that moves backward, by any amount, is treated like a clock that stands still, so the
/// generated UUIDs keep increasing; the embedded timestamp may then run ahead of real time.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V7Generator<R, T = StdSystemTime> {
    timestamp: u64,
    counter: u16,

    /// The random number generator used by the generator.
    rng: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R> V7Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl<R, T> V7Generator<R, T> {
    /// Creates a generator instance with the specified random number generator and clock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid57::generator::{with_rand08, TimeSource, V7Generator};
    ///
    /// struct FrozenClock;
    ///
    /// impl TimeSource for FrozenClock {
    ///     fn unix_ts_ms(&mut self) -> u64 {
    ///         0x0123_4567_89ab
    ///     }
    /// }
    ///
    /// let mut g = V7Generator::with_rand_and_time_sources(
    ///     with_rand08::Adapter(rand::thread_rng()),
    ///     FrozenClock,
    /// );
    /// assert!(g.generate() < g.generate());
    /// ```
    pub const fn with_rand_and_time_sources(rng: R, time_source: T) -> Self {
        Self {
            timestamp: 0,
            counter: 0,
            rng,
            time_source,
        }
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the current timestamp.
    ///
    /// See the [`V7Generator`] type documentation for the description.
    pub fn generate(&mut self) -> Uuid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_core(unix_ts_ms)
    }
}

impl<R: RandSource, T> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// See the [`V7Generator`] type documentation for the description.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer, or if a counter overflow pushes the
    /// timestamp past the 48-bit range.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Uuid {
        assert!(
            unix_ts_ms < 1 << 48,
            "`unix_ts_ms` must be a 48-bit integer"
        );

        if unix_ts_ms > self.timestamp {
            self.timestamp = unix_ts_ms;
            self.counter = self.next_counter();
            return self.assemble();
        }

        if unix_ts_ms < self.timestamp {
            tracing::trace!(
                unix_ts_ms,
                timestamp = self.timestamp,
                "clock behind generator state; reusing previous timestamp"
            );
        }

        if self.counter < MAX_COUNTER {
            self.counter += 1;
        } else {
            // increment timestamp at counter overflow
            self.timestamp += 1;
            self.counter = self.next_counter();
            tracing::trace!(
                timestamp = self.timestamp,
                "counter overflow; timestamp moved ahead of clock"
            );
        }

        self.assemble()
    }

    /// Builds a UUID from the current state and 62 fresh random bits.
    fn assemble(&mut self) -> Uuid {
        Uuid::from_fields_v7(self.timestamp, self.counter, self.rng.next_u64() >> 2)
    }

    /// Draws a fresh counter value uniformly from `0..=MAX_COUNTER`.
    fn next_counter(&mut self) -> u16 {
        (self.rng.next_u32() & MAX_COUNTER as u32) as u16
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid57::V7Generator;
///
/// V7Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for V7Generator<R, T> {}
