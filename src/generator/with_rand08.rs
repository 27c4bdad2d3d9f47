//! Integration with `rand` (v0.8) crate.

use super::{RandSource, V7Generator};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
///
/// The random bits end up in the published UUIDs, so a cryptographically secure generator such
/// as [`rand::rngs::OsRng`] or [`rand::rngs::ThreadRng`] is expected here.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

impl<T: RngCore> V7Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid57::V7Generator;
    ///
    /// let mut g = V7Generator::with_rand08(rand::thread_rng());
    /// println!("{}", g.generate());
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
