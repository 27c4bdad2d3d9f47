//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::cell::RefCell;

use crate::Uuid;
use inner::ThreadGen;

thread_local! {
    static THREAD_GEN: RefCell<ThreadGen> = RefCell::new(ThreadGen::default());
}

/// Generates a UUIDv7 object.
///
/// This function employs a thread-local generator, created on the first call from each thread,
/// and guarantees the per-thread monotonic order of UUIDs generated within the same millisecond.
/// UUIDs generated by different threads may share or interleave timestamps. Use a
/// [`V7Generator`](crate::V7Generator) directly to choose a different owner of the monotonic
/// state, such as an async task. On Unix, this function resets the generator when the process ID
/// changes (i.e., upon process forks) so that a child never continues the parent's sequence.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid57::uuid7();
/// println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// assert!(uuid.unix_ts_ms().is_some());
/// ```
pub fn uuid7() -> Uuid {
    THREAD_GEN.with(|g| g.borrow_mut().get_mut().generate())
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{with_rand08, V7Generator};

    /// Bytes generated between reseeds from [`OsRng`], as in [`rand::rngs::ThreadRng`].
    const RESEED_THRESHOLD: u64 = 1024 * 64;

    /// The random number generator of the thread-local generator.
    ///
    /// [`ChaCha12Core`] with [`ReseedingRng`] wrapper emulates the strategy used by
    /// [`rand::rngs::ThreadRng`].
    type ThreadGenRng = with_rand08::Adapter<ReseedingRng<ChaCha12Core, OsRng>>;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    pub struct ThreadGen {
        #[cfg(unix)]
        pid: u32,
        generator: V7Generator<ThreadGenRng>,
    }

    impl Default for ThreadGen {
        fn default() -> Self {
            let rng = ReseedingRng::new(ChaCha12Core::from_entropy(), RESEED_THRESHOLD, OsRng);
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V7Generator::new(with_rand08::Adapter(rng)),
            }
        }
    }

    impl ThreadGen {
        /// Returns a mutable reference to the inner [`V7Generator`] instance, resetting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V7Generator<ThreadGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!(
                    old_pid = self.pid,
                    new_pid = std::process::id(),
                    "process id changed; resetting thread-local UUIDv7 generator"
                );
                *self = Self::default();
            }
            &mut self.generator
        }
    }
}
