//! UUIDv5 (name-based, SHA-1) generation.
//!
//! A UUIDv5 is the first 16 bytes of the SHA-1 digest of a namespace UUID immediately followed by
//! a name, with the version and variant fields overwritten. The functions in this module differ
//! only in how the name is supplied; for the same namespace and name bytes they all return the
//! same UUID.
//!
//! | Function                      | Name supplied as                       |
//! | ----------------------------- | -------------------------------------- |
//! | [`uuid5`]                     | `&[u8]`                                |
//! | [`uuid5_from_reader`]         | [`std::io::Read`]                      |
//! | [`uuid5_async`]               | [`tokio::io::AsyncRead`]               |
//! | [`uuid5_from_concatenated`]   | `&[u8]` already prefixed by namespace  |

use sha1::{Digest, Sha1};

use crate::Uuid;

mod prefix;
pub use prefix::PrefixData;

/// Generates a UUIDv5 object from a namespace and a name held in memory.
///
/// # Examples
///
/// ```rust
/// use uuid57::{uuid5, Uuid};
///
/// let uuid = uuid5(&Uuid::NAMESPACE_DNS, b"www.example.com");
/// assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
/// ```
pub fn uuid5(namespace: &Uuid, name: &[u8]) -> Uuid {
    let mut data = PrefixData::new(namespace, name);
    let mut hasher = Sha1::new();
    while let Some(chunk) = data.next_slice() {
        hasher.update(chunk);
    }
    finish(hasher)
}

/// Generates a UUIDv5 object from a buffer that already holds the 16 namespace bytes followed by
/// the name.
///
/// The buffer is hashed as is; nothing checks that it is at least 16 bytes long.
///
/// # Examples
///
/// ```rust
/// use uuid57::{uuid5, uuid5_from_concatenated, Uuid};
///
/// let mut full = Uuid::NAMESPACE_URL.as_bytes().to_vec();
/// full.extend_from_slice(b"https://example.com/");
/// assert_eq!(
///     uuid5_from_concatenated(&full),
///     uuid5(&Uuid::NAMESPACE_URL, b"https://example.com/")
/// );
/// ```
pub fn uuid5_from_concatenated(data: &[u8]) -> Uuid {
    let digest: [u8; 20] = Sha1::digest(data).into();
    Uuid::from_sha1_digest(&digest)
}

/// Generates a UUIDv5 object from a namespace and a name read to the end from `name`.
///
/// The name is streamed through the digest, so it is never held in memory as a whole.
///
/// # Errors
///
/// Returns any error other than [`std::io::ErrorKind::Interrupted`] that `name` reports.
///
/// # Examples
///
/// ```rust
/// use std::io::Read;
/// use uuid57::{uuid5, uuid5_from_reader, Uuid};
///
/// let name = std::io::repeat(b'a').take(1_000);
/// assert_eq!(
///     uuid5_from_reader(&Uuid::NAMESPACE_OID, name)?,
///     uuid5(&Uuid::NAMESPACE_OID, &[b'a'; 1_000])
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn uuid5_from_reader<R: std::io::Read>(namespace: &Uuid, name: R) -> std::io::Result<Uuid> {
    let mut hasher = Sha1::new();
    std::io::copy(&mut PrefixData::new(namespace, name), &mut hasher)?;
    Ok(finish(hasher))
}

fn finish(hasher: Sha1) -> Uuid {
    let digest: [u8; 20] = hasher.finalize().into();
    Uuid::from_sha1_digest(&digest)
}

impl Uuid {
    /// Creates a UUIDv5 object from a namespace and a name.
    ///
    /// This is an alias of [`uuid5`] that mirrors the constructor of the `uuid` crate.
    pub fn new_v5(namespace: &Uuid, name: &[u8]) -> Self {
        uuid5(namespace, name)
    }
}

#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub use async_gen::{uuid5_async, Error};

#[cfg(feature = "tokio")]
mod async_gen {
    use std::io;

    use sha1::{Digest, Sha1};
    use tokio::io::{AsyncRead, AsyncReadExt};
    use tokio_util::sync::CancellationToken;

    use super::{finish, PrefixData};
    use crate::Uuid;

    const BUFFER_SIZE: usize = 8 * 1024;

    /// Error returned by [`uuid5_async`].
    #[derive(Debug, thiserror::Error)]
    #[non_exhaustive]
    pub enum Error {
        /// The name source failed.
        #[error("could not read name: {0}")]
        Io(#[from] io::Error),

        /// The cancellation token fired before the whole name was hashed.
        #[error("name-based UUID generation was cancelled")]
        Cancelled,
    }

    /// Generates a UUIDv5 object from a namespace and a name read to the end from an
    /// asynchronous source.
    ///
    /// The returned future suspends only while waiting on `name`. It checks `token` before every
    /// read and stops as soon as the token is cancelled; the partially fed digest is then
    /// discarded. Dropping the future has the same effect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if `token` is cancelled first, or [`Error::Io`] if `name`
    /// fails with an error other than [`io::ErrorKind::Interrupted`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tokio_util::sync::CancellationToken;
    /// use uuid57::{uuid5, uuid5_async, Uuid};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), uuid57::v5::Error> {
    /// let token = CancellationToken::new();
    /// let name: &[u8] = b"www.example.com";
    /// let uuid = uuid5_async(&Uuid::NAMESPACE_DNS, name, &token).await?;
    /// assert_eq!(uuid, uuid5(&Uuid::NAMESPACE_DNS, name));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn uuid5_async<R: AsyncRead + Unpin>(
        namespace: &Uuid,
        name: R,
        token: &CancellationToken,
    ) -> Result<Uuid, Error> {
        let mut data = PrefixData::new(namespace, name);
        let mut hasher = Sha1::new();
        let mut buffer = vec![0u8; BUFFER_SIZE];
        loop {
            let read = tokio::select! {
                biased;
                () = token.cancelled() => {
                    tracing::debug!("cancelled while hashing name for UUIDv5");
                    return Err(Error::Cancelled);
                }
                read = data.read(&mut buffer) => read,
            };
            match read {
                Ok(0) => break,
                Ok(n) => hasher.update(&buffer[..n]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(finish(hasher))
    }
}
