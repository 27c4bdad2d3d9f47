//! Lazy concatenation of a namespace UUID and a name payload.

use crate::Uuid;

const PREFIX_LEN: usize = 16;

/// A forward-only byte source that yields the 16 bytes of a namespace UUID followed by every byte
/// of a name payload, without first copying the two into one buffer.
///
/// Reading is the only capability: depending on the payload type, `PrefixData` implements
/// [`std::io::Read`], [`tokio::io::AsyncRead`] (with the `tokio` feature), or offers
/// [`next_slice`](PrefixData::next_slice) for in-memory payloads. It deliberately implements
/// neither `Seek` nor `Write` and has no notion of length; code that tries to use it that way does
/// not compile.
///
/// The namespace bytes always come first. A reader with a buffer shorter than 16 bytes receives
/// them over several reads; the payload is never touched until the last namespace byte has been
/// delivered, after which every read is passed straight to the payload source.
///
/// # Examples
///
/// ```rust
/// use std::io::Read;
/// use uuid57::{v5::PrefixData, Uuid};
///
/// let mut data = PrefixData::new(&Uuid::NAMESPACE_DNS, &b"www.example.com"[..]);
/// let mut buffer = Vec::new();
/// data.read_to_end(&mut buffer)?;
/// assert_eq!(buffer[..16], Uuid::NAMESPACE_DNS.as_bytes()[..]);
/// assert_eq!(&buffer[16..], b"www.example.com");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct PrefixData<S> {
    prefix: [u8; PREFIX_LEN],
    consumed: usize,
    payload: S,
}

impl<S> PrefixData<S> {
    /// Creates a source that yields `namespace` and then `payload`.
    pub const fn new(namespace: &Uuid, payload: S) -> Self {
        Self {
            prefix: *namespace.as_bytes(),
            consumed: 0,
            payload,
        }
    }

    /// Returns a reference to the payload source.
    pub const fn get_ref(&self) -> &S {
        &self.payload
    }

    /// Unwraps this `PrefixData`, returning the payload source.
    pub fn into_inner(self) -> S {
        self.payload
    }

    /// Returns `true` once every namespace byte has been delivered.
    pub const fn is_prefix_consumed(&self) -> bool {
        self.consumed == PREFIX_LEN
    }

    /// Marks up to `max` of the remaining namespace bytes as delivered and returns them.
    fn take_prefix(&mut self, max: usize) -> &[u8] {
        let start = self.consumed;
        self.consumed = PREFIX_LEN.min(start + max);
        &self.prefix[start..self.consumed]
    }
}

impl<'a> PrefixData<&'a [u8]> {
    /// Returns the next unread run of contiguous bytes, or `None` at the end of the data.
    ///
    /// This borrows straight from the namespace array and the payload slice, so an in-memory
    /// payload is read in at most two chunks without being copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid57::{v5::PrefixData, Uuid};
    ///
    /// let mut data = PrefixData::new(&Uuid::NIL, &b"name"[..]);
    /// assert_eq!(data.next_slice(), Some(&[0u8; 16][..]));
    /// assert_eq!(data.next_slice(), Some(&b"name"[..]));
    /// assert_eq!(data.next_slice(), None);
    /// ```
    pub fn next_slice(&mut self) -> Option<&[u8]> {
        if !self.is_prefix_consumed() {
            return Some(self.take_prefix(PREFIX_LEN));
        }
        if self.payload.is_empty() {
            None
        } else {
            Some(core::mem::take(&mut self.payload))
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<S: std::io::Read> std::io::Read for PrefixData<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.is_prefix_consumed() {
            return self.payload.read(buf);
        }
        let chunk = self.take_prefix(buf.len());
        buf[..chunk.len()].copy_from_slice(chunk);
        Ok(chunk.len())
    }
}

#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
mod tokio_support {
    use super::PrefixData;
    use std::{
        io,
        pin::Pin,
        task::{Context, Poll},
    };
    use tokio::io::{AsyncRead, ReadBuf};

    impl<S: AsyncRead + Unpin> AsyncRead for PrefixData<S> {
        fn poll_read(
            self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            if this.is_prefix_consumed() {
                return Pin::new(&mut this.payload).poll_read(cx, buf);
            }
            let chunk = this.take_prefix(buf.remaining());
            buf.put_slice(chunk);
            Poll::Ready(Ok(()))
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::PrefixData;
    use crate::Uuid;
    use std::io::{self, Read};

    fn concat(namespace: &Uuid, payload: &[u8]) -> Vec<u8> {
        let mut full = namespace.as_bytes().to_vec();
        full.extend_from_slice(payload);
        full
    }

    /// Reads the whole source with a caller buffer of `chunk` bytes
    fn read_in_chunks<R: Read>(mut src: R, chunk: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut buf = vec![0u8; chunk];
        loop {
            let n = src.read(&mut buf)?;
            if n == 0 {
                return Ok(out);
            }
            out.extend_from_slice(&buf[..n]);
        }
    }

    /// Yields the same bytes as manual concatenation for any buffer size
    #[test]
    fn yields_the_same_bytes_as_manual_concatenation_for_any_buffer_size() {
        let ns: Uuid = "0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0".parse().unwrap();
        let payload: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        for chunk in [1, 3, 15, 16, 17, 64, 4096] {
            for len in [0, 1, 16, 999] {
                let got = read_in_chunks(PrefixData::new(&ns, &payload[..len]), chunk).unwrap();
                assert_eq!(got, concat(&ns, &payload[..len]), "chunk {chunk} len {len}");
            }
        }
    }

    /// Delivers the whole prefix before touching the payload
    #[test]
    fn delivers_the_whole_prefix_before_touching_the_payload() {
        /// A source that must not be read from
        struct Untouchable;

        impl Read for Untouchable {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                panic!("payload read before prefix was consumed");
            }
        }

        let mut data = PrefixData::new(&Uuid::MAX, Untouchable);
        let mut buf = [0u8; 10];
        assert_eq!(data.read(&mut buf).unwrap(), 10);
        assert!(!data.is_prefix_consumed());
        assert_eq!(data.read(&mut buf).unwrap(), 6);
        assert!(data.is_prefix_consumed());
        assert_eq!(buf[..6], [0xff; 6]);
    }

    /// Ends right after the prefix for empty payload
    #[test]
    fn ends_right_after_the_prefix_for_empty_payload() {
        let mut data = PrefixData::new(&Uuid::NAMESPACE_URL, io::empty());
        let mut buf = [0u8; 64];
        assert_eq!(data.read(&mut buf).unwrap(), 16);
        assert_eq!(buf[..16], Uuid::NAMESPACE_URL.as_bytes()[..]);
        assert_eq!(data.read(&mut buf).unwrap(), 0);
        assert_eq!(data.read(&mut buf).unwrap(), 0);
    }

    /// Passes payload errors through unchanged
    #[test]
    fn passes_payload_errors_through_unchanged() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }

        let mut data = PrefixData::new(&Uuid::NIL, Broken);
        let mut buf = [0u8; 32];
        assert_eq!(data.read(&mut buf).unwrap(), 16);
        let err = data.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    /// Borrows in-memory payload without copying
    #[test]
    fn borrows_in_memory_payload_without_copying() {
        let payload = b"www.example.com".to_vec();
        let mut data = PrefixData::new(&Uuid::NAMESPACE_DNS, &payload[..]);

        assert_eq!(
            data.next_slice(),
            Some(&Uuid::NAMESPACE_DNS.as_bytes()[..])
        );
        let rest = data.next_slice().unwrap();
        assert_eq!(rest.as_ptr(), payload.as_ptr());
        assert_eq!(rest.len(), payload.len());
        assert_eq!(data.next_slice(), None);
        assert!(data.get_ref().is_empty());

        let mut empty = PrefixData::new(&Uuid::NIL, &[][..]);
        assert_eq!(empty.next_slice(), Some(&[0u8; 16][..]));
        assert_eq!(empty.next_slice(), None);
    }

    /// Returns the payload source on unwrap
    #[test]
    fn returns_the_payload_source_on_unwrap() {
        let mut data = PrefixData::new(&Uuid::NIL, io::Cursor::new(vec![1u8, 2, 3]));
        let mut buf = [0u8; 17];
        data.read_exact(&mut buf).unwrap();
        assert_eq!(buf[16], 1);
        assert_eq!(data.into_inner().position(), 1);
    }

    /// Yields the same bytes asynchronously
    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn yields_the_same_bytes_asynchronously() {
        use tokio::io::AsyncReadExt;

        let payload: Vec<u8> = (0..5000u32).map(|i| (i * 7) as u8).collect();
        let (mut tx, rx) = tokio::io::duplex(13);
        let writer = {
            let payload = payload.clone();
            tokio::spawn(async move {
                use tokio::io::AsyncWriteExt;
                tx.write_all(&payload).await.unwrap();
            })
        };

        let mut data = PrefixData::new(&Uuid::NAMESPACE_OID, rx);
        let mut out = Vec::new();
        let mut buf = [0u8; 5];
        loop {
            let n = data.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        writer.await.unwrap();

        assert_eq!(out, concat(&Uuid::NAMESPACE_OID, &payload));
    }
}
