//! Lazy byte-chunk sources for request and response bodies.
//!
//! A body is never materialized by this crate on its own; it is pulled on
//! demand from a [`BodySource`], a single-pass, finite sequence of
//! [`PayloadItem`] values supplied by the embedding transport. The source may
//! block the calling thread on I/O; failures are transport-defined and fatal.
//!
//! # Provided sources
//!
//! - [`Full`]: a single in-memory chunk, then EOF
//! - [`Empty`]: immediately EOF
//! - [`Chunks`]: a queue of chunks, drained in order
//! - [`ReaderSource`]: fixed-size chunks pulled from a blocking [`io::Read`]

use std::collections::VecDeque;
use std::io;
use std::io::Read;

use bytes::Bytes;

/// Default chunk size used when pulling from a blocking reader.
const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Represents an item in a body chunk stream.
///
/// A source produces data chunks until it signals the end of the stream with
/// [`PayloadItem::Eof`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    /// A chunk of payload data
    Chunk(Bytes),
    /// Marks the end of the payload stream
    Eof,
}

impl PayloadItem {
    /// Returns true if this item contains chunk data
    #[inline]
    pub fn is_chunk(&self) -> bool {
        matches!(self, PayloadItem::Chunk(_))
    }

    /// Returns true if this item represents the end of the stream
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    /// Consumes the item and returns the contained bytes if this is a Chunk
    ///
    /// Returns None for the EOF marker
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}

/// A single-pass, finite, possibly-empty sequence of byte chunks.
///
/// Implementations are pull-based and may block on I/O. Once
/// [`PayloadItem::Eof`] has been returned the source is exhausted; callers
/// never pull a source twice.
pub trait BodySource {
    /// Pulls the next item from the source.
    ///
    /// Errors are transport failures and are not recoverable at this layer.
    fn next_chunk(&mut self) -> io::Result<PayloadItem>;
}

impl<S: BodySource + ?Sized> BodySource for &mut S {
    fn next_chunk(&mut self) -> io::Result<PayloadItem> {
        (**self).next_chunk()
    }
}

/// A body made of one in-memory chunk.
#[derive(Debug, Clone)]
pub struct Full {
    data: Option<Bytes>,
}

impl Full {
    pub fn new(data: impl Into<Bytes>) -> Full {
        Full { data: Some(data.into()) }
    }
}

impl BodySource for Full {
    fn next_chunk(&mut self) -> io::Result<PayloadItem> {
        Ok(match self.data.take() {
            Some(bytes) => PayloadItem::Chunk(bytes),
            None => PayloadItem::Eof,
        })
    }
}

/// A body with no data at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl BodySource for Empty {
    fn next_chunk(&mut self) -> io::Result<PayloadItem> {
        Ok(PayloadItem::Eof)
    }
}

/// A body drained from a queue of chunks, in order.
#[derive(Debug, Clone, Default)]
pub struct Chunks {
    chunks: VecDeque<Bytes>,
}

impl Chunks {
    pub fn new() -> Chunks {
        Chunks { chunks: VecDeque::new() }
    }

    /// Queues another chunk behind any already present.
    pub fn push(&mut self, chunk: impl Into<Bytes>) {
        self.chunks.push_back(chunk.into());
    }
}

impl<B: Into<Bytes>> FromIterator<B> for Chunks {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Chunks { chunks: iter.into_iter().map(Into::into).collect() }
    }
}

impl BodySource for Chunks {
    fn next_chunk(&mut self) -> io::Result<PayloadItem> {
        Ok(match self.chunks.pop_front() {
            Some(bytes) => PayloadItem::Chunk(bytes),
            None => PayloadItem::Eof,
        })
    }
}

/// Adapts a blocking [`io::Read`] into a chunk source.
///
/// Each pull reads at most `chunk_size` bytes; a zero-length read is EOF.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    chunk_size: usize,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> ReaderSource<R> {
        ReaderSource { reader, chunk_size: DEFAULT_CHUNK_SIZE }
    }

    pub fn with_chunk_size(reader: R, chunk_size: usize) -> ReaderSource<R> {
        ReaderSource { reader, chunk_size }
    }
}

impl<R: Read> BodySource for ReaderSource<R> {
    fn next_chunk(&mut self) -> io::Result<PayloadItem> {
        let mut buffer = vec![0u8; self.chunk_size];
        let n = self.reader.read(&mut buffer)?;
        if n == 0 {
            return Ok(PayloadItem::Eof);
        }
        buffer.truncate(n);
        Ok(PayloadItem::Chunk(Bytes::from(buffer)))
    }
}
