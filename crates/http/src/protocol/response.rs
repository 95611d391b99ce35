//! HTTP response message model and write discipline.
//!
//! A [`Response`] owns the status, headers, and the output sink for one
//! exchange, and enforces the flush-once contract: the status line and header
//! block are written to the sink exactly once, after which only body bytes
//! may follow.
//!
//! # State machine
//!
//! A response starts **pending** and transitions to **flushed** the first
//! time [`flush_headers`](Response::flush_headers) runs (directly or through
//! a body write). Once flushed:
//!
//! - [`flush_headers`](Response::flush_headers) becomes an idempotent no-op
//! - status and header mutation fails fast with [`SendError::AlreadySent`]
//! - body writes append to the sink without touching the head
//!
//! Sink failures are fatal and propagate unchanged.

use std::io::Write;

use bytes::{Bytes, BytesMut};
use mime::Mime;
use tracing::trace;

use crate::codec::HeaderEncoder;
use crate::ensure;
use crate::protocol::body::{BodySource, Full, PayloadItem};
use crate::protocol::error::SendError;
use crate::protocol::fields::{CONTENT_LENGTH, CONTENT_TYPE, FieldMap};
use crate::protocol::status::Status;
use crate::protocol::version::Version;

/// An HTTP response writing to a sink of type `W`.
#[derive(Debug)]
pub struct Response<W> {
    version: Version,
    status: Status,
    headers: FieldMap,
    sink: W,
    flushed: bool,
}

impl<W: Write> Response<W> {
    /// Creates a pending response with status `200 OK` and no headers.
    pub fn new(sink: W) -> Response<W> {
        Response {
            version: Version::default(),
            status: Status::OK,
            headers: FieldMap::case_insensitive(),
            sink,
            flushed: false,
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn headers(&self) -> &FieldMap {
        &self.headers
    }

    /// Whether the head has already been written to the sink.
    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Replaces the response status.
    ///
    /// Fails with [`SendError::AlreadySent`] once the head is flushed.
    pub fn set_status(&mut self, status: Status) -> Result<(), SendError> {
        self.ensure_pending()?;
        self.status = status;
        Ok(())
    }

    /// Replaces every value of the named header with a single value.
    ///
    /// Fails with [`SendError::AlreadySent`] once the head is flushed.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<(), SendError> {
        self.ensure_pending()?;
        self.headers.set(name, value);
        Ok(())
    }

    /// Adds a header value, keeping any already present.
    ///
    /// Fails with [`SendError::AlreadySent`] once the head is flushed.
    pub fn append_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<(), SendError> {
        self.ensure_pending()?;
        self.headers.append(name, value);
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), SendError> {
        ensure!(!self.flushed, SendError::AlreadySent);
        Ok(())
    }

    /// Writes the status line and header block to the sink.
    ///
    /// The head is staged in one buffer and reaches the sink as a single
    /// write. Calling this on a flushed response is a no-op.
    pub fn flush_headers(&mut self) -> Result<(), SendError> {
        if self.flushed {
            return Ok(());
        }

        let mut head = BytesMut::new();
        HeaderEncoder.encode(self.version, self.status, &self.headers, &mut head)?;
        self.sink.write_all(&head)?;
        self.flushed = true;

        trace!(bytes = head.len(), status = self.status.code(), "response head flushed");
        Ok(())
    }

    /// Streams a body of declared `size` to the sink.
    ///
    /// On a pending response this first fixes `Content-Length` to `size` and
    /// `Content-Type` to `content_type`, then flushes the head. Every chunk
    /// the source yields is written in full, in order; this layer does no
    /// clipping of response bodies.
    pub fn write_body<S: BodySource>(&mut self, source: &mut S, size: u64, content_type: &Mime) -> Result<(), SendError> {
        if !self.flushed {
            self.headers.set(CONTENT_LENGTH, size.to_string());
            self.headers.set(CONTENT_TYPE, content_type.to_string());
            self.flush_headers()?;
        }

        loop {
            match source.next_chunk()? {
                PayloadItem::Eof => break,
                PayloadItem::Chunk(chunk) => {
                    if !chunk.is_empty() {
                        self.sink.write_all(&chunk)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Writes an in-memory body in one chunk.
    ///
    /// `Content-Length` is the data length; the content type defaults to
    /// `application/octet-stream`.
    pub fn write_body_bytes(&mut self, data: impl Into<Bytes>, content_type: Option<Mime>) -> Result<(), SendError> {
        let data = data.into();
        let size = data.len() as u64;
        let content_type = content_type.unwrap_or(mime::APPLICATION_OCTET_STREAM);
        self.write_body(&mut Full::new(data), size, &content_type)
    }

    /// Writes a string body in one chunk.
    ///
    /// `Content-Length` is the byte length; the content type defaults to
    /// `text/plain; charset=utf-8`.
    pub fn write_body_str(&mut self, data: &str, content_type: Option<Mime>) -> Result<(), SendError> {
        let bytes = Bytes::copy_from_slice(data.as_bytes());
        let size = bytes.len() as u64;
        let content_type = content_type.unwrap_or(mime::TEXT_PLAIN_UTF_8);
        self.write_body(&mut Full::new(bytes), size, &content_type)
    }

    /// Shared access to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Consumes the response and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::body::Chunks;

    fn wire(response: Response<Vec<u8>>) -> String {
        String::from_utf8(response.into_inner()).unwrap()
    }

    #[test]
    fn flush_headers_is_idempotent() {
        let mut response = Response::new(Vec::new());
        response.set_header("X-Trace", "abc").unwrap();

        response.flush_headers().unwrap();
        let written = response.get_ref().len();
        response.flush_headers().unwrap();
        assert_eq!(response.get_ref().len(), written);

        assert!(response.is_flushed());
        assert_eq!(wire(response), "HTTP/1.1 200 OK\r\nX-Trace: abc\r\n\r\n");
    }

    #[test]
    fn write_body_flushes_head_with_length_and_type() {
        let mut response = Response::new(Vec::new());
        response.write_body_str("Hello", None).unwrap();

        assert_eq!(
            wire(response),
            "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nContent-Type: text/plain; charset=utf-8\r\n\r\nHello"
        );
    }

    #[test]
    fn write_body_streams_every_chunk_in_order() {
        let mut response = Response::new(Vec::new());
        let mut source = Chunks::from_iter(["Hel", "lo ", "world"]);
        response.write_body(&mut source, 11, &mime::TEXT_PLAIN_UTF_8).unwrap();

        let wire = wire(response);
        assert!(wire.contains("Content-Length: 11\r\n"));
        assert!(wire.ends_with("\r\n\r\nHello world"));
    }

    #[test]
    fn write_body_bytes_defaults_to_octet_stream() {
        let mut response = Response::new(Vec::new());
        response.write_body_bytes(&b"\x00\x01"[..], None).unwrap();

        let wire = wire(response);
        assert!(wire.contains("Content-Length: 2\r\n"));
        assert!(wire.contains("Content-Type: application/octet-stream\r\n"));
    }

    #[test]
    fn duplicate_headers_emit_separate_lines() {
        let mut response = Response::new(Vec::new());
        response.append_header("Set-Cookie", "a=1").unwrap();
        response.append_header("Set-Cookie", "b=2").unwrap();
        response.flush_headers().unwrap();

        assert!(wire(response).contains("Set-Cookie: a=1\r\nSet-Cookie: b=2\r\n"));
    }

    #[test]
    fn mutation_after_flush_fails_fast() {
        let mut response = Response::new(Vec::new());
        response.flush_headers().unwrap();

        assert!(matches!(response.set_status(Status::NOT_FOUND), Err(SendError::AlreadySent)));
        assert!(matches!(response.set_header("X-Late", "1"), Err(SendError::AlreadySent)));
        assert!(matches!(response.append_header("X-Late", "1"), Err(SendError::AlreadySent)));

        // the flushed head is unchanged
        assert_eq!(response.status(), Status::OK);
        assert!(!response.headers().contains("X-Late"));
    }

    #[test]
    fn status_line_reflects_status_and_version() {
        let mut response = Response::new(Vec::new()).with_version(Version::Http10);
        response.set_status(Status::NO_CONTENT).unwrap();
        response.flush_headers().unwrap();

        assert_eq!(wire(response), "HTTP/1.0 204 No Content\r\n\r\n");
    }

    #[test]
    fn body_write_after_flush_appends_without_touching_head() {
        let mut response = Response::new(Vec::new());
        response.flush_headers().unwrap();
        response.write_body_str("late body", None).unwrap();

        let wire = wire(response);
        // no Content-Length/Content-Type were added after the fact
        assert_eq!(wire, "HTTP/1.1 200 OK\r\n\r\nlate body");
    }
}
