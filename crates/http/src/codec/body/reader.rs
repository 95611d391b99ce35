//! Bounded streaming consumption of request bodies.
//!
//! [`BodyReader`] copies a request's chunk source into a caller-supplied sink
//! while enforcing two independent bounds: the length the peer declared in
//! `Content-Length`, and a configurable absolute cap on how much this process
//! is willing to buffer or forward.
//!
//! Bound violations are not errors. A missing, unparsable, or zero declared
//! length reads nothing; a declared length above the cap is refused outright
//! rather than truncated. Callers inspect the returned byte count, they do
//! not catch exceptions. Only transport failures surface as errors.

use std::io::Write;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::protocol::body::{BodySource, PayloadItem};
use crate::protocol::{CONTENT_LENGTH, FieldMap, ReadError, Request};

/// Default cap on the number of body bytes a single read may transfer.
pub const DEFAULT_MAX_BODY_SIZE: u64 = 1024 * 1024 * 1024;

/// A configured policy for reading request bodies.
///
/// The policy is plain data and can be reused across requests; each
/// [`read`](BodyReader::read) call consumes one request's body source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyReader {
    enforce_content_length: bool,
    max_body_size: Option<u64>,
}

impl Default for BodyReader {
    fn default() -> Self {
        Self { enforce_content_length: true, max_body_size: Some(DEFAULT_MAX_BODY_SIZE) }
    }
}

impl BodyReader {
    /// A reader with content-length enforcement on and the default 1 GiB cap.
    pub fn new() -> BodyReader {
        Default::default()
    }

    /// Whether the read is bounded by the request's `Content-Length` header.
    ///
    /// When off, only [`max_body_size`](Self::max_body_size) limits the read.
    pub fn enforce_content_length(mut self, enforce: bool) -> Self {
        self.enforce_content_length = enforce;
        self
    }

    /// Absolute cap on transferred bytes; `None` removes the cap entirely.
    pub fn max_body_size(mut self, limit: Option<u64>) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Streams the request body into `sink` and returns the byte count
    /// actually transferred.
    ///
    /// Chunks are clipped so the cumulative count never exceeds the computed
    /// bound; bytes past the bound never reach the sink even when the source
    /// would yield more. The source is consumed at most once.
    pub fn read<S, W>(&self, request: &mut Request<S>, sink: &mut W) -> Result<u64, ReadError>
    where
        S: BodySource,
        W: Write,
    {
        let bound = if self.enforce_content_length {
            match self.declared_length(request.headers()) {
                Some(declared) => Some(declared),
                // nothing to read; by contract this is not a failure
                None => return Ok(0),
            }
        } else {
            self.max_body_size
        };

        let mut total: u64 = 0;
        loop {
            match request.body_mut().next_chunk()? {
                PayloadItem::Eof => break,
                PayloadItem::Chunk(mut chunk) => {
                    if let Some(bound) = bound {
                        let remaining = bound - total;
                        if chunk.len() as u64 > remaining {
                            chunk.truncate(remaining as usize);
                        }
                    }
                    if !chunk.is_empty() {
                        sink.write_all(&chunk)?;
                        total += chunk.len() as u64;
                    }
                    if bound.is_some_and(|bound| total >= bound) {
                        break;
                    }
                }
            }
        }
        Ok(total)
    }

    /// Resolves the effective bound from the `Content-Length` header.
    ///
    /// `None` means nothing should be read: header absent, unparsable, zero,
    /// or declaring more than the configured cap.
    fn declared_length(&self, headers: &FieldMap) -> Option<u64> {
        let raw = headers.get_first(CONTENT_LENGTH)?;

        let declared = match raw.trim().parse::<u64>() {
            Ok(declared) => declared,
            Err(_) => {
                warn!(value = raw, "ignoring unparsable content-length");
                return None;
            }
        };
        if declared == 0 {
            return None;
        }

        if let Some(max) = self.max_body_size {
            if declared > max {
                warn!(declared, max, "declared body length exceeds cap, refusing to read");
                return None;
            }
        }
        Some(declared)
    }

    /// Collects the body into an in-memory buffer.
    pub fn read_to_bytes<S: BodySource>(&self, request: &mut Request<S>) -> Result<Bytes, ReadError> {
        let mut buffer = Vec::new();
        self.read(request, &mut buffer)?;
        Ok(Bytes::from(buffer))
    }

    /// Collects the body into a string, replacing invalid UTF-8 sequences.
    ///
    /// No charset negotiation happens here.
    pub fn read_to_string<S: BodySource>(&self, request: &mut Request<S>) -> Result<String, ReadError> {
        let bytes = self.read_to_bytes(request)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Collects the body and parses it as JSON.
    ///
    /// Unlike the bound checks, a malformed document is a real error and
    /// surfaces as [`ReadError::Json`].
    pub fn read_json<T, S>(&self, request: &mut Request<S>) -> Result<T, ReadError>
    where
        T: DeserializeOwned,
        S: BodySource,
    {
        let bytes = self.read_to_bytes(request)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Collects the body and decodes it as `application/x-www-form-urlencoded`.
    ///
    /// When `strip_whitespace` is set, surrounding whitespace is trimmed from
    /// each decoded value.
    pub fn read_form<S: BodySource>(&self, request: &mut Request<S>, strip_whitespace: bool) -> Result<FieldMap, ReadError> {
        let text = self.read_to_string(request)?;
        Ok(FieldMap::from_urlencoded(&text, strip_whitespace)?)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use serde::Deserialize;

    use super::*;
    use crate::protocol::Method;
    use crate::protocol::body::{Chunks, Full};

    fn post(body: impl Into<Bytes>, content_length: Option<&str>) -> Request<Full> {
        let mut request = Request::new(Method::Post, "/upload", Full::new(body));
        if let Some(length) = content_length {
            request.headers_mut().set(CONTENT_LENGTH, length);
        }
        request
    }

    #[test]
    fn reads_exactly_the_declared_length() {
        let mut request = post("Hello", Some("5"));
        let mut sink = Vec::new();

        let count = BodyReader::new().read(&mut request, &mut sink).unwrap();

        assert_eq!(count, 5);
        assert_eq!(sink, b"Hello");
    }

    #[test]
    fn missing_content_length_reads_nothing() {
        let mut request = post("Hello", None);
        let mut sink = Vec::new();

        let count = BodyReader::new().read(&mut request, &mut sink).unwrap();

        assert_eq!(count, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn declared_length_clips_a_longer_source() {
        let mut request = post("Testing testing testing", Some("5"));
        let mut sink = Vec::new();

        let count = BodyReader::new().read(&mut request, &mut sink).unwrap();

        assert_eq!(count, 5);
        assert_eq!(sink, b"Testi");
    }

    #[test]
    fn unparsable_content_length_reads_nothing() {
        let mut request = post("Hello", Some("Not a number"));

        let count = BodyReader::new().read(&mut request, &mut Vec::new()).unwrap();

        assert_eq!(count, 0);
    }

    #[test]
    fn zero_content_length_reads_nothing() {
        let mut request = post("Hello", Some("0"));

        let count = BodyReader::new().read(&mut request, &mut Vec::new()).unwrap();

        assert_eq!(count, 0);
    }

    #[test]
    fn oversized_declared_length_is_refused_entirely() {
        let mut request = post("Hello", Some("5"));
        let mut sink = Vec::new();

        let reader = BodyReader::new().max_body_size(Some(4));
        let count = reader.read(&mut request, &mut sink).unwrap();

        // refused outright rather than truncated to 4 bytes
        assert_eq!(count, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn clipping_spans_chunk_boundaries() {
        let mut request = Request::new(Method::Post, "/upload", Chunks::from_iter(["Tes", "ting", " testing"]));
        request.headers_mut().set(CONTENT_LENGTH, "5");
        let mut sink = Vec::new();

        let count = BodyReader::new().read(&mut request, &mut sink).unwrap();

        assert_eq!(count, 5);
        assert_eq!(sink, b"Testi");
    }

    #[test]
    fn unenforced_reads_are_bounded_by_the_cap_alone() {
        let mut request = post("Testing testing", None);
        let mut sink = Vec::new();

        let reader = BodyReader::new().enforce_content_length(false).max_body_size(Some(8));
        let count = reader.read(&mut request, &mut sink).unwrap();

        assert_eq!(count, 8);
        assert_eq!(sink, b"Testing ");
    }

    #[test]
    fn unenforced_uncapped_reads_drain_the_source() {
        let mut request = post("Testing testing", None);
        let mut sink = Vec::new();

        let reader = BodyReader::new().enforce_content_length(false).max_body_size(None);
        let count = reader.read(&mut request, &mut sink).unwrap();

        assert_eq!(count, 15);
        assert_eq!(sink, b"Testing testing");
    }

    #[test]
    fn read_to_string_is_lossy() {
        let mut request = post(vec![0x68, 0xFF, 0x69], Some("3"));

        let text = BodyReader::new().read_to_string(&mut request).unwrap();

        assert_eq!(text, "h\u{FFFD}i");
    }

    #[test]
    fn read_json_parses_the_body() {
        #[derive(Debug, Deserialize)]
        struct Greeting {
            name: String,
            count: u32,
        }

        let body = indoc! {r#"
            {
                "name": "alice",
                "count": 3
            }
        "#};
        let mut request = post(body, Some(&body.len().to_string()));

        let greeting: Greeting = BodyReader::new().read_json(&mut request).unwrap();

        assert_eq!(greeting.name, "alice");
        assert_eq!(greeting.count, 3);
    }

    #[test]
    fn read_json_surfaces_parse_failures() {
        let mut request = post("not json", Some("8"));

        let result: Result<serde_json::Value, _> = BodyReader::new().read_json(&mut request);

        assert!(matches!(result, Err(ReadError::Json { .. })));
    }

    #[test]
    fn read_form_builds_a_field_map() {
        let body = "name=al+ice&tag=a&tag=b%21";
        let mut request = post(body, Some(&body.len().to_string()));

        let form = BodyReader::new().read_form(&mut request, false).unwrap();

        assert_eq!(form.get_first("name"), Some("al ice"));
        assert_eq!(form.get_all("tag"), vec!["a", "b!"]);
    }

    #[test]
    fn read_form_strips_whitespace_when_asked() {
        let body = "name=++bob++";
        let mut request = post(body, Some(&body.len().to_string()));

        let form = BodyReader::new().read_form(&mut request, true).unwrap();

        assert_eq!(form.get_first("name"), Some("bob"));
    }
}
