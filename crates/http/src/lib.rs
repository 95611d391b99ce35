//! Framework-agnostic HTTP message primitives
//!
//! This crate provides the message layer of an HTTP server without being one:
//! the request/response data model, an insertion-ordered multi-value field
//! container for headers and query parameters, a flush-once response writer,
//! and a bounded streaming reader for request bodies. It is designed to be
//! embedded inside an arbitrary server framework, which supplies the parts
//! this crate deliberately does not have — sockets, raw wire parsing,
//! connection lifecycle, and routing.
//!
//! # How it fits together
//!
//! The embedding transport parses an incoming request and builds a
//! [`protocol::Request`] with headers and query parameters populated and the
//! body left lazy behind a [`protocol::body::BodySource`]. It pairs that with
//! a [`protocol::Response`] wrapping the outgoing byte sink, then invokes a
//! [`handler::Handler`] once. The handler pulls the body through
//! [`codec::BodyReader`], which enforces the declared `Content-Length` and a
//! size cap, and produces output through the response writer, which writes
//! status line and headers exactly once before any body bytes.
//!
//! # Example
//!
//! ```
//! use nano_http::codec::BodyReader;
//! use nano_http::handler::{Handler, make_handler};
//! use nano_http::protocol::body::Full;
//! use nano_http::protocol::{HttpError, Method, Request, Response};
//!
//! let handler = make_handler(|request: &mut Request<Full>, response: &mut Response<Vec<u8>>| {
//!     let body = BodyReader::new().read_to_string(request)?;
//!     response.write_body_str(&body, None)?;
//!     Ok::<_, HttpError>(())
//! });
//!
//! // normally assembled by the embedding transport
//! let mut request = Request::new(Method::Post, "/echo", Full::new("Hello"));
//! request.headers_mut().set("Content-Length", "5");
//! let mut response = Response::new(Vec::new());
//!
//! handler.call(&mut request, &mut response).unwrap();
//!
//! let wire = String::from_utf8(response.into_inner()).unwrap();
//! assert!(wire.starts_with("HTTP/1.1 200 OK\r\n"));
//! assert!(wire.ends_with("\r\n\r\nHello"));
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: message model — field maps, method/status/version
//!   vocabularies, request/response records, body sources, error types
//! - [`codec`]: head serialization and bounded body transfer
//! - [`handler`]: the request-handler capability and closure adapter
//!
//! # Contracts worth knowing
//!
//! - Absence is a value: missing headers, parameters, and unknown
//!   method/status names come back as `None` or empty results, never errors.
//! - Body reads abort silently: a missing, malformed, or over-cap
//!   `Content-Length` reads zero bytes; callers check the count.
//! - The response head is written exactly once; mutating status or headers
//!   afterwards fails fast with
//!   [`SendError::AlreadySent`](protocol::SendError::AlreadySent).
//! - Sources and sinks are single-pass and exclusively owned for the
//!   duration of one handler call; sink/source failures are fatal and
//!   propagate unchanged.

pub mod codec;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
