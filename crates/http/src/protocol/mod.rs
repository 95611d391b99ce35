//! Core HTTP message model.
//!
//! This module provides the data types a request/response exchange is built
//! from, independent of any transport:
//!
//! - **Field containers**: [`FieldMap`], the insertion-ordered multi-valued
//!   container shared by headers and query parameters, with
//!   construction-time case sensitivity ([`KeyCase`])
//!
//! - **Vocabularies**: [`Method`] (closed enum with single-bit values packing
//!   into masks), [`Status`] (closed code/reason table), [`Version`]
//!
//! - **Messages**: [`Request`] (plain data plus a lazy body source) and
//!   [`Response`] (status/headers plus a sink, enforcing the flush-once
//!   write discipline)
//!
//! - **Body streaming** ([`body`]): the [`body::BodySource`] pull trait and
//!   the provided in-memory and reader-backed sources
//!
//! - **Errors**: [`HttpError`] splitting into read-side [`ReadError`] and
//!   write-side [`SendError`]
//!
//! Absence is a value throughout this module: missing headers, parameters,
//! methods, and status codes come back as `None` or empty collections, never
//! as errors.

mod fields;
pub use fields::{CONTENT_LENGTH, CONTENT_TYPE, FieldMap, KeyCase};

mod method;
pub use method::{Method, method_mask, methods_from_mask};

mod status;
pub use status::Status;

mod version;
pub use version::Version;

mod request;
pub use request::Request;

mod response;
pub use response::Response;

mod error;
pub use error::{HttpError, ReadError, SendError};

pub mod body;
