//! Serialization and bounded-transfer concerns.
//!
//! This module owns the two directions of byte movement the crate performs:
//!
//! - Response side: [`HeaderEncoder`] serializes the status line and header
//!   block written by the flush-once discipline in
//!   [`Response`](crate::protocol::Response).
//! - Request side: [`BodyReader`] streams a request body into a caller
//!   sink under content-length and size-cap bounds.
//!
//! Raw wire *parsing* (request lines, header blocks) deliberately has no
//! home here; requests arrive from the embedding transport already parsed.

mod body;
mod header_encoder;

pub use body::{BodyReader, DEFAULT_MAX_BODY_SIZE};
pub use header_encoder::HeaderEncoder;
