//! Bounded request-body transfer.
//!
//! # Components
//!
//! - [`BodyReader`]: streams a request's chunk source into a caller sink,
//!   enforcing the declared `Content-Length` and an absolute size cap
//! - Convenience collectors on top of it: bytes, lossy string, JSON,
//!   form-urlencoded
//!
//! Bound violations read zero bytes rather than failing; only transport
//! errors propagate.

mod reader;

pub use reader::{BodyReader, DEFAULT_MAX_BODY_SIZE};
