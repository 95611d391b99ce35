//! Serialization of the response head.
//!
//! The head is the status line followed by one line per header entry and a
//! terminating blank line:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 5\r\n
//! Content-Type: text/plain; charset=utf-8\r\n
//! \r\n
//! ```
//!
//! Header lines are emitted in map iteration order; duplicate names become
//! separate lines. The encoder writes into a [`BytesMut`] staging buffer so
//! the whole head reaches the sink in a single write.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};

use crate::protocol::{FieldMap, SendError, Status, Version};

/// Initial buffer size reserved for head serialization
const INIT_HEAD_SIZE: usize = 4 * 1024;

/// Encoder for the response status line and header block.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl HeaderEncoder {
    /// Encodes the head into `dst`.
    pub fn encode(&self, version: Version, status: Status, fields: &FieldMap, dst: &mut BytesMut) -> Result<(), SendError> {
        dst.reserve(INIT_HEAD_SIZE);

        write!(FastWrite(dst), "{} {} {}\r\n", version.as_str(), status.code(), status.reason())?;

        for (name, value) in fields.iter() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
///
/// This is an optimization to avoid unnecessary bounds checking when writing
/// to the bytes buffer, since we've already reserved enough space.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
