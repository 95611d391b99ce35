use std::fmt;
use std::fmt::{Display, Formatter};

/// The HTTP protocol version carried by a message.
///
/// Only the HTTP/1.x family is representable; newer versions frame messages
/// differently and are out of scope for this crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    Http09,
    Http10,
    #[default]
    Http11,
}

impl Version {
    /// The protocol designator as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http09 => "HTTP/0.9",
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_designators() {
        assert_eq!(Version::Http10.as_str(), "HTTP/1.0");
        assert_eq!(Version::Http11.to_string(), "HTTP/1.1");
        assert_eq!(Version::default(), Version::Http11);
    }
}
