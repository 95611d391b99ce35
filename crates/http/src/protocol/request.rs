//! HTTP request message model.
//!
//! A [`Request`] is plain data assembled by the embedding framework: the
//! request line fields, already-parsed header and query maps, the peer
//! address, and a lazy body source. The core never parses raw bytes into a
//! request; it only consumes what the transport hands over.
//!
//! A request is owned by the caller for the duration of one handler
//! invocation and not retained afterwards.

use std::net::SocketAddr;

use crate::protocol::fields::FieldMap;
use crate::protocol::method::Method;
use crate::protocol::version::Version;

/// An HTTP request with a lazy body of type `S`.
#[derive(Debug)]
pub struct Request<S> {
    method: Method,
    url: String,
    version: Version,
    headers: FieldMap,
    query: FieldMap,
    remote_addr: Option<SocketAddr>,
    body: S,
}

impl<S> Request<S> {
    /// Creates a request with empty header/query maps and a default version.
    ///
    /// Headers compare names case-insensitively, query parameters
    /// case-sensitively.
    pub fn new(method: Method, url: impl Into<String>, body: S) -> Request<S> {
        Request {
            method,
            url: url.into(),
            version: Version::default(),
            headers: FieldMap::case_insensitive(),
            query: FieldMap::case_sensitive(),
            remote_addr: None,
            body,
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn with_headers(mut self, headers: FieldMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_query(mut self, query: FieldMap) -> Self {
        self.query = query;
        self
    }

    pub fn with_remote_addr(mut self, remote_addr: SocketAddr) -> Self {
        self.remote_addr = Some(remote_addr);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &FieldMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut FieldMap {
        &mut self.headers
    }

    pub fn query(&self) -> &FieldMap {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut FieldMap {
        &mut self.query
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    /// Exclusive access to the body source; reading it consumes the body.
    pub fn body_mut(&mut self) -> &mut S {
        &mut self.body
    }

    /// Consumes the request and returns its body source.
    pub fn into_body(self) -> S {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::body::Empty;

    #[test]
    fn defaults_and_builders() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let mut request = Request::new(Method::Get, "/index.html", Empty)
            .with_version(Version::Http10)
            .with_remote_addr(addr);
        request.headers_mut().append("Host", "example.test");
        request.query_mut().append("page", "2");

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url(), "/index.html");
        assert_eq!(request.version(), Version::Http10);
        assert_eq!(request.remote_addr(), Some(addr));

        // header names are case-insensitive, query names are not
        assert_eq!(request.headers().get_first("host"), Some("example.test"));
        assert_eq!(request.query().get_first("Page"), None);
        assert_eq!(request.query().get_first("page"), Some("2"));
    }
}
