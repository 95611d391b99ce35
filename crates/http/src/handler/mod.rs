//! Request handler abstraction.
//!
//! A handler is anything that can process one request/response pair. The
//! embedding server constructs the pair, invokes the handler exactly once,
//! and tears the pair down afterwards; the handler reads the request body
//! and drives the response writer.
//!
//! Plain functions and closures with the matching two-argument signature are
//! adapted through [`HandlerFn`] / [`make_handler`], so no bespoke trait impl
//! is needed for the common case.

use std::error::Error;

use crate::protocol::{Request, Response};

/// The capability of processing one request/response exchange.
///
/// `S` is the request body source type, `W` the response sink type.
pub trait Handler<S, W> {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    fn call(&self, request: &mut Request<S>, response: &mut Response<W>) -> Result<(), Self::Error>;
}

/// Adapter implementing [`Handler`] for a function or closure.
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<S, W, Err, F> Handler<S, W> for HandlerFn<F>
where
    F: Fn(&mut Request<S>, &mut Response<W>) -> Result<(), Err>,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    type Error = Err;

    fn call(&self, request: &mut Request<S>, response: &mut Response<W>) -> Result<(), Self::Error> {
        (self.f)(request, response)
    }
}

/// Wraps a two-argument callable into a [`Handler`].
pub fn make_handler<S, W, Err, F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut Request<S>, &mut Response<W>) -> Result<(), Err>,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    HandlerFn { f }
}
