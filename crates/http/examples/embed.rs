//! A minimal embedding: a fake transport drives one request/response
//! exchange entirely in memory and prints the resulting wire bytes.

use nano_http::codec::BodyReader;
use nano_http::handler::{Handler, make_handler};
use nano_http::protocol::body::Chunks;
use nano_http::protocol::{HttpError, Method, Request, Response, Status};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let handler = make_handler(|request: &mut Request<Chunks>, response: &mut Response<Vec<u8>>| {
        let body = BodyReader::new().read_to_string(request)?;
        info!(url = request.url(), bytes = body.len(), "handling request");

        if body.is_empty() {
            response.set_status(Status::BAD_REQUEST)?;
            response.write_body_str("empty body\n", None)?;
        } else {
            response.write_body_str(&format!("echo: {body}\n"), None)?;
        }
        Ok::<_, HttpError>(())
    });

    // what a transport would assemble after parsing the wire
    let mut request = Request::new(Method::Post, "/echo", Chunks::from_iter(["Hello, ", "world!"]));
    request.headers_mut().set("Content-Length", "13");
    let mut response = Response::new(Vec::new());

    handler.call(&mut request, &mut response).expect("handler failed");

    println!("{}", String::from_utf8_lossy(&response.into_inner()));
}
