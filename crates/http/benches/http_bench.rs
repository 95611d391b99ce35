use bytes::{Bytes, BytesMut};
use criterion::{Criterion, criterion_group, criterion_main};

use nano_http::codec::{BodyReader, HeaderEncoder};
use nano_http::protocol::body::Chunks;
use nano_http::protocol::{FieldMap, Method, Request, Status, Version};

fn bench_encode_head(c: &mut Criterion) {
    let mut fields = FieldMap::case_insensitive();
    fields.append("Content-Type", "text/plain; charset=utf-8");
    fields.append("Content-Length", "1024");
    fields.append("Server", "nano-http");
    fields.append("Cache-Control", "no-cache");

    c.bench_function("encode_head", |b| {
        b.iter(|| {
            let mut dst = BytesMut::with_capacity(4 * 1024);
            HeaderEncoder.encode(Version::Http11, Status::OK, &fields, &mut dst).unwrap();
            dst
        })
    });
}

fn bench_bounded_read_64k(c: &mut Criterion) {
    let reader = BodyReader::new();
    let payload = Bytes::from(vec![0x61u8; 64 * 1024]);

    c.bench_function("bounded_read_64k", |b| {
        b.iter(|| {
            let mut request = Request::new(Method::Post, "/upload", Chunks::from_iter([payload.clone()]));
            request.headers_mut().set("Content-Length", "65536");
            let mut sink = Vec::with_capacity(64 * 1024);
            reader.read(&mut request, &mut sink).unwrap()
        })
    });
}

criterion_group!(benches, bench_encode_head, bench_bounded_read_64k);
criterion_main!(benches);
