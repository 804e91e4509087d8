//! Request/response codec benchmarks
//!
//! Run with: cargo bench --bench codec

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use httpxfer::http::parser::{find_head_end, parse_request_head};
use httpxfer::http::{HttpRequest, HttpResponse};
use httpxfer::url::ParsedUrl;

const REQUEST: &[u8] =
    b"GET /assets/site.css HTTP/1.1\r\nHost: localhost\r\nUser-Agent: bench\r\nAccept: */*\r\nConnection: close\r\n\r\n";

fn bench_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("request");
    group.throughput(Throughput::Bytes(REQUEST.len() as u64));

    group.bench_function("find_head_end", |b| {
        b.iter(|| black_box(find_head_end(black_box(REQUEST))));
    });

    group.bench_function("parse_head", |b| {
        b.iter(|| black_box(parse_request_head(black_box(REQUEST)).unwrap()));
    });

    group.bench_function("encode_get", |b| {
        b.iter(|| black_box(HttpRequest::get(black_box("localhost"), black_box("/index.html")).to_wire()));
    });

    group.finish();
}

fn bench_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_parse");

    for size in [0usize, 1024, 64 * 1024, 1024 * 1024] {
        let body = Bytes::from(vec![b'x'; size]);
        let response = HttpResponse::file(body, "Mon, 03 Jan 22 10:00:00 CET");
        let mut wire = response.head_to_wire();
        wire.extend_from_slice(response.body());
        let wire = Bytes::from(wire);

        group.throughput(Throughput::Bytes(wire.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &wire, |b, wire| {
            b.iter(|| black_box(HttpResponse::parse(wire.clone()).unwrap()));
        });
    }

    group.finish();
}

fn bench_url(c: &mut Criterion) {
    c.bench_function("url_parse", |b| {
        b.iter(|| black_box(ParsedUrl::parse(black_box("http://www.example.com/docs/guide/index.html")).unwrap()));
    });
}

criterion_group!(benches, bench_request, bench_response, bench_url);
criterion_main!(benches);
