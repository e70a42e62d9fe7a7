//! Benchmarks for the response cache hot paths.
//!
//! This benchmark measures:
//! - Signature generation cost over small and wide parameter maps
//! - Cache lookup latency for hits and misses
//! - Cache store latency on the overwrite path

use std::collections::HashMap;
use std::time::Duration;

use carrier_http::cache::{DEFAULT_CACHE_TTL, MemoryStore, ResponseCache, SignatureGenerator};
use carrier_http::Response;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;

fn params(n: usize) -> HashMap<String, String> {
    (0..n)
        .map(|i| (format!("param{i}"), format!("value{i}")))
        .collect()
}

fn sample_response() -> Response {
    Response::new(
        r#"[{"key":"value"},{"key":"value"}]"#.as_bytes().to_vec(),
        "application/json",
        "UTF-8",
        200,
        "OK",
    )
}

fn bench_signature_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature_generation");
    let generator = SignatureGenerator::new();
    let headers = params(2);

    let small = params(3);
    group.bench_function("three_params", |b| {
        b.iter(|| {
            generator.generate(
                black_box("get"),
                black_box("http://my.site/api"),
                black_box(&small),
                black_box(&headers),
                Some("username:password"),
            )
        })
    });

    let wide = params(20);
    group.bench_function("twenty_params", |b| {
        b.iter(|| {
            generator.generate(
                black_box("get"),
                black_box("http://my.site/api"),
                black_box(&wide),
                black_box(&headers),
                Some("username:password"),
            )
        })
    });

    group.finish();
}

fn bench_cache_lookup(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("cache_lookup");

    let cache = rt.block_on(ResponseCache::new(Box::new(MemoryStore::new())));
    let data = params(3);
    let headers = params(2);
    rt.block_on(cache.store_response(
        &sample_response(),
        "get",
        "http://my.site/api",
        &data,
        &headers,
        None,
        DEFAULT_CACHE_TTL,
    ));

    group.bench_function("hit", |b| {
        b.to_async(&rt).iter(|| async {
            let found = cache
                .find_response("get", "http://my.site/api", &data, &headers, None)
                .await;
            black_box(found)
        })
    });

    group.bench_function("miss", |b| {
        b.to_async(&rt).iter(|| async {
            let found = cache
                .find_response("get", "http://my.site/other", &data, &headers, None)
                .await;
            black_box(found)
        })
    });

    group.finish();
}

fn bench_cache_store(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("cache_store");

    let cache = rt.block_on(ResponseCache::new(Box::new(MemoryStore::new())));
    let data = params(3);
    let headers = params(2);
    let response = sample_response();

    // Same signature every iteration, so this measures the overwrite path
    // rather than unbounded index growth.
    group.bench_function("overwrite", |b| {
        b.to_async(&rt).iter(|| async {
            cache
                .store_response(
                    &response,
                    "get",
                    "http://my.site/api",
                    &data,
                    &headers,
                    None,
                    Duration::from_secs(600),
                )
                .await
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_signature_generation,
    bench_cache_lookup,
    bench_cache_store,
);
criterion_main!(benches);
