use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lenient_uri::{pct_enc, Query, Uri};
use url::Url;

criterion_group!(
    benches,
    bench_parse,
    bench_parse_credentials,
    bench_parse_url,
    bench_to_string,
    bench_with,
    bench_query_parse,
    bench_query_to_string,
    bench_decode,
);
criterion_main!(benches);

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
const CREDENTIALS_CASE: &str =
    "mysql://ro@11!%&*(ot:pass@(*&!$$word@host-10.com:3306/database?extraparam=10";
const QUERY_CASE: &str = "ca=%2Fpath%2Fto%2Fca&ssl=%2Fpath%2Fto%2Fssl&timeout=10&name=ferret";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| Uri::parse(black_box(PARSE_CASE))));
}

fn bench_parse_credentials(c: &mut Criterion) {
    c.bench_function("parse_credentials", |b| {
        b.iter(|| Uri::parse(black_box(CREDENTIALS_CASE)))
    });
}

fn bench_parse_url(c: &mut Criterion) {
    c.bench_function("parse_url", |b| {
        b.iter(|| Url::parse(black_box(PARSE_CASE)))
    });
}

fn bench_to_string(c: &mut Criterion) {
    let uri = Uri::parse(CREDENTIALS_CASE);
    c.bench_function("to_string", |b| b.iter(|| black_box(&uri).to_string()));
}

fn bench_with(c: &mut Criterion) {
    c.bench_function("with", |b| {
        b.iter(|| {
            Uri::new()
                .with_scheme("foo")
                .with_user_info("user", Some("p@ss"))
                .with_host("example.com")
                .with_port(8042)
                .with_path("/over/there")
                .with_query_key_value("name", "ferret", false)
                .with_fragment("nose")
        })
    });
}

fn bench_query_parse(c: &mut Criterion) {
    c.bench_function("query_parse", |b| {
        b.iter(|| Query::parse(black_box(QUERY_CASE)))
    });
}

fn bench_query_to_string(c: &mut Criterion) {
    let query = Query::parse(QUERY_CASE);
    c.bench_function("query_to_string", |b| {
        b.iter(|| black_box(&query).to_string())
    });
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode", |b| {
        b.iter(|| pct_enc::decode(black_box("%E6%B5%8B%E8%AF%95%20%ZZ")))
    });
}
