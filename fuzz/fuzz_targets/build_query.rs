#![no_main]
use lenient_uri::{Query, Uri};
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};

#[derive(Arbitrary, Debug)]
struct Pairs {
    pairs: Vec<(String, String)>,
    is_encoded: bool,
}

fuzz_target!(|p: Pairs| {
    let mut u = Uri::new();
    for (k, v) in &p.pairs {
        u = u.with_query_key_value(k, v, p.is_encoded);
    }

    let q = Query::parse(&u.query());
    for (k, v) in u.query_map() {
        if !k.is_empty() {
            assert_eq!(q.get(k), Some(v));
        }
    }
});
