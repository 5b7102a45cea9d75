#![no_main]
use lenient_uri::Uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let u = Uri::parse(data);
    assert_eq!(u.scheme(), u.scheme().to_ascii_lowercase());
    assert_ne!(u.username(), Some(""));
    assert_ne!(u.password(), Some(""));
    assert_ne!(u.host(), Some(""));
    assert_ne!(u.port(), Some(0));

    for (k, v) in u.query_map() {
        assert_eq!(u.query_part(k), Some(v));
    }

    let s = u.to_string();
    if !u.scheme().is_empty() {
        assert!(s.starts_with(u.scheme()));
    }
    let _ = Uri::parse(&s);
});
