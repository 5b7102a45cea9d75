#![no_main]
use lenient_uri::pct_enc::{self, table::UNRESERVED};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let encoded = pct_enc::encode(data, UNRESERVED);
    assert!(encoded.bytes().all(|x| x == b'%' || UNRESERVED.allows_ascii(x)));
    assert_eq!(pct_enc::decode(&encoded), data);
});
