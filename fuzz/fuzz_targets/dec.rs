#![no_main]
use lenient_uri::pct_enc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = pct_enc::decode(data);
});
