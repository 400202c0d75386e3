#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(duration) = udur::Duration::parse(data) {
        assert!(duration.in_milliseconds().is_finite());
    }
});
