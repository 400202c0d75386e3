#![no_main]

use libfuzzer_sys::fuzz_target;
use udur::{Duration, Style};

fuzz_target!(|millis: u32| {
    let duration = Duration::from_millis(f64::from(millis));
    for style in Style::ALL {
        let text = udur::Formatter::default().styled(&duration, style);
        let parsed = Duration::parse(&text).unwrap();
        assert_eq!(parsed, duration, "{:?} rendered as {:?}", duration, text);
    }
});
