#![no_main]

// Harness: decode_clock – arbitrary bytes must never panic the decoder, and
// anything it accepts must re-encode to a clock that decodes identically.

use libfuzzer_sys::fuzz_target;
use vclock_core::codec::{decode, encode};

fuzz_target!(|bytes: &[u8]| {
    if let Ok(clock) = decode(bytes) {
        let re = encode(&clock).expect("decoded clock is within capacity");
        assert_eq!(decode(&re).expect("re-encoded clock decodes"), clock);
        // The encoder always picks the minimal width, so it never grows.
        assert!(re.len() <= bytes.len());
    }
});
