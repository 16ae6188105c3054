#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Controller replies are untrusted; decoding must never panic.
    let _ = pump_remote::wire::parse_reply(data);
});
