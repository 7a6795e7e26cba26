#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let (check_in, check_out) = text.split_once('\n').unwrap_or((text, ""));
        if let Ok(stay) = tourism_booking::domain::booking::StayRange::parse(check_in, check_out) {
            assert!(stay.check_in() < stay.check_out());
            assert!(stay.nights() > 0);
        }
    }
});
