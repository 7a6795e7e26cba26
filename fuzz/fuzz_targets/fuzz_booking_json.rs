#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(booking) =
            serde_json::from_str::<tourism_booking::domain::booking::Booking>(text)
        {
            assert!(booking.stay.check_in() < booking.stay.check_out());
        }
    }
});
