#![no_main]
use libfuzzer_sys::fuzz_target;

use fpack_core::{Header, HEADER_SIZE};

fuzz_target!(|data: &[u8]| {
    match Header::from_bytes(data) {
        Ok(header) => {
            assert!(data.len() >= HEADER_SIZE);
            assert!(header.size().is_ok());
            assert_eq!(header.as_bytes(), &data[..HEADER_SIZE]);
        }
        Err(_) => (),
    }
});
