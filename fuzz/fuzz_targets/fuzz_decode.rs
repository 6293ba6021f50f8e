#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Auto-detect decode must never panic
    let format = zenretro::detect(data);
    let native = zenretro::decode(data, enough::Unstoppable);
    assert_eq!(native.is_ok(), format.is_recognized());

    if let Ok(indexed) = zenretro::decode_indexed(data, enough::Unstoppable) {
        assert_eq!(
            indexed.pixels().len(),
            indexed.width as usize * indexed.height as usize
        );
        assert!(indexed.pixels().iter().all(|&p| u16::from(p) < indexed.colors));
    }

    // Format-specific entry points must never panic either
    let _ = zenretro::decode_degas(data, enough::Unstoppable);
    let _ = zenretro::decode_neochrome(data, enough::Unstoppable);
    let _ = zenretro::decode_zx_screen(data, enough::Unstoppable);
});
