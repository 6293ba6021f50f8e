#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks a capacity so both overflow and short output get hit
    let Some((&cap, src)) = data.split_first() else {
        return;
    };
    let mut dst = vec![0u8; usize::from(cap) * 128];
    if let Ok(written) = zenretro::unpack_bits(src, &mut dst) {
        assert!(written <= dst.len());
    }
});
