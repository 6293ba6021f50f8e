#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Degas low, medium and high resolution with a gradient palette
    for (mode, ext) in [(0u16, "pi1"), (1, "pi2"), (2, "pi3")] {
        let mut pi = vec![0u8; 32034];
        pi[0..2].copy_from_slice(&mode.to_be_bytes());
        for i in 0..16u16 {
            let off = 2 + usize::from(i) * 2;
            pi[off..off + 2].copy_from_slice(&(i * 0x111).to_be_bytes());
        }
        for (i, b) in pi[34..].iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }
        fs::write(format!("{dir}/degas.{ext}"), &pi).unwrap();

        // Degas Elite: same body plus the 32-byte animation block
        pi.extend_from_slice(&[0u8; 32]);
        fs::write(format!("{dir}/elite.{ext}"), pi).unwrap();
    }

    // NEOchrome with the declared 320x200 size
    let mut neo = vec![0u8; 32128];
    neo[58..60].copy_from_slice(&320u16.to_be_bytes());
    neo[60..62].copy_from_slice(&200u16.to_be_bytes());
    neo[128..].fill(0x5A);
    fs::write(format!("{dir}/picture.neo"), neo).unwrap();

    // ZX Spectrum checkerboard, bright ink 2 on paper 5, flashing
    let mut scr = vec![0xAAu8; 6144];
    scr.extend(std::iter::repeat_n(0b1110_1010, 768));
    fs::write(format!("{dir}/screen.scr"), scr).unwrap();

    // Near misses for the length and sentinel checks
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/scr_short.bin"), vec![0u8; 6911]).unwrap();
    let mut bad_mode = vec![0u8; 32034];
    bad_mode[1] = 3;
    fs::write(format!("{dir}/degas_mode3.bin"), bad_mode).unwrap();
    let mut neo_flag = vec![0u8; 32128];
    neo_flag[1] = 1;
    fs::write(format!("{dir}/neo_flag.bin"), neo_flag).unwrap();

    let dir = "fuzz/corpus/fuzz_packbits";
    fs::create_dir_all(dir).unwrap();
    fs::write(format!("{dir}/mixed.bin"), [2, 0x02, b'A', b'B', b'C', 0xFE, b'X']).unwrap();
    fs::write(format!("{dir}/truncated.bin"), [1, 0x05, 1, 2]).unwrap();
    fs::write(format!("{dir}/overflow.bin"), [0, 0x80, 0]).unwrap();

    println!("Generated seed corpora in fuzz/corpus/");
}
