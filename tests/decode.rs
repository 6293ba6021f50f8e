//! Decoding: ZX Spectrum screens, Atari bitplane bodies, cancellation, limits.

use enough::{StopReason, Unstoppable};
use zenretro::*;

/// Stop token that has already fired.
struct Cancelled;

impl Stop for Cancelled {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

fn degas(resolution: u16) -> Vec<u8> {
    let mut data = vec![0u8; 32034];
    data[0..2].copy_from_slice(&resolution.to_be_bytes());
    data[2..4].copy_from_slice(&0x0777u16.to_be_bytes());
    data
}

fn neochrome() -> Vec<u8> {
    let mut data = vec![0u8; 32128];
    data[4..6].copy_from_slice(&0x0700u16.to_be_bytes());
    data
}

/// Screen with every attribute set to `attr` and an empty bitmap.
fn zx_screen(attr: u8) -> Vec<u8> {
    let mut data = vec![0u8; zx::SCREEN_LEN];
    data[zx::BITMAP_LEN..].fill(attr);
    data
}

fn noise(len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in out.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    out
}

// ── ZX Spectrum ──────────────────────────────────────────────────────

#[test]
fn zx_bright_attribute_ink_and_paper() {
    // bright, ink 3, paper 0
    let mut screen = zx_screen(0b0100_0011);
    screen[0] = 0xFF;
    let pixels = zx::decode_screen(&screen).unwrap();
    assert_eq!(pixels.len(), 49152);
    assert_eq!(&pixels[0..8], &[11; 8]);
    assert_eq!(&pixels[8..16], &[8; 8]);
}

#[test]
fn zx_msb_is_leftmost() {
    // ink 2, paper 5
    let mut screen = zx_screen(0b0010_1010);
    screen[0] = 0b1000_0001;
    let pixels = zx::decode_screen(&screen).unwrap();
    assert_eq!(&pixels[0..8], &[2, 5, 5, 5, 5, 5, 5, 2]);
}

#[test]
fn zx_interleaved_rows() {
    let mut screen = zx_screen(0);
    // row 9 = third 0, cell row 1, pixel row 1
    screen[zx::pixel_row_base(9) + 3] = 0x80;
    // attribute for cell row 1, column 3: ink 6
    screen[zx::attr_row_base(9) + 3] = 0b0000_0110;
    // row 130 = third 2, cell row 0, pixel row 2
    screen[zx::pixel_row_base(130) + 31] = 0x01;
    screen[zx::attr_row_base(130) + 31] = 0b0100_0001;

    let pixels = zx::decode_screen(&screen).unwrap();
    assert_eq!(pixels[9 * 256 + 24], 6);
    assert_eq!(pixels[9 * 256 + 25], 0);
    // same cell, different pixel row: bitmap empty, paper 0
    assert_eq!(pixels[8 * 256 + 24], 0);
    assert_eq!(pixels[130 * 256 + 255], 9);
    assert_eq!(pixels[130 * 256 + 254], 8);

    let lit = pixels.iter().filter(|&&p| p == 6 || p == 9).count();
    assert_eq!(lit, 2);
}

#[test]
fn zx_attribute_shared_by_cell_rows() {
    let mut screen = zx_screen(0);
    screen[zx::attr_row_base(16)] = 0b0000_0100;
    for row in 16..24 {
        screen[zx::pixel_row_base(row)] = 0xFF;
    }
    let pixels = zx::decode_screen(&screen).unwrap();
    for row in 16..24 {
        assert_eq!(&pixels[row * 256..row * 256 + 8], &[4; 8], "row {row}");
    }
    assert_eq!(&pixels[24 * 256..24 * 256 + 8], &[0; 8]);
}

#[test]
fn zx_flash_not_applied() {
    let mut screen = zx_screen(0b1000_0010);
    screen[0] = 0xF0;
    let pixels = zx::decode_screen(&screen).unwrap();
    assert_eq!(&pixels[0..8], &[2, 2, 2, 2, 0, 0, 0, 0]);

    let mut mask = vec![0u8; zx::PIXEL_COUNT];
    zx::flash_mask_into(&screen, &mut mask).unwrap();
    assert!(mask.iter().all(|&m| m == 1));
    zx::flash_mask_into(&zx_screen(0x7F), &mut mask).unwrap();
    assert!(mask.iter().all(|&m| m == 0));
}

#[test]
fn zx_decode_is_deterministic() {
    let screen = noise(zx::SCREEN_LEN);
    let a = zx::decode_screen(&screen).unwrap();
    let b = zx::decode_screen(&screen).unwrap();
    assert_eq!(a, b);
    assert!(a.iter().all(|&p| p < 16));
}

#[test]
fn zx_destination_capacity_checked() {
    let screen = zx_screen(0x38);
    let mut small = vec![0u8; zx::PIXEL_COUNT - 1];
    match zx::decode_screen_into(&screen, &mut small) {
        Err(ScreenError::DestinationOverflow { capacity, needed }) => {
            assert_eq!(capacity, 49151);
            assert_eq!(needed, 49152);
        }
        other => panic!("expected DestinationOverflow, got {other:?}"),
    }
    assert!(small.iter().all(|&p| p == 0));

    // extra capacity past the image is left alone
    let mut large = vec![0xEEu8; zx::PIXEL_COUNT + 4];
    zx::decode_screen_into(&screen, &mut large).unwrap();
    assert!(large[..zx::PIXEL_COUNT].iter().all(|&p| p == 7));
    assert_eq!(&large[zx::PIXEL_COUNT..], &[0xEE; 4]);
}

#[test]
fn zx_rejects_wrong_length() {
    let mut dst = vec![0u8; zx::PIXEL_COUNT];
    assert!(matches!(
        zx::decode_screen_into(&[0u8; 6911], &mut dst),
        Err(ScreenError::UnrecognizedFormat)
    ));
}

#[test]
fn zx_through_decode_request() {
    let mut screen = zx_screen(0b0100_0011);
    screen[0] = 0xFF;
    let decoded = decode(&screen, Unstoppable).unwrap();
    assert_eq!(decoded.format, ScreenFormat::ZxSpectrum);
    assert_eq!((decoded.width, decoded.height), (256, 192));
    assert_eq!(decoded.layout, PixelLayout::Indexed8);
    assert_eq!(decoded.colors, 16);
    assert!(decoded.palette.is_none());
    assert!(!decoded.is_borrowed());
    assert_eq!(decoded.pixels(), &zx::decode_screen(&screen).unwrap()[..]);
    assert_eq!(decoded.to_indexed(Unstoppable).unwrap(), decoded.pixels());

    let direct = decode_zx_screen(&screen, Unstoppable).unwrap();
    assert_eq!(direct.pixels(), decoded.pixels());
}

// ── Atari ST ─────────────────────────────────────────────────────────

#[test]
fn degas_body_is_zero_copy() {
    let mut data = degas(0x0000);
    data[34] = 0x12;
    data[32033] = 0x34;
    let decoded = decode(&data, Unstoppable).unwrap();
    assert!(decoded.is_borrowed());
    assert_eq!(decoded.format, ScreenFormat::Degas);
    assert_eq!(decoded.pixels().len(), 32000);
    assert_eq!(decoded.pixels()[0], 0x12);
    assert_eq!(decoded.pixels()[31999], 0x34);
    assert_eq!(decoded.layout, PixelLayout::AtariPlanar { planes: 4 });
    assert_eq!(decoded.palette.unwrap().entry(0), Some(0x0777));

    let owned = decoded.into_owned();
    assert!(!owned.is_borrowed());
    assert_eq!(owned.pixels()[0], 0x12);
}

#[test]
fn degas_low_res_planes_to_indices() {
    let mut data = degas(0x0000);
    // first 16-pixel group: planes 0, 1 and 3 set on the leftmost pixel
    data[34..36].copy_from_slice(&0x8000u16.to_be_bytes());
    data[36..38].copy_from_slice(&0x8001u16.to_be_bytes());
    data[38..40].copy_from_slice(&0x0000u16.to_be_bytes());
    data[40..42].copy_from_slice(&0x8000u16.to_be_bytes());

    let decoded = decode_indexed(&data, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Indexed8);
    assert_eq!(decoded.pixels().len(), 320 * 200);
    assert_eq!(decoded.pixels()[0], 0b1011);
    assert_eq!(decoded.pixels()[15], 0b0010);
    assert!(decoded.pixels()[1..15].iter().all(|&p| p == 0));
    assert_eq!(decoded.colors, 16);
}

#[test]
fn degas_medium_res_second_row() {
    let mut data = degas(0x0001);
    // row 1 starts 160 bytes into the body; pixel 1 gets both planes
    let row1 = 34 + 160;
    data[row1..row1 + 2].copy_from_slice(&0x4000u16.to_be_bytes());
    data[row1 + 2..row1 + 4].copy_from_slice(&0x4000u16.to_be_bytes());

    let decoded = decode_indexed(&data, Unstoppable).unwrap();
    assert_eq!((decoded.width, decoded.height), (640, 200));
    let px = decoded.pixels();
    assert_eq!(px[640 + 1], 3);
    assert_eq!(px[640], 0);
    assert_eq!(px.iter().filter(|&&p| p != 0).count(), 1);
}

#[test]
fn degas_high_res_single_plane() {
    let mut data = degas(0x0002);
    data[34] = 0b1010_0000;
    data[34 + 80 * 399 + 79] = 0x01;
    let decoded = decode_indexed(&data, Unstoppable).unwrap();
    assert_eq!((decoded.width, decoded.height), (640, 400));
    let px = decoded.pixels();
    assert_eq!(&px[0..4], &[1, 0, 1, 0]);
    assert_eq!(px[640 * 400 - 1], 1);
    assert_eq!(decoded.colors, 2);
}

#[test]
fn degas_elite_decodes_like_degas() {
    let mut data = degas(0x0000);
    data[40] = 0x80;
    let plain = decode_indexed(&data, Unstoppable).unwrap().into_owned();

    data.extend_from_slice(&[0x55; 32]);
    let elite = decode_degas(&data, Unstoppable).unwrap();
    assert_eq!(elite.format, ScreenFormat::DegasElite);
    assert_eq!(elite.pixels().len(), 32000);
    assert_eq!(elite.to_indexed(Unstoppable).unwrap(), plain.pixels());
}

#[test]
fn neochrome_decodes_low_res() {
    let mut data = neochrome();
    data[128..130].copy_from_slice(&0xFFFFu16.to_be_bytes());
    let decoded = decode_neochrome(&data, Unstoppable).unwrap();
    assert!(decoded.is_borrowed());
    assert_eq!(decoded.format, ScreenFormat::Neochrome);
    assert_eq!((decoded.width, decoded.height), (320, 200));
    assert_eq!(decoded.palette.unwrap().entry(0), Some(0x0700));

    let indexed = decoded.to_indexed(Unstoppable).unwrap();
    assert_eq!(&indexed[0..16], &[1; 16]);
    assert_eq!(indexed[16], 0);
}

#[test]
fn planar_conversion_capacity_checked() {
    let body = vec![0u8; atari::BODY_LEN];
    let mut small = vec![0u8; 320 * 200 - 1];
    assert!(matches!(
        atari::planar_to_indexed(&body, Resolution::Low, &mut small, &Unstoppable),
        Err(ScreenError::DestinationOverflow {
            capacity: 63999,
            needed: 64000
        })
    ));
}

#[test]
fn format_specific_entry_points_reject_others() {
    let screen = zx_screen(0);
    assert!(matches!(
        decode_degas(&screen, Unstoppable),
        Err(ScreenError::UnrecognizedFormat)
    ));
    assert!(matches!(
        decode_neochrome(&degas(0), Unstoppable),
        Err(ScreenError::UnrecognizedFormat)
    ));
    assert!(matches!(
        decode_zx_screen(&neochrome(), Unstoppable),
        Err(ScreenError::UnrecognizedFormat)
    ));
}

#[test]
fn unrecognized_is_an_error() {
    let result = decode(&[0u8; 100], Unstoppable);
    assert!(matches!(result, Err(ScreenError::UnrecognizedFormat)));
    assert!(matches!(
        decode(&degas(0x0003), Unstoppable),
        Err(ScreenError::UnrecognizedFormat)
    ));
}

// ── Cancellation ─────────────────────────────────────────────────────

#[test]
fn cancelled_stop_aborts_decode() {
    assert!(matches!(
        decode_indexed(&degas(0x0000), Cancelled),
        Err(ScreenError::Cancelled(StopReason::Cancelled))
    ));
    assert!(matches!(
        decode(&zx_screen(0x38), Cancelled),
        Err(ScreenError::Cancelled(_))
    ));
    assert!(matches!(
        decode_neochrome(&neochrome(), Cancelled),
        Err(ScreenError::Cancelled(_))
    ));
}

#[test]
fn cancelled_stop_aborts_planar_conversion() {
    let body = vec![0u8; atari::BODY_LEN];
    let mut dst = vec![0u8; 640 * 400];
    assert!(matches!(
        atari::planar_to_indexed(&body, Resolution::High, &mut dst, &Cancelled),
        Err(ScreenError::Cancelled(_))
    ));

    let data = degas(0x0001);
    let decoded = decode(&data, Unstoppable).unwrap();
    assert!(matches!(
        decoded.to_indexed(Cancelled),
        Err(ScreenError::Cancelled(_))
    ));
}

// ── Threads ──────────────────────────────────────────────────────────

#[test]
fn shared_screen_decodes_on_many_threads() {
    let screen = std::sync::Arc::new(noise(zx::SCREEN_LEN));
    let expected = zx::decode_screen(&screen).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let screen = std::sync::Arc::clone(&screen);
            std::thread::spawn(move || {
                assert_eq!(detect(&screen), ScreenFormat::ZxSpectrum);
                decode(&screen, Unstoppable).unwrap().into_owned()
            })
        })
        .collect();

    for handle in handles {
        let decoded = handle.join().unwrap();
        assert_eq!(decoded.pixels(), &expected[..]);
    }
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_reject_high_res() {
    let limits = Limits {
        max_height: Some(200),
        ..Default::default()
    };
    let data = degas(0x0002);
    match DecodeRequest::new(&data).with_limits(&limits).decode(Unstoppable) {
        Err(ScreenError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
    assert!(
        DecodeRequest::new(&degas(0x0000))
            .with_limits(&limits)
            .decode(Unstoppable)
            .is_ok()
    );
}

#[test]
fn limits_memory_applies_to_conversion() {
    let limits = Limits {
        max_memory_bytes: Some(32000),
        ..Default::default()
    };
    let data = degas(0x0000);
    // native decode borrows and allocates nothing
    assert!(
        DecodeRequest::new(&data)
            .with_limits(&limits)
            .decode(Unstoppable)
            .is_ok()
    );
    assert!(matches!(
        DecodeRequest::new(&data)
            .with_limits(&limits)
            .decode_indexed(Unstoppable),
        Err(ScreenError::LimitExceeded(_))
    ));
    assert!(matches!(
        DecodeRequest::new(&zx_screen(0))
            .with_limits(&limits)
            .decode(Unstoppable),
        Err(ScreenError::LimitExceeded(_))
    ));
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_view_of_indices() {
    let mut screen = zx_screen(0b0000_0001);
    screen[zx::pixel_row_base(1)] = 0x80;
    let decoded = decode(&screen, Unstoppable).unwrap();
    let img = decoded.as_imgref().unwrap();
    assert_eq!((img.width(), img.height()), (256, 192));
    assert_eq!(img[(0usize, 1usize)], 1);
    assert_eq!(img[(1usize, 1usize)], 0);

    let low = degas(0);
    let atari = decode(&low, Unstoppable).unwrap();
    assert!(matches!(
        atari.as_imgref(),
        Err(ScreenError::LayoutMismatch { .. })
    ));
}
