use super::*;

#[test]
fn exact_match_wins() {
    let palette = [Rgb8::BLACK, Rgb8::new(120, 40, 200), Rgb8::WHITE];
    assert_eq!(nearest_index(&palette, Rgb8::new(120, 40, 200)), 1);
    assert_eq!(nearest_index(&palette, Rgb8::new(250, 250, 250)), 2);
}

#[test]
fn ties_go_to_lowest_index() {
    // (0,0,0) and (20,0,0) are both 100 away from (10,0,0).
    let palette = [Rgb8::new(20, 0, 0), Rgb8::BLACK];
    assert_eq!(nearest_index(&palette, Rgb8::new(10, 0, 0)), 0);

    let dup = [Rgb8::WHITE, Rgb8::new(7, 7, 7), Rgb8::new(7, 7, 7)];
    assert_eq!(nearest_index(&dup, Rgb8::new(8, 8, 8)), 1);
}

#[test]
fn indices_stay_inside_palette() {
    let palette = [Rgb8::BLACK, Rgb8::new(255, 0, 0), Rgb8::new(0, 0, 255)];
    let pixels: Vec<Rgb8> = (0..=255u8)
        .map(|v| Rgb8::new(v, v.wrapping_mul(3), 255 - v))
        .collect();
    let out = quantize_pixels(&pixels, &palette).unwrap();
    assert_eq!(out.len(), pixels.len());
    assert!(out.iter().all(|&i| usize::from(i) < palette.len()));
}

#[test]
fn repeated_pixels_match_fresh_lookup() {
    let palette = [Rgb8::BLACK, Rgb8::gray(128), Rgb8::WHITE];
    let pixels = [
        Rgb8::gray(10),
        Rgb8::gray(10),
        Rgb8::gray(200),
        Rgb8::gray(200),
        Rgb8::gray(10),
    ];
    let out = quantize_pixels(&pixels, &palette).unwrap();
    let fresh: Vec<u8> = pixels.iter().map(|&p| nearest_index(&palette, p)).collect();
    assert_eq!(out, fresh);
    assert_eq!(out, vec![0, 0, 2, 2, 0]);
}

#[test]
fn empty_palette_is_rejected() {
    assert!(matches!(
        quantize_pixels(&[Rgb8::BLACK], &[]),
        Err(PalError::EmptyPalette)
    ));
}

#[test]
fn oversized_palette_is_rejected() {
    let palette = vec![Rgb8::BLACK; MAX_PALETTE_LEN + 1];
    assert!(matches!(
        quantize_pixels(&[Rgb8::BLACK], &palette),
        Err(PalError::PaletteTooLarge { len: 257, .. })
    ));
}

#[test]
fn frame_quantizes_row_major() {
    let palette = Palette::new(vec![Rgb8::BLACK, Rgb8::WHITE]).unwrap();
    let frame = Frame::new(
        2,
        2,
        vec![Rgb8::WHITE, Rgb8::BLACK, Rgb8::gray(30), Rgb8::gray(220)],
    )
    .unwrap();
    assert_eq!(quantize_frame(&frame, &palette).unwrap(), vec![1, 0, 0, 1]);
}
