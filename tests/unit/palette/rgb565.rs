use super::*;

#[test]
fn pure_red_sets_only_the_red_field() {
    assert_eq!(pack_rgb565(Rgb8::new(255, 0, 0)), 0xF800);
    assert_eq!(pack_rgb565(Rgb8::new(0, 255, 0)), 0x07E0);
    assert_eq!(pack_rgb565(Rgb8::new(0, 0, 255)), 0x001F);
}

#[test]
fn black_and_white_are_extremes() {
    assert_eq!(pack_rgb565(Rgb8::BLACK), 0);
    assert_eq!(pack_rgb565(Rgb8::WHITE), 0xFFFF);
}

#[test]
fn packing_keeps_top_bits() {
    // 0b1000_0111 -> 0b10000, 0b0100_0011 -> 0b010000, 0b1111_1000 -> 0b11111
    let packed = pack_rgb565(Rgb8::new(0x87, 0x43, 0xF8));
    assert_eq!(packed >> 11, 0b10000);
    assert_eq!((packed >> 5) & 0x3f, 0b010000);
    assert_eq!(packed & 0x1f, 0b11111);
}

#[test]
fn unpack_replicates_bits_and_is_stable() {
    assert_eq!(unpack_rgb565(0xFFFF), Rgb8::WHITE);
    assert_eq!(unpack_rgb565(0), Rgb8::BLACK);
    assert_eq!(unpack_rgb565(0xF800), Rgb8::new(255, 0, 0));
    for v in [0x1234u16, 0xABCD, 0x7BEF] {
        assert_eq!(pack_rgb565(unpack_rgb565(v)), v);
    }
}
