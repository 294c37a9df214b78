use super::*;

#[test]
fn dist_sq_does_not_underflow() {
    let a = Rgb8::new(0, 0, 0);
    let b = Rgb8::new(255, 255, 255);
    assert_eq!(a.dist_sq(b), 3 * 255 * 255);
    assert_eq!(b.dist_sq(a), 3 * 255 * 255);
    assert_eq!(a.dist_sq(a), 0);
    assert_eq!(Rgb8::new(10, 20, 30).dist_sq(Rgb8::new(13, 16, 30)), 25);
}

#[test]
fn frame_new_checks_pixel_count() {
    assert!(Frame::new(2, 2, vec![Rgb8::BLACK; 4]).is_ok());
    assert!(Frame::new(2, 2, vec![Rgb8::BLACK; 3]).is_err());
}

#[test]
fn from_rgb24_reads_channels_in_order() {
    let f = Frame::from_rgb24(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(f.pixels, vec![Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)]);
    assert!(Frame::from_rgb24(2, 1, &[1, 2, 3]).is_err());
}

#[test]
fn resize_nearest_picks_top_left_of_each_cell() {
    let pixels = (0..16u8).map(Rgb8::gray).collect();
    let f = Frame::new(4, 4, pixels).unwrap();
    let small = f.resize_nearest(2, 2).unwrap();
    assert_eq!(
        small.pixels,
        vec![Rgb8::gray(0), Rgb8::gray(2), Rgb8::gray(8), Rgb8::gray(10)]
    );
    assert!(f.resize_nearest(0, 2).is_err());
}
