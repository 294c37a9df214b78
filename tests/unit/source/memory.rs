use super::*;
use crate::foundation::core::Rgb8;

fn frames(n: u8) -> Vec<Frame> {
    (0..n).map(|i| Frame::solid(4, 2, Rgb8::gray(i))).collect()
}

#[test]
fn reports_info_and_yields_in_order() {
    let mut source = InMemorySource::new(frames(3), 25).unwrap();
    assert_eq!(
        source.info(),
        SourceInfo {
            frame_count: 3,
            width: 4,
            height: 2,
            fps: 25
        }
    );
    for i in 0..3 {
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.pixels[0], Rgb8::gray(i));
    }
    assert!(source.next_frame().unwrap().is_none());
}

#[test]
fn rejects_empty_and_mixed_sizes() {
    assert!(InMemorySource::new(Vec::new(), 25).is_err());
    let mut mixed = frames(2);
    mixed.push(Frame::solid(2, 2, Rgb8::BLACK));
    assert!(InMemorySource::new(mixed, 25).is_err());
}

#[test]
fn sampling_is_random_access_and_resized() {
    let mut source = InMemorySource::new(frames(3), 25).unwrap();
    let sample = source.sample_frame(2, 2, 1).unwrap();
    assert_eq!((sample.width, sample.height), (2, 1));
    assert_eq!(sample.pixels, vec![Rgb8::gray(2); 2]);
    // Sampling does not move the playback cursor.
    assert_eq!(source.next_frame().unwrap().unwrap().pixels[0], Rgb8::gray(0));
    assert!(matches!(
        source.sample_frame(3, 2, 1),
        Err(PalError::InsufficientSamples {
            needed: 4,
            available: 3
        })
    ));
}

#[test]
fn declared_count_only_changes_info() {
    let mut source = InMemorySource::new(frames(2), 25)
        .unwrap()
        .with_declared_frame_count(10);
    assert_eq!(source.info().frame_count, 10);
    assert!(source.next_frame().unwrap().is_some());
    assert!(source.next_frame().unwrap().is_some());
    assert!(source.next_frame().unwrap().is_none());
}
