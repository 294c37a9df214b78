use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgb8;

fn palette() -> Palette {
    Palette::new(vec![Rgb8::BLACK, Rgb8::WHITE, Rgb8::new(255, 0, 0)]).unwrap()
}

#[test]
fn begin_writes_header_and_palette() {
    let header = StreamHeader::new(0, 2, 1, 12, 3).unwrap();
    let writer = StreamWriter::begin(Cursor::new(Vec::new()), header, &palette()).unwrap();
    assert_eq!(writer.bytes_written(), 11 + 6);
    let bytes = writer.finish().unwrap().into_inner();
    assert_eq!(
        bytes,
        vec![0, 0, 0, 0, 0, 2, 0, 1, 0, 12, 3, 0x00, 0x00, 0xFF, 0xFF, 0xF8, 0x00]
    );
}

#[test]
fn palette_size_must_match_header() {
    let header = StreamHeader::new(0, 2, 1, 12, 2).unwrap();
    assert!(StreamWriter::begin(Cursor::new(Vec::new()), header, &palette()).is_err());
}

#[test]
fn records_are_length_prefixed() {
    let header = StreamHeader::new(2, 4, 1, 12, 3).unwrap();
    let mut writer = StreamWriter::begin(Cursor::new(Vec::new()), header, &palette()).unwrap();
    writer.push_indices(&[0, 0, 0, 0]).unwrap();
    let frame = Frame::new(
        4,
        1,
        vec![Rgb8::WHITE, Rgb8::WHITE, Rgb8::BLACK, Rgb8::new(250, 5, 5)],
    )
    .unwrap();
    writer.push_frame(&frame).unwrap();
    assert_eq!(writer.frames_written(), 2);
    let bytes = writer.finish().unwrap().into_inner();
    assert_eq!(&bytes[17..], &[0, 0, 0, 2, 4, 0, 0, 0, 0, 6, 2, 1, 1, 0, 1, 2]);
}

#[test]
fn bad_frames_are_rejected_without_writing() {
    let header = StreamHeader::new(1, 2, 2, 12, 3).unwrap();
    let mut writer = StreamWriter::begin(Cursor::new(Vec::new()), header, &palette()).unwrap();
    assert!(writer.push_indices(&[0, 0, 0]).is_err());
    assert!(writer.push_indices(&[0, 1, 2, 3]).is_err());
    assert!(writer.push_frame(&Frame::solid(3, 2, Rgb8::BLACK)).is_err());
    assert_eq!(writer.frames_written(), 0);
    assert_eq!(writer.bytes_written(), 17);
}

#[test]
fn finish_patches_frame_count() {
    let header = StreamHeader::new(9, 1, 1, 12, 3).unwrap();
    let mut writer = StreamWriter::begin(Cursor::new(Vec::new()), header, &palette()).unwrap();
    writer.push_indices(&[2]).unwrap();
    let mut out = writer.finish().unwrap();
    assert_eq!(out.position(), out.get_ref().len() as u64);
    assert_eq!(&out.get_ref()[0..4], &[0, 0, 0, 1]);

    // The sink is left at the end, ready for more data.
    std::io::Write::write_all(&mut out, &[0xAA]).unwrap();
    assert_eq!(out.get_ref().last(), Some(&0xAA));
}

#[test]
fn patch_is_relative_to_start_position() {
    let mut sink = Cursor::new(vec![0xEE; 3]);
    sink.set_position(3);
    let header = StreamHeader::new(0, 1, 1, 12, 3).unwrap();
    let mut writer = StreamWriter::begin(sink, header, &palette()).unwrap();
    writer.push_indices(&[1]).unwrap();
    let bytes = writer.finish().unwrap().into_inner();
    assert_eq!(&bytes[0..3], &[0xEE; 3]);
    assert_eq!(&bytes[3..7], &[0, 0, 0, 1]);
}
