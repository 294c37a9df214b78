use super::*;

fn probe(fps_num: u32, fps_den: u32) -> VideoProbe {
    VideoProbe {
        source_path: PathBuf::from("clip.mp4"),
        width: 320,
        height: 180,
        fps_num,
        fps_den,
        duration_sec: 2.0,
        frame_count: 60,
    }
}

#[test]
fn nominal_fps_truncates() {
    assert_eq!(probe(30, 1).nominal_fps().unwrap(), 30);
    assert_eq!(probe(30000, 1001).nominal_fps().unwrap(), 29);
    assert_eq!(probe(24000, 1001).nominal_fps().unwrap(), 23);
}

#[test]
fn nominal_fps_rejects_slow_or_unknown_rates() {
    assert!(probe(1, 2).nominal_fps().is_err());
    assert!(probe(0, 1).nominal_fps().is_err());
    assert!(probe(30, 0).nominal_fps().is_err());
}

#[test]
fn frame_times_follow_rate() {
    let p = probe(25, 1);
    assert_eq!(p.frame_time_sec(0), 0.0);
    assert!((p.frame_time_sec(50) - 2.0).abs() < 1e-9);
    assert_eq!(probe(0, 1).frame_time_sec(10), 0.0);
}

#[cfg(feature = "media-ffmpeg")]
#[test]
fn ratio_parsing() {
    assert_eq!(parse_ff_ratio("30000/1001"), Some((30000, 1001)));
    assert_eq!(parse_ff_ratio("25/1"), Some((25, 1)));
    assert_eq!(parse_ff_ratio("0/0"), None);
    assert_eq!(parse_ff_ratio("abc"), None);
}

#[cfg(feature = "media-ffmpeg")]
#[test]
fn empty_sample_decode_means_too_few_frames() {
    assert!(matches!(
        check_sample_len(0, 47, 12),
        Err(PalError::InsufficientSamples {
            needed: 48,
            available: 47
        })
    ));
    assert!(matches!(
        check_sample_len(6, 3, 12),
        Err(PalError::Source(_))
    ));
    assert!(check_sample_len(12, 3, 12).is_ok());
}

#[test]
fn missing_file_fails_to_open() {
    assert!(FfmpegSource::open(Path::new("/nonexistent/clip.mp4")).is_err());
}
