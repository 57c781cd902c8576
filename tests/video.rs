mod common;

use common::synthetic_frames::drifting_clip;
use lane_finder::video::{
    open_sink, open_source, DriverState, ImageSequenceSink, ImageSequenceSource, MemorySink,
    MemorySource,
};
use lane_finder::{FrameDriver, FrameSink, FrameSource, LaneDetector, LaneParams};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lane_finder_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn ten_frame_clip_produces_ten_matching_frames() {
    common::init_logging();
    let detector = LaneDetector::new(LaneParams::default()).unwrap();
    let clip = drifting_clip(10);
    let mut source = MemorySource::new(clip.clone()).with_fps(25.0);
    let mut sink = MemorySink::new();

    let mut driver = FrameDriver::new(&detector);
    let summary = driver.run(&mut source, &mut sink).unwrap();

    assert_eq!(summary.frames, 10);
    assert_eq!(driver.state(), DriverState::Idle);
    assert!(sink.finished);
    assert_eq!(sink.frames.len(), 10);
    assert!(summary.total_segments >= 20);
    for (input, output) in clip.iter().zip(&sink.frames) {
        let still = detector.process(input).unwrap();
        assert_eq!(&still.output, output);
    }
}

#[test]
fn image_sequence_round_trip_keeps_order() {
    common::init_logging();
    let out_dir = scratch_dir("sequence_out");
    let detector = LaneDetector::new(LaneParams::default()).unwrap();
    let clip = drifting_clip(3);

    let mut sink = ImageSequenceSink::create(&out_dir).unwrap();
    let summary = FrameDriver::new(&detector)
        .run(&mut MemorySource::new(clip.clone()), &mut sink)
        .unwrap();
    assert_eq!(summary.frames, 3);
    assert_eq!(sink.written(), 3);
    assert!(out_dir.join("frame_000000.png").is_file());
    assert!(out_dir.join("frame_000002.png").is_file());

    let mut source = ImageSequenceSource::open(&out_dir).unwrap();
    assert_eq!(source.frame_count_hint(), Some(3));
    for input in &clip {
        let expected = detector.process(input).unwrap().output;
        let read = source.next_frame().unwrap().unwrap();
        assert_eq!(read, expected);
    }
    assert!(source.next_frame().unwrap().is_none());
    fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn extensionless_output_path_opens_a_sequence_sink() {
    let out_dir = scratch_dir("open_sink");
    let mut sink = open_sink(&out_dir, None).unwrap();
    sink.write_frame(&drifting_clip(1)[0]).unwrap();
    sink.finish().unwrap();
    assert!(out_dir.join("frame_000000.png").is_file());

    let mut source = open_source(&out_dir).unwrap();
    assert!(source.next_frame().unwrap().is_some());
    assert!(source.next_frame().unwrap().is_none());
    fs::remove_dir_all(&out_dir).ok();
}

#[cfg(not(feature = "video-file"))]
#[test]
fn container_files_need_the_video_feature() {
    use lane_finder::LaneError;
    let err = open_source(&PathBuf::from("clip.mp4")).err().unwrap();
    assert!(matches!(err, LaneError::Video(_)));
}
