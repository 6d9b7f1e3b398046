mod common;

use common::synthetic_image::road_frame;
use lane_detector::config::load_config;
use lane_detector::image::io::{load_frame, save_frame};
use lane_detector::image::Frame;
use lane_detector::pipeline::{
    FrameSink, ImageSequenceSink, ImageSequenceSource, MemorySink, MemorySource, SequenceRunner,
};
use lane_detector::{LaneDetector, LaneResult};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn road_sequence() -> Vec<Frame> {
    (0..5).map(|i| road_frame(i as f64 * 6.0 - 12.0)).collect()
}

#[test]
fn batched_run_matches_sequential_run() {
    init_logging();
    let run = |batch_size: usize| {
        let mut runner = SequenceRunner::new(
            LaneDetector::default(),
            MemorySource::new(road_sequence()),
            MemorySink::new(),
        )
        .with_batch_size(batch_size);
        let summary = runner.run().unwrap();
        (summary, runner.into_sink())
    };

    let (seq_summary, seq_sink) = run(1);
    let (par_summary, par_sink) = run(3);

    assert_eq!(seq_summary.frames_processed, 5);
    assert_eq!(par_summary.frames_processed, 5);
    assert_eq!(seq_sink.frames, par_sink.frames);
    let indices: Vec<usize> = par_sink.frames.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    for (a, b) in seq_summary.reports.iter().zip(&par_summary.reports) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.lines, b.lines);
        assert_eq!(a.anomalies, b.anomalies);
    }
}

struct CancelAfterFirst {
    flag: Arc<AtomicBool>,
    inner: MemorySink,
}

impl FrameSink for CancelAfterFirst {
    fn write_frame(&mut self, index: usize, frame: &Frame) -> LaneResult<()> {
        self.flag.store(true, Ordering::Relaxed);
        self.inner.write_frame(index, frame)
    }

    fn finish(&mut self) -> LaneResult<()> {
        self.inner.finish()
    }
}

#[test]
fn cancellation_stops_between_frames() {
    init_logging();
    let flag = Arc::new(AtomicBool::new(false));
    let sink = CancelAfterFirst {
        flag: Arc::clone(&flag),
        inner: MemorySink::new(),
    };
    let mut runner = SequenceRunner::new(
        LaneDetector::default(),
        MemorySource::new(road_sequence()),
        sink,
    )
    .with_cancel_flag(flag);

    let summary = runner.run().unwrap();
    assert!(summary.cancelled);
    assert_eq!(summary.frames_read, 1);
    assert_eq!(summary.frames_processed, 1);
    let sink = runner.into_sink();
    assert_eq!(sink.inner.frames.len(), 1);
    assert!(sink.inner.finished);
}

#[test]
fn image_sequence_run_from_config() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("frames");
    for (i, frame) in road_sequence().iter().take(3).enumerate() {
        save_frame(frame, &input.join(format!("{i:03}.png"))).unwrap();
    }
    let out = dir.path().join("out");
    let config_path = dir.path().join("config.json");
    let config_json = serde_json::json!({
        "input": input,
        "output": { "frames_dir": out, "report_json": out.join("report.json") },
        "batch_size": 2,
        "params": { "render": { "line_thickness": 4 } }
    });
    fs::write(&config_path, config_json.to_string()).unwrap();

    let config = load_config(&config_path).unwrap();
    assert_eq!(config.params.render.line_thickness, 4);
    let source = ImageSequenceSource::open(&config.input).unwrap();
    let sink = ImageSequenceSink::create(&config.output.frames_dir).unwrap();
    let mut runner = SequenceRunner::new(LaneDetector::new(config.params), source, sink)
        .with_batch_size(config.batch_size);
    let summary = runner.run().unwrap();

    assert_eq!(summary.frames_processed, 3);
    assert!(summary.failed_frames.is_empty());
    for i in 0..3 {
        let written = load_frame(&out.join(format!("frame_{i:06}.png"))).unwrap();
        assert_eq!(written.as_bytes().len(), 640 * 360 * 3);
    }
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["framesProcessed"], 3);
    assert_eq!(json["reports"][2]["index"], 2);
}

#[test]
fn corrupt_image_file_fails_only_its_frame() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("frames");
    let frames = road_sequence();
    save_frame(&frames[0], &input.join("000.png")).unwrap();
    fs::write(input.join("001.png"), b"not a png").unwrap();
    save_frame(&frames[2], &input.join("002.png")).unwrap();

    for batch_size in [1, 3] {
        let source = ImageSequenceSource::open(&input).unwrap();
        let mut runner = SequenceRunner::new(LaneDetector::default(), source, MemorySink::new())
            .with_batch_size(batch_size);
        let summary = runner.run().unwrap();
        assert_eq!(summary.frames_read, 3);
        assert_eq!(summary.frames_processed, 2);
        assert_eq!(summary.failed_frames, vec![1]);
        let indices: Vec<usize> = runner.sink().frames.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 2], "batch size {batch_size}");
    }
}
