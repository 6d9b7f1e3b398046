use lane_detector::config::load_config;
use lane_detector::image::io::write_json_file;
use lane_detector::pipeline::{ImageSequenceSink, ImageSequenceSource, SequenceRunner};
use lane_detector::{LaneDetector, LaneError};
use log::info;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), LaneError> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let source = ImageSequenceSource::open(&config.input)?;
    info!(
        "Processing {} frames from {} (batch size {})",
        source.remaining(),
        config.input.display(),
        config.batch_size
    );
    let sink = ImageSequenceSink::create(&config.output.frames_dir)?;
    let mut runner = SequenceRunner::new(LaneDetector::new(config.params), source, sink)
        .with_batch_size(config.batch_size);
    let summary = runner.run()?;

    println!(
        "Processed {}/{} frames into {} ({} failed)",
        summary.frames_processed,
        summary.frames_read,
        config.output.frames_dir.display(),
        summary.failed_frames.len()
    );
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &summary)?;
        println!("Saved run summary to {}", path.display());
    }
    Ok(())
}

fn usage() -> LaneError {
    LaneError::Config("Usage: lane_sequence <config.json>".to_string())
}
