use lane_detector::image::io::{load_frame, save_frame, write_json_file};
use lane_detector::{LaneDetector, LaneError, LaneParams};
use log::info;
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), LaneError> {
    let mut args = env::args().skip(1);
    let input = args.next().map(PathBuf::from).ok_or_else(usage)?;
    let output = args.next().map(PathBuf::from).ok_or_else(usage)?;
    let report_path = args.next().map(PathBuf::from);

    let frame = load_frame(&input)?;
    let detector = LaneDetector::new(LaneParams::default());
    let result = detector.process(&frame)?;
    info!("{}: {}", input.display(), result.report.summary());

    save_frame(&result.frame, &output)?;
    println!("Saved annotated frame to {}", output.display());
    if let Some(path) = report_path {
        write_json_file(&path, &result.report)?;
        println!("Saved frame report to {}", path.display());
    }
    Ok(())
}

fn usage() -> LaneError {
    LaneError::Config("Usage: lane_frame <input-image> <output-image> [report.json]".to_string())
}
