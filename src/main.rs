use lane_detector::image::Frame;
use lane_detector::render::draw_segment;
use lane_detector::{LaneDetector, LaneParams, LineSegment};

fn main() {
    env_logger::init();

    // Demo: dark road with two bright lane markings converging toward the horizon
    let (w, h) = (960usize, 540usize);
    let mut frame = Frame::new(w, h, 3);
    for px in frame.as_bytes_mut() {
        *px = 40;
    }
    let markings = [
        LineSegment::new(180.0, 510.0, 420.0, 330.0),
        LineSegment::new(780.0, 510.0, 540.0, 330.0),
    ];
    for marking in &markings {
        draw_segment(&mut frame, marking, &[230, 230, 230], 8);
    }

    let detector = LaneDetector::new(LaneParams::default());
    match detector.process(&frame) {
        Ok(output) => {
            println!("{}", output.report.summary());
            for (side, line) in output.report.lines.iter() {
                println!(
                    "{side:?}: ({:.0}, {:.0}) -> ({:.0}, {:.0})",
                    line.x1, line.y1, line.x2, line.y2
                );
            }
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}
