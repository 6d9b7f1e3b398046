use lane_detector::image::Frame;
use lane_detector::render::draw_segment;
use lane_detector::LineSegment;

/// Background gray level of the synthetic road.
pub const ROAD_LEVEL: u8 = 30;

/// Lane markings of [`road_frame`], shifted horizontally by `shift` pixels.
pub fn road_markings(shift: f64) -> [LineSegment; 2] {
    [
        LineSegment::new(120.0 + shift, 340.0, 280.0 + shift, 220.0),
        LineSegment::new(520.0 + shift, 340.0, 360.0 + shift, 220.0),
    ]
}

/// 640×360 RGB frame: uniform dark road with two bright markings converging
/// toward the horizon.
pub fn road_frame(shift: f64) -> Frame {
    let mut frame = Frame::new(640, 360, 3);
    frame.as_bytes_mut().fill(ROAD_LEVEL);
    for marking in &road_markings(shift) {
        draw_segment(&mut frame, marking, &[235, 235, 235], 6);
    }
    frame
}

/// x coordinate of `segment`'s supporting line at row `y`.
pub fn x_at(segment: &LineSegment, y: f64) -> f64 {
    let t = (y - segment.y1) / (segment.y2 - segment.y1);
    segment.x1 + t * (segment.x2 - segment.x1)
}
