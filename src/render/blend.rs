use crate::error::{LaneError, LaneResult};
use crate::image::{Frame, ImageView};

/// Per-sample `saturate(round(a * alpha + b * beta + gamma))`.
pub fn add_weighted(a: &Frame, alpha: f32, b: &Frame, beta: f32, gamma: f32) -> LaneResult<Frame> {
    if !a.same_shape(b) {
        return Err(LaneError::MalformedInput(format!(
            "cannot blend {}x{}x{} with {}x{}x{}",
            a.width(),
            a.height(),
            a.channels(),
            b.width(),
            b.height(),
            b.channels()
        )));
    }
    let mut out = a.zeros_like();
    for ((dst, &va), &vb) in out
        .as_bytes_mut()
        .iter_mut()
        .zip(a.as_bytes())
        .zip(b.as_bytes())
    {
        let v = va as f32 * alpha + vb as f32 * beta + gamma;
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}
