use crate::config::EraConfig;
use crate::viewport::Viewport;

/// Maps a calendar year to a horizontal pixel offset for one track.
///
/// Each era is normalized to its own start year; the zoom scale, pan offset,
/// and left margin are shared by both tracks. Two events on different tracks
/// land on the same x exactly when their offsets into their eras are equal.
/// Years outside the era extrapolate linearly; there is no clamping.
pub fn pixel_x(year: i32, era: &EraConfig, viewport: Viewport, margin_left: f32) -> f32 {
    let frac = (year - era.start) as f32 / era.span_years() as f32;
    let span_px = era.span_years() as f32 * viewport.zoom_scale;
    frac * span_px + viewport.pan_offset + margin_left
}
