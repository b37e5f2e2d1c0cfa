use super::transform::pixel_x;
use super::types::MarkerLayout;
use crate::config::{EraConfig, LayoutConfig};
use crate::viewport::Viewport;

/// One tick per marker interval from the era start through its end. Markers
/// go through the same transform as cards so they track pan and zoom.
pub fn era_markers(era: &EraConfig, viewport: Viewport, config: &LayoutConfig) -> Vec<MarkerLayout> {
    let mut markers = Vec::new();
    let mut year = era.start;
    while year <= era.end {
        markers.push(MarkerLayout {
            year,
            x: pixel_x(year, era, viewport, config.margin_left),
        });
        year += config.markers.interval;
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_era_inclusive_at_interval() {
        let config = LayoutConfig::default();
        let viewport = Viewport {
            zoom_scale: 60.0,
            pan_offset: 0.0,
        };
        let markers = era_markers(&config.top_era, viewport, &config);
        assert_eq!(markers.len(), 7);
        assert_eq!(markers.first().unwrap().year, 1920);
        assert_eq!(markers.last().unwrap().year, 1950);
    }

    #[test]
    fn marker_positions_match_the_transform() {
        let config = LayoutConfig::default();
        let viewport = Viewport {
            zoom_scale: 45.0,
            pan_offset: -130.0,
        };
        for marker in era_markers(&config.bottom_era, viewport, &config) {
            let expected = pixel_x(marker.year, &config.bottom_era, viewport, config.margin_left);
            assert_eq!(marker.x, expected);
        }
    }
}
