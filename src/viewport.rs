use crate::config::ViewportConfig;

/// Shared pan/zoom state for both tracks. A plain value: interaction layers
/// replace it on every user action rather than mutating it, and the layout
/// stage only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Pixels per calendar year.
    pub zoom_scale: f32,
    /// Signed pixel offset applied uniformly to both tracks. Unbounded.
    pub pan_offset: f32,
}

impl Viewport {
    pub fn initial(config: &ViewportConfig) -> Self {
        Self {
            zoom_scale: config.pixels_per_year,
            pan_offset: 0.0,
        }
    }

    /// One zoom step. A step that would leave the configured bounds is
    /// ignored and the previous state returned unchanged.
    #[must_use]
    pub fn zoomed(self, factor: f32, config: &ViewportConfig) -> Self {
        let scale = self.zoom_scale * factor;
        if scale < config.min_zoom || scale > config.max_zoom {
            return self;
        }
        Self {
            zoom_scale: scale,
            ..self
        }
    }

    /// Explicit scale request (CLI or embedding host); clamped into bounds.
    #[must_use]
    pub fn with_zoom(self, scale: f32, config: &ViewportConfig) -> Self {
        Self {
            zoom_scale: scale.clamp(config.min_zoom, config.max_zoom),
            ..self
        }
    }

    #[must_use]
    pub fn panned(self, delta: f32) -> Self {
        Self {
            pan_offset: self.pan_offset + delta,
            ..self
        }
    }

    #[must_use]
    pub fn reset(self, config: &ViewportConfig) -> Self {
        Self::initial(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ViewportConfig {
        ViewportConfig {
            pixels_per_year: 60.0,
            min_zoom: 30.0,
            max_zoom: 120.0,
        }
    }

    #[test]
    fn zoom_round_trip_restores_scale() {
        let config = config();
        let viewport = Viewport::initial(&config);
        let zoomed = viewport.zoomed(1.2, &config).zoomed(1.0 / 1.2, &config);
        assert!((zoomed.zoom_scale - viewport.zoom_scale).abs() < 1e-4);
    }

    #[test]
    fn zoom_past_bounds_is_ignored() {
        let config = config();
        let at_max = Viewport {
            zoom_scale: 120.0,
            pan_offset: 0.0,
        };
        assert_eq!(at_max.zoomed(1.2, &config), at_max);
        let at_min = Viewport {
            zoom_scale: 30.0,
            pan_offset: 0.0,
        };
        assert_eq!(at_min.zoomed(0.8, &config), at_min);
    }

    #[test]
    fn explicit_zoom_clamps() {
        let config = config();
        let viewport = Viewport::initial(&config).with_zoom(500.0, &config);
        assert_eq!(viewport.zoom_scale, 120.0);
        let viewport = viewport.with_zoom(1.0, &config);
        assert_eq!(viewport.zoom_scale, 30.0);
    }

    #[test]
    fn pan_accumulates_and_reset_restores() {
        let config = config();
        let viewport = Viewport::initial(&config).panned(120.0).panned(-40.0);
        assert_eq!(viewport.pan_offset, 80.0);
        assert_eq!(viewport.reset(&config), Viewport::initial(&config));
    }
}
