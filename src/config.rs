use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EraConfig {
    pub start: i32,
    pub end: i32,
    pub label: String,
}

impl EraConfig {
    pub fn span_years(&self) -> i32 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Initial zoom scale in pixels per calendar year.
    pub pixels_per_year: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            pixels_per_year: 60.0,
            min_zoom: 30.0,
            max_zoom: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionPolicy {
    /// A lane stays occupied near an x for the rest of the sweep.
    TrackGlobal,
    /// Occupancy is checked only against cards sharing the exact year,
    /// so near-but-not-equal years may share a lane.
    PerYear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    pub width: f32,
    pub min_height: f32,
    /// Fraction of the card width below which two x positions collide.
    pub collision_fraction: f32,
    /// Vertical offset of lane 0 from the top of the track band.
    pub base_offset: f32,
    pub vertical_spacing: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub corner_radius: f32,
    pub accent_width: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            width: 140.0,
            min_height: 64.0,
            collision_fraction: 0.7,
            base_offset: 20.0,
            vertical_spacing: 100.0,
            padding_x: 10.0,
            padding_y: 8.0,
            corner_radius: 8.0,
            accent_width: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Years between consecutive tick marks.
    pub interval: i32,
    pub tick_length: f32,
    pub label_gap: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            interval: 5,
            tick_length: 10.0,
            label_gap: 16.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub margin_left: f32,
    pub margin_top: f32,
    pub track_gap: f32,
    pub axis_gap: f32,
    pub title_height: f32,
    pub label_line_height: f32,
    pub max_label_width_chars: usize,
    pub fast_text_metrics: bool,
    pub collision_policy: CollisionPolicy,
    pub top_era: EraConfig,
    pub bottom_era: EraConfig,
    pub viewport: ViewportConfig,
    pub cards: CardConfig,
    pub markers: MarkerConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_left: 50.0,
            margin_top: 20.0,
            track_gap: 60.0,
            axis_gap: 34.0,
            title_height: 40.0,
            label_line_height: 1.5,
            max_label_width_chars: 22,
            fast_text_metrics: false,
            collision_policy: CollisionPolicy::TrackGlobal,
            top_era: EraConfig {
                start: 1920,
                end: 1950,
                label: "Track A (1920-1950)".to_string(),
            },
            bottom_era: EraConfig {
                start: 2000,
                end: 2030,
                label: "Track B (2000-2030)".to_string(),
            },
            viewport: ViewportConfig::default(),
            cards: CardConfig::default(),
            markers: MarkerConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{track} era is empty: start {start} must be before end {end}")]
    EmptyEra {
        track: &'static str,
        start: i32,
        end: i32,
    },
    #[error("zoom bounds are invalid: minZoom {min} must be positive and not above maxZoom {max}")]
    ZoomBounds { min: f32, max: f32 },
    #[error("pixelsPerYear {value} lies outside the zoom bounds [{min}, {max}]")]
    InitialZoomOutOfBounds { value: f32, min: f32, max: f32 },
    #[error("card width must be positive, got {0}")]
    CardWidth(f32),
    #[error("card vertical spacing must be positive, got {0}")]
    VerticalSpacing(f32),
    #[error("collision fraction must be in (0, 1], got {0}")]
    CollisionFraction(f32),
    #[error("marker interval must be at least 1 year, got {0}")]
    MarkerInterval(i32),
}

impl LayoutConfig {
    /// Rejects invalid configuration before any layout runs. A failure here
    /// is fatal to startup, never recovered mid-session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, era) in [("top", &self.top_era), ("bottom", &self.bottom_era)] {
            if era.start >= era.end {
                return Err(ConfigError::EmptyEra {
                    track: name,
                    start: era.start,
                    end: era.end,
                });
            }
        }
        let vp = &self.viewport;
        if vp.min_zoom <= 0.0 || vp.min_zoom > vp.max_zoom {
            return Err(ConfigError::ZoomBounds {
                min: vp.min_zoom,
                max: vp.max_zoom,
            });
        }
        if vp.pixels_per_year < vp.min_zoom || vp.pixels_per_year > vp.max_zoom {
            return Err(ConfigError::InitialZoomOutOfBounds {
                value: vp.pixels_per_year,
                min: vp.min_zoom,
                max: vp.max_zoom,
            });
        }
        if self.cards.width <= 0.0 {
            return Err(ConfigError::CardWidth(self.cards.width));
        }
        if self.cards.vertical_spacing <= 0.0 {
            return Err(ConfigError::VerticalSpacing(self.cards.vertical_spacing));
        }
        if self.cards.collision_fraction <= 0.0 || self.cards.collision_fraction > 1.0 {
            return Err(ConfigError::CollisionFraction(self.cards.collision_fraction));
        }
        if self.markers.interval < 1 {
            return Err(ConfigError::MarkerInterval(self.markers.interval));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::modern();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    top_card_color: Option<String>,
    top_card_border_color: Option<String>,
    bottom_card_color: Option<String>,
    bottom_card_border_color: Option<String>,
    card_text_color: Option<String>,
    date_text_color: Option<String>,
    axis_color: Option<String>,
    marker_color: Option<String>,
    marker_label_color: Option<String>,
    era_band_top_color: Option<String>,
    era_band_bottom_color: Option<String>,
    era_label_color: Option<String>,
    title_color: Option<String>,
    accent_fallback_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EraFile {
    start: Option<i32>,
    end: Option<i32>,
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewportFile {
    pixels_per_year: Option<f32>,
    min_zoom: Option<f32>,
    max_zoom: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardsFile {
    width: Option<f32>,
    min_height: Option<f32>,
    collision_fraction: Option<f32>,
    base_offset: Option<f32>,
    vertical_spacing: Option<f32>,
    padding_x: Option<f32>,
    padding_y: Option<f32>,
    corner_radius: Option<f32>,
    accent_width: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkersFile {
    interval: Option<i32>,
    tick_length: Option<f32>,
    label_gap: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutFile {
    margin_left: Option<f32>,
    margin_top: Option<f32>,
    track_gap: Option<f32>,
    axis_gap: Option<f32>,
    title_height: Option<f32>,
    label_line_height: Option<f32>,
    max_label_width_chars: Option<usize>,
    fast_text_metrics: Option<bool>,
    collision_policy: Option<CollisionPolicy>,
    top_era: Option<EraFile>,
    bottom_era: Option<EraFile>,
    viewport: Option<ViewportFile>,
    cards: Option<CardsFile>,
    markers: Option<MarkersFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutFile>,
    render: Option<RenderFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderFile {
    width: Option<f32>,
    height: Option<f32>,
    background: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        config.layout.validate()?;
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "classic" {
            config.theme = Theme::classic();
        } else if theme_name == "modern" || theme_name == "default" {
            config.theme = Theme::modern();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }
    if let Some(layout) = parsed.layout {
        apply_layout_overrides(&mut config.layout, layout);
    }
    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    config.layout.validate()?;
    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(v) = vars.top_card_color {
        theme.top_card_color = v;
    }
    if let Some(v) = vars.top_card_border_color {
        theme.top_card_border_color = v;
    }
    if let Some(v) = vars.bottom_card_color {
        theme.bottom_card_color = v;
    }
    if let Some(v) = vars.bottom_card_border_color {
        theme.bottom_card_border_color = v;
    }
    if let Some(v) = vars.card_text_color {
        theme.card_text_color = v;
    }
    if let Some(v) = vars.date_text_color {
        theme.date_text_color = v;
    }
    if let Some(v) = vars.axis_color {
        theme.axis_color = v;
    }
    if let Some(v) = vars.marker_color {
        theme.marker_color = v;
    }
    if let Some(v) = vars.marker_label_color {
        theme.marker_label_color = v;
    }
    if let Some(v) = vars.era_band_top_color {
        theme.era_band_top_color = v;
    }
    if let Some(v) = vars.era_band_bottom_color {
        theme.era_band_bottom_color = v;
    }
    if let Some(v) = vars.era_label_color {
        theme.era_label_color = v;
    }
    if let Some(v) = vars.title_color {
        theme.title_color = v;
    }
    if let Some(v) = vars.accent_fallback_color {
        theme.accent_fallback_color = v;
    }
}

fn apply_layout_overrides(layout: &mut LayoutConfig, file: LayoutFile) {
    if let Some(v) = file.margin_left {
        layout.margin_left = v;
    }
    if let Some(v) = file.margin_top {
        layout.margin_top = v;
    }
    if let Some(v) = file.track_gap {
        layout.track_gap = v;
    }
    if let Some(v) = file.axis_gap {
        layout.axis_gap = v;
    }
    if let Some(v) = file.title_height {
        layout.title_height = v;
    }
    if let Some(v) = file.label_line_height {
        layout.label_line_height = v;
    }
    if let Some(v) = file.max_label_width_chars {
        layout.max_label_width_chars = v;
    }
    if let Some(v) = file.fast_text_metrics {
        layout.fast_text_metrics = v;
    }
    if let Some(v) = file.collision_policy {
        layout.collision_policy = v;
    }
    if let Some(era) = file.top_era {
        apply_era_overrides(&mut layout.top_era, era);
    }
    if let Some(era) = file.bottom_era {
        apply_era_overrides(&mut layout.bottom_era, era);
    }
    if let Some(vp) = file.viewport {
        if let Some(v) = vp.pixels_per_year {
            layout.viewport.pixels_per_year = v;
        }
        if let Some(v) = vp.min_zoom {
            layout.viewport.min_zoom = v;
        }
        if let Some(v) = vp.max_zoom {
            layout.viewport.max_zoom = v;
        }
    }
    if let Some(cards) = file.cards {
        if let Some(v) = cards.width {
            layout.cards.width = v;
        }
        if let Some(v) = cards.min_height {
            layout.cards.min_height = v;
        }
        if let Some(v) = cards.collision_fraction {
            layout.cards.collision_fraction = v;
        }
        if let Some(v) = cards.base_offset {
            layout.cards.base_offset = v;
        }
        if let Some(v) = cards.vertical_spacing {
            layout.cards.vertical_spacing = v;
        }
        if let Some(v) = cards.padding_x {
            layout.cards.padding_x = v;
        }
        if let Some(v) = cards.padding_y {
            layout.cards.padding_y = v;
        }
        if let Some(v) = cards.corner_radius {
            layout.cards.corner_radius = v;
        }
        if let Some(v) = cards.accent_width {
            layout.cards.accent_width = v;
        }
    }
    if let Some(markers) = file.markers {
        if let Some(v) = markers.interval {
            layout.markers.interval = v;
        }
        if let Some(v) = markers.tick_length {
            layout.markers.tick_length = v;
        }
        if let Some(v) = markers.label_gap {
            layout.markers.label_gap = v;
        }
    }
}

fn apply_era_overrides(era: &mut EraConfig, file: EraFile) {
    if let Some(v) = file.start {
        era.start = v;
    }
    if let Some(v) = file.end {
        era.end = v;
    }
    if let Some(v) = file.label {
        era.label = v;
    }
}
