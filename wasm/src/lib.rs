use serde::Deserialize;
use twin_timeline_renderer::config::Config;
use twin_timeline_renderer::layout::compute_layout;
use twin_timeline_renderer::parser::parse_dataset;
use twin_timeline_renderer::render::render_svg;
use twin_timeline_renderer::theme::Theme;
use twin_timeline_renderer::viewport::Viewport;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    fast_text: Option<bool>,
    zoom_scale: Option<f32>,
    pan_offset: Option<f32>,
}

fn build_config(options: &TimelineRenderOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("classic") {
        config.theme = Theme::classic();
    }
    if let Some(font_family) = options.font_family.clone() {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    // Browser hosts have no system font database; default to fast metrics.
    config.layout.fast_text_metrics = options.fast_text.unwrap_or(true);
    config
}

fn build_viewport(options: &TimelineRenderOptions, config: &Config) -> Viewport {
    let mut viewport = Viewport::initial(&config.layout.viewport);
    if let Some(scale) = options.zoom_scale {
        viewport = viewport.with_zoom(scale, &config.layout.viewport);
    }
    if let Some(offset) = options.pan_offset {
        viewport = viewport.panned(offset);
    }
    viewport
}

/// Renders a timeline dataset to SVG. The host owns the interaction state:
/// it passes the current zoom scale and pan offset on every call and swaps
/// the returned SVG into the page, giving the full-recompute-per-gesture
/// behavior of the original browser app.
#[wasm_bindgen]
pub fn render_timeline_svg(
    events_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TimelineRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TimelineRenderOptions::default()
    };

    let config = build_config(&options);
    config
        .layout
        .validate()
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let dataset =
        parse_dataset(events_json).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let viewport = build_viewport(&options, &config);
    let layout = compute_layout(&dataset, &config.theme, &config.layout, viewport);
    Ok(render_svg(&layout, &config.theme, &config.layout))
}
