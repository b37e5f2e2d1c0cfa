use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::{EventKind, Track};
use crate::layout::{CardLayout, Layout, TrackLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    if let Some(title) = &layout.title {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            width / 2.0,
            layout.title_y,
            theme.font_family,
            theme.font_size * 1.25,
            theme.title_color,
            escape_xml(&title.lines.join(" "))
        ));
    }

    for track in &layout.tracks {
        svg.push_str(&track_svg(track, width, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn track_svg(track: &TrackLayout, width: f32, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        "<rect x=\"0\" y=\"{:.2}\" width=\"{width:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        track.band_y,
        track.band_height,
        theme.era_band_color(track.track)
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        config.margin_left,
        track.band_y + theme.font_size + 2.0,
        theme.font_family,
        theme.font_size,
        theme.era_label_color,
        escape_xml(&track.era_label.lines.join(" "))
    ));

    if let (Some(first), Some(last)) = (track.markers.first(), track.markers.last()) {
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"2\"/>",
            first.x, track.axis_y, last.x, track.axis_y, theme.axis_color
        ));
    }

    let half_tick = config.markers.tick_length / 2.0;
    // Top-track marker labels sit above the axis, bottom-track below.
    let label_y = match track.track {
        Track::Top => track.axis_y - config.markers.label_gap,
        Track::Bottom => track.axis_y + config.markers.label_gap,
    };
    for marker in &track.markers {
        svg.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{y1:.2}\" x2=\"{x:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            theme.marker_color,
            x = marker.x,
            y1 = track.axis_y - half_tick,
            y2 = track.axis_y + half_tick,
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            marker.x,
            label_y,
            theme.font_family,
            theme.font_size * 0.85,
            theme.marker_label_color,
            marker.year
        ));
    }

    for card in &track.cards {
        svg.push_str(&card_svg(card, track.track, theme, config));
    }

    svg
}

fn card_svg(card: &CardLayout, track: Track, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let (fill, border) = theme.card_color(track);
    let cards = &config.cards;

    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.1}\" ry=\"{:.1}\" fill=\"{fill}\" stroke=\"{border}\" stroke-width=\"1.4\"/>",
        card.x, card.y, card.width, card.height, cards.corner_radius, cards.corner_radius
    ));

    let accent = card
        .accent_color
        .as_deref()
        .unwrap_or(theme.accent_fallback_color.as_str());
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{accent}\"/>",
        card.x + 1.0,
        card.y + 1.0,
        cards.accent_width,
        card.height - 2.0,
    ));

    let text_x = card.x + cards.padding_x;
    let line_height = theme.font_size * config.label_line_height;
    let mut line_y = card.y + cards.padding_y + theme.font_size;
    for line in &card.title.lines {
        svg.push_str(&format!(
            "<text x=\"{text_x:.2}\" y=\"{line_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            theme.font_family,
            theme.font_size,
            theme.card_text_color,
            escape_xml(line)
        ));
        line_y += line_height;
    }

    let date_y = card.y + card.height - cards.padding_y;
    let glyph_size = theme.font_size * 0.55;
    svg.push_str(&kind_glyph_svg(
        card.kind,
        text_x + glyph_size / 2.0,
        date_y - glyph_size / 2.0,
        glyph_size,
        accent,
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{date_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        text_x + glyph_size + 5.0,
        theme.font_family,
        theme.font_size * 0.85,
        theme.date_text_color,
        escape_xml(&card.date_label)
    ));

    svg
}

fn kind_glyph_svg(kind: EventKind, cx: f32, cy: f32, size: f32, color: &str) -> String {
    let half = size / 2.0;
    match kind {
        EventKind::Circle => format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{half:.2}\" fill=\"{color}\"/>"
        ),
        EventKind::Rect | EventKind::BigRect => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{size:.2}\" height=\"{size:.2}\" fill=\"{color}\"/>",
            cx - half,
            cy - half
        ),
        EventKind::SmallRect => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{color}\"/>",
            cx - half * 0.7,
            cy - half * 0.7,
            size * 0.7,
            size * 0.7
        ),
        EventKind::Diamond => format!(
            "<path d=\"M {cx:.2} {:.2} L {:.2} {cy:.2} L {cx:.2} {:.2} L {:.2} {cy:.2} Z\" fill=\"{color}\"/>",
            cy - half,
            cx + half,
            cy + half,
            cx - half
        ),
        EventKind::VerticalRect => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{size:.2}\" fill=\"{color}\"/>",
            cx - half * 0.5,
            cy - half,
            size * 0.5
        ),
        EventKind::VerticalDot => {
            let r = size / 6.0;
            let mut dots = String::new();
            for step in [-1.0f32, 0.0, 1.0] {
                dots.push_str(&format!(
                    "<circle cx=\"{cx:.2}\" cy=\"{:.2}\" r=\"{r:.2}\" fill=\"{color}\"/>",
                    cy + step * (half - r)
                ));
            }
            dots
        }
        EventKind::Flag => format!(
            "<path d=\"M {:.2} {:.2} v {size:.2} m 0 -{size:.2} h {size:.2} l -{:.2} {half:.2} l {:.2} {half:.2} h -{size:.2}\" stroke=\"{color}\" fill=\"none\" stroke-width=\"1.2\"/>",
            cx - half,
            cy - half,
            size * 0.3,
            size * 0.3
        ),
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(1200.0, 800.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature; rebuild with --features png"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Dataset, Event, Track};
    use crate::layout::compute_layout;
    use crate::viewport::Viewport;

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.title = Some("Two Eras".to_string());
        dataset.events.push(Event {
            id: 1,
            year: 1933,
            track: Track::Top,
            date: None,
            date_label: Some("Feb 1933".to_string()),
            title: "Night mail & post".to_string(),
            description: String::new(),
            image: None,
            video: None,
            kind: EventKind::Circle,
            tags: Vec::new(),
        });
        dataset.events.push(Event {
            id: 2,
            year: 2013,
            track: Track::Bottom,
            date: None,
            date_label: None,
            title: "Reusable booster test".to_string(),
            description: String::new(),
            image: None,
            video: None,
            kind: EventKind::Diamond,
            tags: Vec::new(),
        });
        dataset
    }

    #[test]
    fn render_svg_basic() {
        let config = LayoutConfig::default();
        let theme = Theme::modern();
        let viewport = Viewport::initial(&config.viewport);
        let layout = compute_layout(&dataset(), &theme, &config, viewport);
        let svg = render_svg(&layout, &theme, &config);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Two Eras"));
        assert!(svg.contains("Night mail"));
        assert!(svg.contains("&amp;"), "ampersand must be escaped");
        assert!(svg.contains("Feb 1933"));
        // The second event has no exact date, so the year stands in.
        assert!(svg.contains(">2013</text>"));
        assert!(svg.contains("1920"));
    }

    #[test]
    fn render_is_idempotent() {
        let config = LayoutConfig::default();
        let theme = Theme::modern();
        let viewport = Viewport::initial(&config.viewport);
        let data = dataset();
        let first = render_svg(&compute_layout(&data, &theme, &config, viewport), &theme, &config);
        let second = render_svg(&compute_layout(&data, &theme, &config, viewport), &theme, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn escape_xml_covers_reserved_characters() {
        assert_eq!(escape_xml("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
    }
}
