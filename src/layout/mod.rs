mod lanes;
mod markers;
mod text;
mod transform;
pub(crate) mod types;

pub use lanes::assign_lanes;
pub use markers::era_markers;
pub use transform::pixel_x;
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::{Dataset, Event, Track};
use crate::theme::Theme;
use crate::viewport::Viewport;
use std::collections::HashMap;

/// Full recompute of both track bands. Pure: reads the dataset, config, and
/// viewport, produces placement data only. Every render trigger (initial
/// load, pan, zoom, data change) goes through here again; nothing is cached
/// between passes.
pub fn compute_layout(
    dataset: &Dataset,
    theme: &Theme,
    config: &LayoutConfig,
    viewport: Viewport,
) -> Layout {
    let title = dataset
        .title
        .as_ref()
        .map(|t| text::measure_label(t, f32::MAX, theme, config));

    let mut cursor_y = config.margin_top;
    let title_y = cursor_y + theme.font_size;
    if title.is_some() {
        cursor_y += config.title_height;
    }

    let mut tracks = Vec::with_capacity(2);
    for (track, era) in [
        (Track::Top, &config.top_era),
        (Track::Bottom, &config.bottom_era),
    ] {
        let band = compute_track(dataset, track, era, theme, config, viewport, cursor_y);
        cursor_y = band.band_y + band.band_height + config.track_gap;
        tracks.push(band);
    }

    let height = cursor_y - config.track_gap + config.margin_top;
    let width = content_width(&tracks, config);

    Layout {
        title,
        title_y,
        tracks,
        width,
        height,
    }
}

fn compute_track(
    dataset: &Dataset,
    track: Track,
    era: &crate::config::EraConfig,
    theme: &Theme,
    config: &LayoutConfig,
    viewport: Viewport,
    band_y: f32,
) -> TrackLayout {
    let events = dataset.events_for(track);
    let by_id: HashMap<u64, &Event> = events.iter().map(|e| (e.id, *e)).collect();
    let placed = lanes::assign_lanes(&events, era, viewport, config);

    let axis_y = band_y + config.axis_gap;
    let interior = (config.cards.width - 2.0 * config.cards.padding_x).max(theme.font_size);
    let date_line = theme.font_size * config.label_line_height;

    let mut cards = Vec::with_capacity(placed.len());
    let mut content_bottom = config.cards.base_offset + config.cards.min_height;
    let mut lane_count = 0usize;

    for slot in placed {
        let event = by_id[&slot.event_id];
        let title_block = text::measure_label(&event.title, interior, theme, config);
        let height = (title_block.height + date_line + 2.0 * config.cards.padding_y)
            .max(config.cards.min_height);
        content_bottom = content_bottom.max(slot.y + height);
        lane_count = lane_count.max(slot.lane + 1);
        cards.push(CardLayout {
            event_id: event.id,
            x: slot.x,
            y: axis_y + slot.y,
            lane: slot.lane,
            width: config.cards.width,
            height,
            title: title_block,
            date_label: event
                .date_label
                .clone()
                .unwrap_or_else(|| event.year.to_string()),
            kind: event.kind,
            accent_color: event
                .tags
                .first()
                .and_then(|tag| dataset.tag_color(*tag))
                .map(str::to_string),
        });
    }

    TrackLayout {
        track,
        era_label: text::measure_label(&era.label, f32::MAX, theme, config),
        band_y,
        band_height: config.axis_gap + content_bottom + config.cards.base_offset,
        axis_y,
        lane_count,
        markers: markers::era_markers(era, viewport, config),
        cards,
    }
}

fn content_width(tracks: &[TrackLayout], config: &LayoutConfig) -> f32 {
    let mut extent = 0.0f32;
    for track in tracks {
        for marker in &track.markers {
            extent = extent.max(marker.x);
        }
        for card in &track.cards {
            extent = extent.max(card.x + card.width);
        }
    }
    extent + config.margin_left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{EventKind, TagDef};

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.title = Some("Comparison".to_string());
        dataset.tags.insert(
            1,
            TagDef {
                id: 1,
                name: "Infrastructure".to_string(),
                color: "#B22222".to_string(),
            },
        );
        for (id, year, track) in [
            (1u64, 1933, Track::Top),
            (2, 1933, Track::Top),
            (3, 1947, Track::Top),
            (4, 2013, Track::Bottom),
        ] {
            dataset.events.push(Event {
                id,
                year,
                track,
                date: None,
                date_label: None,
                title: format!("event {id}"),
                description: String::new(),
                image: None,
                video: None,
                kind: EventKind::Circle,
                tags: vec![1],
            });
        }
        dataset
    }

    fn viewport(config: &LayoutConfig) -> Viewport {
        Viewport::initial(&config.viewport)
    }

    #[test]
    fn bands_stack_top_then_bottom() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&dataset(), &Theme::modern(), &config, viewport(&config));
        assert_eq!(layout.tracks.len(), 2);
        let top = &layout.tracks[0];
        let bottom = &layout.tracks[1];
        assert_eq!(top.track, Track::Top);
        assert_eq!(bottom.track, Track::Bottom);
        assert!(bottom.band_y >= top.band_y + top.band_height);
        assert!(layout.height >= bottom.band_y + bottom.band_height);
    }

    #[test]
    fn cards_stay_inside_their_band() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&dataset(), &Theme::modern(), &config, viewport(&config));
        for track in &layout.tracks {
            for card in &track.cards {
                assert!(card.y >= track.band_y);
                assert!(card.y + card.height <= track.band_y + track.band_height);
            }
        }
    }

    #[test]
    fn repeated_passes_are_identical() {
        let config = LayoutConfig::default();
        let data = dataset();
        let first = compute_layout(&data, &Theme::modern(), &config, viewport(&config));
        let second = compute_layout(&data, &Theme::modern(), &config, viewport(&config));
        let extract = |layout: &Layout| -> Vec<(u64, usize, String)> {
            layout
                .tracks
                .iter()
                .flat_map(|t| {
                    t.cards
                        .iter()
                        .map(|c| (c.event_id, c.lane, format!("{:.3},{:.3}", c.x, c.y)))
                })
                .collect()
        };
        assert_eq!(extract(&first), extract(&second));
    }

    #[test]
    fn aligned_years_share_x_across_tracks() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&dataset(), &Theme::modern(), &config, viewport(&config));
        let top_card = layout.tracks[0]
            .cards
            .iter()
            .find(|c| c.event_id == 1)
            .unwrap();
        let bottom_card = layout.tracks[1]
            .cards
            .iter()
            .find(|c| c.event_id == 4)
            .unwrap();
        // 1933 is 13 years into 1920-1950; 2013 is 13 years into 2000-2030.
        assert!((top_card.x - bottom_card.x).abs() < 1e-3);
    }

    #[test]
    fn accent_color_comes_from_the_first_tag() {
        let config = LayoutConfig::default();
        let layout = compute_layout(&dataset(), &Theme::modern(), &config, viewport(&config));
        let card = &layout.tracks[0].cards[0];
        assert_eq!(card.accent_color.as_deref(), Some("#B22222"));
    }

    #[test]
    fn band_height_grows_with_lanes() {
        let config = LayoutConfig::default();
        let mut sparse = dataset();
        sparse.events.retain(|e| e.id == 1 || e.id == 4);
        let short = compute_layout(&sparse, &Theme::modern(), &config, viewport(&config));
        let tall = compute_layout(&dataset(), &Theme::modern(), &config, viewport(&config));
        assert!(tall.tracks[0].band_height > short.tracks[0].band_height);
        assert_eq!(tall.tracks[0].lane_count, 2);
    }
}
