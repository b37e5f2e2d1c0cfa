use std::path::Path;

use twin_timeline_renderer::config::LayoutConfig;
use twin_timeline_renderer::ir::{Dataset, Track};
use twin_timeline_renderer::layout::compute_layout;
use twin_timeline_renderer::parser::parse_dataset;
use twin_timeline_renderer::render::render_svg;
use twin_timeline_renderer::theme::Theme;
use twin_timeline_renderer::viewport::Viewport;

fn load_fixture(name: &str) -> Dataset {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_dataset(&input).expect("fixture parse failed")
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let fixtures = ["basic.json5", "dense.json5", "empty.json5"];
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for fixture in fixtures {
        let dataset = load_fixture(fixture);
        let viewport = Viewport::initial(&config.viewport);
        let layout = compute_layout(&dataset, &theme, &config, viewport);
        let svg = render_svg(&layout, &theme, &config);
        assert_valid_svg(&svg, fixture);
    }
}

#[test]
fn basic_fixture_renders_expected_labels() {
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    let dataset = load_fixture("basic.json5");
    let viewport = Viewport::initial(&config.viewport);
    let layout = compute_layout(&dataset, &theme, &config, viewport);
    let svg = render_svg(&layout, &theme, &config);
    assert!(svg.contains("Rail vs. Rocketry"));
    assert!(svg.contains("Night mail service opens") || svg.contains("Night mail"));
    assert!(svg.contains("Feb 1933"));
    assert!(svg.contains("1920"), "top era start marker missing");
    assert!(svg.contains("2030"), "bottom era end marker missing");
}

#[test]
fn aligned_era_offsets_share_x_under_any_viewport() {
    let config = LayoutConfig::default();
    let theme = Theme::modern();
    let dataset = load_fixture("basic.json5");

    for (zoom_factor, pan) in [(1.0, 0.0), (1.2, -250.0), (0.8, 512.0)] {
        let viewport = Viewport::initial(&config.viewport)
            .zoomed(zoom_factor, &config.viewport)
            .panned(pan);
        let layout = compute_layout(&dataset, &theme, &config, viewport);
        // Event 2 (1933, 13 years into 1920-1950) must line up with
        // event 5 (2013, 13 years into 2000-2030).
        let top = layout.tracks[0]
            .cards
            .iter()
            .find(|c| c.event_id == 2)
            .expect("top card");
        let bottom = layout.tracks[1]
            .cards
            .iter()
            .find(|c| c.event_id == 5)
            .expect("bottom card");
        assert!(
            (top.x - bottom.x).abs() < 1e-3,
            "misaligned at zoom {zoom_factor} pan {pan}: {} vs {}",
            top.x,
            bottom.x
        );
    }
}

#[test]
fn dense_fixture_stacks_same_year_events_by_id() {
    let config = LayoutConfig::default();
    let theme = Theme::modern();
    let dataset = load_fixture("dense.json5");
    let viewport = Viewport::initial(&config.viewport);
    let layout = compute_layout(&dataset, &theme, &config, viewport);
    let track = &layout.tracks[0];

    let lane_of = |id: u64| {
        track
            .cards
            .iter()
            .find(|c| c.event_id == id)
            .map(|c| c.lane)
            .expect("card")
    };
    assert_eq!(lane_of(10), 0);
    assert_eq!(lane_of(20), 1);
    assert_eq!(lane_of(30), 2);

    let y_of = |id: u64| {
        track
            .cards
            .iter()
            .find(|c| c.event_id == id)
            .map(|c| c.y)
            .expect("card")
    };
    assert!(y_of(10) < y_of(20) && y_of(20) < y_of(30));
}

#[test]
fn same_lane_cards_keep_their_distance() {
    let config = LayoutConfig::default();
    let theme = Theme::modern();
    let dataset = load_fixture("dense.json5");
    let viewport = Viewport::initial(&config.viewport);
    let layout = compute_layout(&dataset, &theme, &config, viewport);
    let threshold = config.cards.width * config.cards.collision_fraction;

    for track in &layout.tracks {
        for a in &track.cards {
            for b in &track.cards {
                if a.event_id != b.event_id && a.lane == b.lane {
                    assert!(
                        (a.x - b.x).abs() >= threshold,
                        "cards {} and {} too close in lane {}",
                        a.event_id,
                        b.event_id,
                        a.lane
                    );
                }
            }
        }
    }
}

#[test]
fn empty_fixture_yields_no_cards() {
    let config = LayoutConfig::default();
    let theme = Theme::modern();
    let dataset = load_fixture("empty.json5");
    let viewport = Viewport::initial(&config.viewport);
    let layout = compute_layout(&dataset, &theme, &config, viewport);
    assert_eq!(layout.tracks.len(), 2);
    assert!(layout.tracks.iter().all(|t| t.cards.is_empty()));
    // Era markers still render so the empty chart keeps its axes.
    assert!(layout.tracks.iter().all(|t| !t.markers.is_empty()));
}

#[test]
fn recompute_after_viewport_change_is_full_and_consistent() {
    let config = LayoutConfig::default();
    let theme = Theme::modern();
    let dataset = load_fixture("basic.json5");
    let initial = Viewport::initial(&config.viewport);
    let before = compute_layout(&dataset, &theme, &config, initial);

    let panned = initial.panned(300.0);
    let after = compute_layout(&dataset, &theme, &config, panned);
    for (track_before, track_after) in before.tracks.iter().zip(&after.tracks) {
        for (a, b) in track_before.cards.iter().zip(&track_after.cards) {
            assert_eq!(a.event_id, b.event_id);
            assert!((b.x - a.x - 300.0).abs() < 1e-3, "pan must shift every card");
            assert_eq!(a.lane, b.lane, "pan alone must not reshuffle lanes");
        }
    }

    // Returning to the original viewport reproduces the original placement.
    let back = compute_layout(&dataset, &theme, &config, panned.panned(-300.0));
    for (track_before, track_back) in before.tracks.iter().zip(&back.tracks) {
        for (a, b) in track_before.cards.iter().zip(&track_back.cards) {
            assert!((a.x - b.x).abs() < 1e-3);
            assert_eq!(a.lane, b.lane);
        }
    }
}

#[test]
fn tracks_filter_events_strictly() {
    let dataset = load_fixture("basic.json5");
    let top = dataset.events_for(Track::Top);
    let bottom = dataset.events_for(Track::Bottom);
    assert_eq!(top.len() + bottom.len(), dataset.events.len());
    assert!(top.iter().all(|e| e.track == Track::Top));
    assert!(bottom.iter().all(|e| e.track == Track::Bottom));
}
