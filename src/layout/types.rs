use crate::ir::{EventKind, Track};

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// Raw output of the lane assignment engine. `y` is relative to the track
/// band's card region; `CardLayout` carries the absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCard {
    pub event_id: u64,
    pub x: f32,
    pub y: f32,
    pub lane: usize,
}

#[derive(Debug, Clone)]
pub struct CardLayout {
    pub event_id: u64,
    pub x: f32,
    pub y: f32,
    pub lane: usize,
    pub width: f32,
    pub height: f32,
    pub title: TextBlock,
    pub date_label: String,
    pub kind: EventKind,
    pub accent_color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MarkerLayout {
    pub year: i32,
    pub x: f32,
}

#[derive(Debug, Clone)]
pub struct TrackLayout {
    pub track: Track,
    pub era_label: TextBlock,
    pub band_y: f32,
    pub band_height: f32,
    pub axis_y: f32,
    pub lane_count: usize,
    pub markers: Vec<MarkerLayout>,
    pub cards: Vec<CardLayout>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub title: Option<TextBlock>,
    pub title_y: f32,
    pub tracks: Vec<TrackLayout>,
    pub width: f32,
    pub height: f32,
}
