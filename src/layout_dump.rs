use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub title: Option<String>,
    pub tracks: Vec<TrackDump>,
}

#[derive(Debug, Serialize)]
pub struct TrackDump {
    pub track: String,
    pub band_y: f32,
    pub band_height: f32,
    pub axis_y: f32,
    pub lane_count: usize,
    pub markers: Vec<MarkerDump>,
    pub cards: Vec<CardDump>,
}

#[derive(Debug, Serialize)]
pub struct MarkerDump {
    pub year: i32,
    pub x: f32,
}

#[derive(Debug, Serialize)]
pub struct CardDump {
    pub event_id: u64,
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub date_label: String,
    pub title_lines: Vec<String>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let tracks = layout
            .tracks
            .iter()
            .map(|track| TrackDump {
                track: track.track.as_str().to_string(),
                band_y: track.band_y,
                band_height: track.band_height,
                axis_y: track.axis_y,
                lane_count: track.lane_count,
                markers: track
                    .markers
                    .iter()
                    .map(|m| MarkerDump { year: m.year, x: m.x })
                    .collect(),
                cards: track
                    .cards
                    .iter()
                    .map(|card| CardDump {
                        event_id: card.event_id,
                        lane: card.lane,
                        x: card.x,
                        y: card.y,
                        width: card.width,
                        height: card.height,
                        date_label: card.date_label.clone(),
                        title_lines: card.title.lines.clone(),
                    })
                    .collect(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            title: layout
                .title
                .as_ref()
                .map(|block| block.lines.join(" ")),
            tracks,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
