use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Track {
    Top,
    Bottom,
}

impl Track {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "top" | "a" => Some(Self::Top),
            "bottom" | "b" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Circle,
    Rect,
    SmallRect,
    BigRect,
    Diamond,
    VerticalRect,
    VerticalDot,
    Flag,
}

impl EventKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "circle" => Some(Self::Circle),
            "rect" => Some(Self::Rect),
            "smallrect" => Some(Self::SmallRect),
            "bigrect" => Some(Self::BigRect),
            "diamond" => Some(Self::Diamond),
            "vertical_rect" => Some(Self::VerticalRect),
            "vertical_dot" => Some(Self::VerticalDot),
            "flag" | "default" => Some(Self::Flag),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagDef {
    pub id: u32,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub id: u64,
    pub year: i32,
    pub track: Track,
    /// Exact calendar date in civil-days encoding, when the record carried one.
    /// Placement uses `year` only.
    pub date: Option<i32>,
    pub date_label: Option<String>,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub kind: EventKind,
    pub tags: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub title: Option<String>,
    pub events: Vec<Event>,
    pub tags: BTreeMap<u32, TagDef>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events_for(&self, track: Track) -> Vec<&Event> {
        self.events.iter().filter(|e| e.track == track).collect()
    }

    pub fn tag_color(&self, id: u32) -> Option<&str> {
        self.tags.get(&id).map(|tag| tag.color.as_str())
    }
}
