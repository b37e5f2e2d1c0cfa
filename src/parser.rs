use crate::ir::{Dataset, Event, EventKind, TagDef, Track};
use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetFile {
    title: Option<String>,
    #[serde(default)]
    tags: Vec<TagRecord>,
    #[serde(default)]
    events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagRecord {
    id: u32,
    name: String,
    color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    id: Option<u64>,
    year: Option<i32>,
    #[serde(alias = "track")]
    position: Option<String>,
    date: Option<String>,
    title: Option<String>,
    #[serde(default)]
    description: String,
    image: Option<String>,
    video: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    tags: Vec<u32>,
}

/// Parses a dataset from JSON5 (a superset of JSON, so plain JSON files work
/// unchanged). Malformed events are rejected here; the layout stage assumes
/// only well-formed records reach it.
pub fn parse_dataset(input: &str) -> Result<Dataset> {
    let file: DatasetFile = json5::from_str(input)?;

    let mut tags = BTreeMap::new();
    for tag in file.tags {
        if tags
            .insert(
                tag.id,
                TagDef {
                    id: tag.id,
                    name: tag.name,
                    color: tag.color,
                },
            )
            .is_some()
        {
            bail!("duplicate tag id {}", tag.id);
        }
    }

    let mut events = Vec::with_capacity(file.events.len());
    let mut seen_ids = std::collections::HashSet::new();
    for (index, record) in file.events.into_iter().enumerate() {
        let event = validate_event(index, record, &tags)?;
        if !seen_ids.insert(event.id) {
            bail!("duplicate event id {}", event.id);
        }
        events.push(event);
    }

    Ok(Dataset {
        title: file.title,
        events,
        tags,
    })
}

fn validate_event(index: usize, record: EventRecord, tags: &BTreeMap<u32, TagDef>) -> Result<Event> {
    let Some(id) = record.id else {
        bail!("event #{index}: missing id");
    };
    let Some(year) = record.year else {
        bail!("event {id}: missing year");
    };
    let Some(position) = record.position.as_deref() else {
        bail!("event {id}: missing position");
    };
    let Some(track) = Track::from_token(position) else {
        bail!("event {id}: unknown position {position:?} (expected top/a or bottom/b)");
    };
    let Some(title) = record.title else {
        bail!("event {id}: missing title");
    };
    for tag in &record.tags {
        if !tags.contains_key(tag) {
            bail!("event {id}: references undefined tag {tag}");
        }
    }

    let date = match record.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_civil_date(raw).ok_or_else(|| {
            anyhow::anyhow!("event {id}: invalid date {raw:?} (expected YYYY-MM-DD)")
        })?),
    };
    let date_label = date.map(format_month_year);

    let kind = record
        .kind
        .as_deref()
        .and_then(EventKind::from_token)
        .unwrap_or(EventKind::Flag);

    Ok(Event {
        id,
        year,
        track,
        date,
        date_label,
        title,
        description: record.description,
        image: non_empty(record.image),
        video: non_empty(record.video),
        kind,
        tags: record.tags,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_civil_date(value: &str) -> Option<i32> {
    let caps = DATE_RE.captures(value)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    if month == 0 || month > 12 || day == 0 || day > 31 {
        return None;
    }
    Some(days_from_civil(year, month, day))
}

fn days_from_civil(year: i32, month: u32, day: u32) -> i32 {
    let y = year - (month <= 2) as i32;
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = month as i32;
    let d = day as i32;
    let doy = (153 * (m + if m > 2 { -3 } else { 9 }) + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

fn civil_from_days(days: i32) -> (i32, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = mp + if mp < 10 { 3 } else { -9 };
    let year = y + (m <= 2) as i32;
    (year, m as u32, d as u32)
}

fn format_month_year(days: i32) -> String {
    let (year, month, _) = civil_from_days(days);
    format!("{} {}", MONTH_ABBREV[(month - 1) as usize], year)
}
