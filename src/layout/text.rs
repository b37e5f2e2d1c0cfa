use crate::config::LayoutConfig;
use crate::text_metrics;
use crate::theme::Theme;

use super::TextBlock;

/// Measures a label and word-wraps it into `max_width` pixels. `max_width`
/// is additionally capped by the configured character limit so degenerate
/// card widths cannot produce absurdly long lines.
pub(super) fn measure_label(
    text: &str,
    max_width: f32,
    theme: &Theme,
    config: &LayoutConfig,
) -> TextBlock {
    let font_size = theme.font_size;
    let family = theme.font_family.as_str();
    let fast = config.fast_text_metrics;
    let char_cap = config.max_label_width_chars.max(1) as f32 * avg_char_width(family, font_size, fast);
    let wrap_width = max_width.min(char_cap).max(font_size);

    let mut lines = Vec::new();
    for raw in split_lines(text) {
        lines.extend(wrap_line(&raw, wrap_width, font_size, family, fast));
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    let width = lines
        .iter()
        .map(|line| text_width(line, font_size, family, fast))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * font_size * config.label_line_height;

    TextBlock {
        lines,
        width,
        height,
    }
}

pub(super) fn split_lines(text: &str) -> Vec<String> {
    text.replace("\\n", "\n")
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

pub(super) fn wrap_line(
    line: &str,
    max_width: f32,
    font_size: f32,
    font_family: &str,
    fast: bool,
) -> Vec<String> {
    if text_width(line, font_size, font_family, fast) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size, font_family, fast) > max_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, fast: bool) -> f32 {
    if fast {
        return approx_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| approx_width(text, font_size))
}

fn avg_char_width(font_family: &str, font_size: f32, fast: bool) -> f32 {
    if fast {
        return font_size * 0.56;
    }
    text_metrics::average_char_width(font_family, font_size).unwrap_or(font_size * 0.56)
}

fn approx_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.56
}
