use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub top_card_color: String,
    pub top_card_border_color: String,
    pub bottom_card_color: String,
    pub bottom_card_border_color: String,
    pub card_text_color: String,
    pub date_text_color: String,
    pub axis_color: String,
    pub marker_color: String,
    pub marker_label_color: String,
    pub era_band_top_color: String,
    pub era_band_bottom_color: String,
    pub era_label_color: String,
    pub title_color: String,
    pub accent_fallback_color: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 16.0,
            background: "#FFFFFF".to_string(),
            top_card_color: "#ECECFF".to_string(),
            top_card_border_color: "#9370DB".to_string(),
            bottom_card_color: "#FFFFDE".to_string(),
            bottom_card_border_color: "#AAAA33".to_string(),
            card_text_color: "#333333".to_string(),
            date_text_color: "#666666".to_string(),
            axis_color: "#333333".to_string(),
            marker_color: "#CCCCCC".to_string(),
            marker_label_color: "#888888".to_string(),
            era_band_top_color: "#F4F4FF".to_string(),
            era_band_bottom_color: "#FFFFF4".to_string(),
            era_label_color: "#333333".to_string(),
            title_color: "#333333".to_string(),
            accent_fallback_color: "#9370DB".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            top_card_color: "#F8FAFF".to_string(),
            top_card_border_color: "#C7D2E5".to_string(),
            bottom_card_color: "#FDF9F3".to_string(),
            bottom_card_border_color: "#E0D3BC".to_string(),
            card_text_color: "#1C2430".to_string(),
            date_text_color: "#7A8AA6".to_string(),
            axis_color: "#7A8AA6".to_string(),
            marker_color: "#D7E0F0".to_string(),
            marker_label_color: "#8C99B0".to_string(),
            era_band_top_color: "#F7FAFF".to_string(),
            era_band_bottom_color: "#FDFBF7".to_string(),
            era_label_color: "#1C2430".to_string(),
            title_color: "#1C2430".to_string(),
            accent_fallback_color: "#C7D2E5".to_string(),
        }
    }

    pub fn card_color(&self, track: crate::ir::Track) -> (&str, &str) {
        match track {
            crate::ir::Track::Top => (&self.top_card_color, &self.top_card_border_color),
            crate::ir::Track::Bottom => (&self.bottom_card_color, &self.bottom_card_border_color),
        }
    }

    pub fn era_band_color(&self, track: crate::ir::Track) -> &str {
        match track {
            crate::ir::Track::Top => &self.era_band_top_color,
            crate::ir::Track::Bottom => &self.era_band_bottom_color,
        }
    }
}
