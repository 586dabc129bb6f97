//! Layout configuration for themed rendering.
//!
//! Like the points config, a theme's layout arrives as an open-ended
//! JSON document and is parsed once at the boundary: every field is
//! optional with a built-in default, unknown keys are captured in
//! `extras`, and nothing here ever fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A drawable column of the standings board, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Rank,
    Logo,
    Team,
    Wwcd,
    Matches,
    PosPts,
    FinPts,
    Total,
}

impl Column {
    /// Text columns in their fixed draw order (logo is handled
    /// separately since it pastes pixels rather than text).
    pub const TEXT_ORDER: [Self; 7] = [
        Self::Rank,
        Self::Team,
        Self::Wwcd,
        Self::Matches,
        Self::PosPts,
        Self::FinPts,
        Self::Total,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Logo => "logo",
            Self::Team => "team",
            Self::Wwcd => "wwcd",
            Self::Matches => "matches",
            Self::PosPts => "pos_pts",
            Self::FinPts => "fin_pts",
            Self::Total => "total",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "rank" => Some(Self::Rank),
            "logo" => Some(Self::Logo),
            "team" => Some(Self::Team),
            "wwcd" => Some(Self::Wwcd),
            "matches" => Some(Self::Matches),
            "pos_pts" => Some(Self::PosPts),
            "fin_pts" => Some(Self::FinPts),
            "total" => Some(Self::Total),
            _ => None,
        }
    }

    /// X-offset used when the theme supplies no column mapping at all.
    /// The logo column has no default: it only draws when explicitly
    /// placed.
    pub fn default_offset(self) -> Option<i64> {
        match self {
            Self::Rank => Some(0),
            Self::Logo => None,
            Self::Team => Some(100),
            Self::Wwcd => Some(500),
            Self::Matches => Some(650),
            Self::PosPts => Some(800),
            Self::FinPts => Some(950),
            Self::Total => Some(1100),
        }
    }
}

/// Per-theme rendering parameters.
///
/// `columns: None` means no mapping was supplied (an empty mapping
/// counts as none) and every text column draws at its default offset,
/// the all-or-nothing fallback that lets an unconfigured theme still
/// produce a usable board. `Some(map)` draws only the columns present
/// in the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub start_x: i64,
    pub start_y: i64,
    pub row_height: i64,
    pub font_size: u32,
    /// `#RRGGBB` hex color; falls back to white if unparseable.
    pub font_color: String,
    pub stroke_width: u32,
    pub logo_size: u32,
    pub logo_y_offset: i64,
    pub columns: Option<HashMap<Column, i64>>,
    /// Unrecognized keys, preserved untouched.
    pub extras: serde_json::Map<String, Value>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_x: 100,
            start_y: 300,
            row_height: 50,
            font_size: 40,
            font_color: "#FFFFFF".to_owned(),
            stroke_width: 0,
            logo_size: 40,
            logo_y_offset: 0,
            columns: None,
            extras: serde_json::Map::new(),
        }
    }
}

impl LayoutConfig {
    /// Parse a layout document. Never fails; see the module docs.
    pub fn from_value(value: &Value) -> Self {
        let mut config = Self::default();
        let Some(object) = value.as_object() else {
            return config;
        };

        for (key, raw) in object {
            match key.as_str() {
                "start_x" => config.start_x = coerce_int(raw).unwrap_or(config.start_x),
                "start_y" => config.start_y = coerce_int(raw).unwrap_or(config.start_y),
                "row_height" => config.row_height = coerce_int(raw).unwrap_or(config.row_height),
                "font_size" => {
                    config.font_size = coerce_int(raw)
                        .and_then(|v| u32::try_from(v).ok())
                        .unwrap_or(config.font_size);
                }
                "font_color" => {
                    if let Some(color) = raw.as_str() {
                        config.font_color = color.to_owned();
                    }
                }
                // Historical key name; it always meant stroke width.
                "font_weight" => {
                    config.stroke_width = coerce_int(raw)
                        .and_then(|v| u32::try_from(v).ok())
                        .unwrap_or(0);
                }
                "logo_size" => {
                    config.logo_size = coerce_int(raw)
                        .and_then(|v| u32::try_from(v).ok())
                        .unwrap_or(config.logo_size);
                }
                "logo_y_offset" => {
                    config.logo_y_offset = coerce_int(raw).unwrap_or(config.logo_y_offset);
                }
                "columns" => config.columns = parse_columns(raw),
                _ => {
                    config.extras.insert(key.clone(), raw.clone());
                }
            }
        }
        config
    }

    /// Resolve a column's x-offset relative to `start_x`, honoring the
    /// all-or-nothing fallback.
    pub fn column_offset(&self, column: Column) -> Option<i64> {
        match &self.columns {
            Some(map) => map.get(&column).copied(),
            None => column.default_offset(),
        }
    }

    /// Font color as RGBA, defaulting to opaque white on parse failure.
    pub fn rgba_color(&self) -> [u8; 4] {
        parse_hex_color(&self.font_color).unwrap_or([255, 255, 255, 255])
    }
}

fn parse_columns(raw: &Value) -> Option<HashMap<Column, i64>> {
    let object = raw.as_object()?;
    // An empty mapping counts as "nothing configured" and falls back
    // to default offsets; a non-empty mapping suppresses unlisted
    // columns even when none of its keys are recognized.
    if object.is_empty() {
        return None;
    }
    let mut map = HashMap::new();
    for (key, offset) in object {
        let Some(column) = Column::from_key(key) else {
            log::debug!("ignoring unknown layout column {key:?}");
            continue;
        };
        if let Some(offset) = coerce_int(offset) {
            map.insert(column, offset);
        }
    }
    Some(map)
}

fn parse_hex_color(color: &str) -> Option<[u8; 4]> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b, 255])
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
