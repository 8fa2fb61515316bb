//! Closed enum families for the MapFile format's symbolic tokens.
//!
//! Each family is an independent table mapping variants to a canonical
//! uppercase token and a stable integer code. The on-disk format uses the
//! tokens; the codes exist because callers (and older documents) may
//! address a value numerically. Decoding accepts either form,
//! case-insensitively; anything outside the table is an explicit error,
//! never a fallback value.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Resolve `raw` against one family's table: a numeric code or a
/// case-insensitive token.
fn decode_in<T>(
    family: &'static str,
    raw: &str,
    from_code: fn(u8) -> Option<T>,
    from_token: fn(&str) -> Option<T>,
) -> Result<T, Error> {
    let raw = raw.trim();
    let hit = match raw.parse::<u8>() {
        Ok(code) => from_code(code),
        Err(_) => from_token(raw),
    };
    hit.ok_or_else(|| Error::UnknownEnumValue {
        family,
        value: raw.to_string(),
    })
}

// ─── Status ──────────────────────────────────────────────────────────────

/// ON/OFF switch shared by Map, Legend, and Scalebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Off,
    On,
}

impl Status {
    pub const FAMILY: &'static str = "STATUS";

    pub fn code(self) -> u8 {
        match self {
            Status::Off => 0,
            Status::On => 1,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Status::Off => "OFF",
            Status::On => "ON",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Status::Off),
            1 => Some(Status::On),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "OFF" => Some(Status::Off),
            "ON" => Some(Status::On),
            _ => None,
        }
    }

    /// Accepts the numeric code or the case-insensitive token.
    pub fn decode(raw: &str) -> Result<Self, Error> {
        decode_in(Self::FAMILY, raw, Self::from_code, Self::from_token)
    }
}

// ─── Units ───────────────────────────────────────────────────────────────

/// Measurement units for Map and Scalebar.
///
/// Code 7 is intentionally absent from the table; documents carrying it
/// are rejected rather than remapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Inches,
    Feet,
    Miles,
    Meters,
    Kilometers,
    DecimalDegrees,
    Pixels,
    NauticalMiles,
}

impl Units {
    pub const FAMILY: &'static str = "UNITS";

    pub fn code(self) -> u8 {
        match self {
            Units::Inches => 0,
            Units::Feet => 1,
            Units::Miles => 2,
            Units::Meters => 3,
            Units::Kilometers => 4,
            Units::DecimalDegrees => 5,
            Units::Pixels => 6,
            Units::NauticalMiles => 8,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Units::Inches => "INCHES",
            Units::Feet => "FEET",
            Units::Miles => "MILES",
            Units::Meters => "METERS",
            Units::Kilometers => "KILOMETERS",
            Units::DecimalDegrees => "DD",
            Units::Pixels => "PIXELS",
            Units::NauticalMiles => "NAUTICALMILES",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Units::Inches),
            1 => Some(Units::Feet),
            2 => Some(Units::Miles),
            3 => Some(Units::Meters),
            4 => Some(Units::Kilometers),
            5 => Some(Units::DecimalDegrees),
            6 => Some(Units::Pixels),
            8 => Some(Units::NauticalMiles),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "INCHES" => Some(Units::Inches),
            "FEET" => Some(Units::Feet),
            "MILES" => Some(Units::Miles),
            "METERS" => Some(Units::Meters),
            "KILOMETERS" => Some(Units::Kilometers),
            "DD" => Some(Units::DecimalDegrees),
            "PIXELS" => Some(Units::Pixels),
            "NAUTICALMILES" => Some(Units::NauticalMiles),
            _ => None,
        }
    }

    pub fn decode(raw: &str) -> Result<Self, Error> {
        decode_in(Self::FAMILY, raw, Self::from_code, Self::from_token)
    }
}

// ─── LayerType ───────────────────────────────────────────────────────────

/// Geometry/source kind of a Layer.
///
/// Code 4 is intentionally absent (a retired member of the table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerType {
    Point,
    Line,
    Polygon,
    Raster,
    Query,
    Circle,
    TileIndex,
    Chart,
}

impl LayerType {
    pub const FAMILY: &'static str = "TYPE";

    pub fn code(self) -> u8 {
        match self {
            LayerType::Point => 0,
            LayerType::Line => 1,
            LayerType::Polygon => 2,
            LayerType::Raster => 3,
            LayerType::Query => 5,
            LayerType::Circle => 6,
            LayerType::TileIndex => 7,
            LayerType::Chart => 8,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            LayerType::Point => "POINT",
            LayerType::Line => "LINE",
            LayerType::Polygon => "POLYGON",
            LayerType::Raster => "RASTER",
            LayerType::Query => "QUERY",
            LayerType::Circle => "CIRCLE",
            LayerType::TileIndex => "TILEINDEX",
            LayerType::Chart => "CHART",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LayerType::Point),
            1 => Some(LayerType::Line),
            2 => Some(LayerType::Polygon),
            3 => Some(LayerType::Raster),
            5 => Some(LayerType::Query),
            6 => Some(LayerType::Circle),
            7 => Some(LayerType::TileIndex),
            8 => Some(LayerType::Chart),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "POINT" => Some(LayerType::Point),
            "LINE" => Some(LayerType::Line),
            "POLYGON" => Some(LayerType::Polygon),
            "RASTER" => Some(LayerType::Raster),
            "QUERY" => Some(LayerType::Query),
            "CIRCLE" => Some(LayerType::Circle),
            "TILEINDEX" => Some(LayerType::TileIndex),
            "CHART" => Some(LayerType::Chart),
            _ => None,
        }
    }

    pub fn decode(raw: &str) -> Result<Self, Error> {
        decode_in(Self::FAMILY, raw, Self::from_code, Self::from_token)
    }
}

// ─── LayerStatus ─────────────────────────────────────────────────────────

/// Layer visibility. Unlike [`Status`], layers have a third DEFAULT state
/// (always drawn, regardless of a request's layer selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerStatus {
    Off,
    On,
    Default,
}

impl LayerStatus {
    pub const FAMILY: &'static str = "STATUS";

    pub fn code(self) -> u8 {
        match self {
            LayerStatus::Off => 0,
            LayerStatus::On => 1,
            LayerStatus::Default => 2,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            LayerStatus::Off => "OFF",
            LayerStatus::On => "ON",
            LayerStatus::Default => "DEFAULT",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LayerStatus::Off),
            1 => Some(LayerStatus::On),
            2 => Some(LayerStatus::Default),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "OFF" => Some(LayerStatus::Off),
            "ON" => Some(LayerStatus::On),
            "DEFAULT" => Some(LayerStatus::Default),
            _ => None,
        }
    }

    pub fn decode(raw: &str) -> Result<Self, Error> {
        decode_in(Self::FAMILY, raw, Self::from_code, Self::from_token)
    }
}

// ─── LabelPosition ───────────────────────────────────────────────────────

/// Label anchor relative to the labeled feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelPosition {
    UpperLeft,
    UpperCenter,
    UpperRight,
    CenterLeft,
    Center,
    CenterRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
    Auto,
}

impl LabelPosition {
    pub const FAMILY: &'static str = "POSITION";

    pub fn code(self) -> u8 {
        match self {
            LabelPosition::UpperLeft => 0,
            LabelPosition::UpperCenter => 1,
            LabelPosition::UpperRight => 2,
            LabelPosition::CenterLeft => 3,
            LabelPosition::Center => 4,
            LabelPosition::CenterRight => 5,
            LabelPosition::LowerLeft => 6,
            LabelPosition::LowerCenter => 7,
            LabelPosition::LowerRight => 8,
            LabelPosition::Auto => 9,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            LabelPosition::UpperLeft => "UL",
            LabelPosition::UpperCenter => "UC",
            LabelPosition::UpperRight => "UR",
            LabelPosition::CenterLeft => "CL",
            LabelPosition::Center => "CC",
            LabelPosition::CenterRight => "CR",
            LabelPosition::LowerLeft => "LL",
            LabelPosition::LowerCenter => "LC",
            LabelPosition::LowerRight => "LR",
            LabelPosition::Auto => "AUTO",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LabelPosition::UpperLeft),
            1 => Some(LabelPosition::UpperCenter),
            2 => Some(LabelPosition::UpperRight),
            3 => Some(LabelPosition::CenterLeft),
            4 => Some(LabelPosition::Center),
            5 => Some(LabelPosition::CenterRight),
            6 => Some(LabelPosition::LowerLeft),
            7 => Some(LabelPosition::LowerCenter),
            8 => Some(LabelPosition::LowerRight),
            9 => Some(LabelPosition::Auto),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "UL" => Some(LabelPosition::UpperLeft),
            "UC" => Some(LabelPosition::UpperCenter),
            "UR" => Some(LabelPosition::UpperRight),
            "CL" => Some(LabelPosition::CenterLeft),
            "CC" => Some(LabelPosition::Center),
            "CR" => Some(LabelPosition::CenterRight),
            "LL" => Some(LabelPosition::LowerLeft),
            "LC" => Some(LabelPosition::LowerCenter),
            "LR" => Some(LabelPosition::LowerRight),
            "AUTO" => Some(LabelPosition::Auto),
            _ => None,
        }
    }

    pub fn decode(raw: &str) -> Result<Self, Error> {
        decode_in(Self::FAMILY, raw, Self::from_code, Self::from_token)
    }
}
