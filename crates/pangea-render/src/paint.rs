//! Drawable primitives handed to the presentation layer.
//!
//! The core never issues window or widget calls; a redraw produces an
//! ordered list of these primitives and the presentation layer paints
//! them. The list is recomputed wholesale on every redraw — primitives
//! are never mutated in place.

use pangea_core::{DevicePoint, NodeId};
use serde::{Deserialize, Serialize};

// ─── Z-order ─────────────────────────────────────────────────────────────

pub const Z_WATER: u8 = 0;
pub const Z_LAND: u8 = 1;
pub const Z_NODES: u8 = 2;
pub const Z_LABELS: u8 = 3;

// ─── Colors & styles ─────────────────────────────────────────────────────

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Fill plus outline for a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Color,
    pub outline: Color,
}

/// Water blue from the original palette.
pub const WATER_STYLE: Style = Style {
    fill: Color::rgb(64, 164, 223),
    outline: Color::rgb(0, 0, 0),
};

/// Land green from the original palette.
pub const LAND_STYLE: Style = Style {
    fill: Color::rgb(52, 165, 111),
    outline: Color::rgb(0, 0, 0),
};

// ─── Primitives ──────────────────────────────────────────────────────────

/// A closed device-space polygon (one exterior ring).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPrimitive {
    pub points: Vec<DevicePoint>,
    pub style: Style,
    pub z: u8,
}

/// A filled circle (the water disk of bounded projections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub center: DevicePoint,
    pub radius: f64,
    pub style: Style,
    pub z: u8,
}

/// An axis-aligned filled rectangle (the water sheet of unbounded
/// projections). `min`/`max` are normalized corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub min: DevicePoint,
    pub max: DevicePoint,
    pub style: Style,
    pub z: u8,
}

/// A node marker; `selected` asks the presentation layer for the
/// highlighted icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPrimitive {
    pub node: NodeId,
    pub pos: DevicePoint,
    pub selected: bool,
    pub z: u8,
}

/// A text label anchored at a device position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub pos: DevicePoint,
    pub content: String,
    pub z: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Polygon(PolygonPrimitive),
    Circle(CirclePrimitive),
    Rect(RectPrimitive),
    Marker(MarkerPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn z(&self) -> u8 {
        match self {
            Primitive::Polygon(p) => p.z,
            Primitive::Circle(p) => p.z,
            Primitive::Rect(p) => p.z,
            Primitive::Marker(p) => p.z,
            Primitive::Text(p) => p.z,
        }
    }
}
