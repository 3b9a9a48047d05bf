//! Geographic and device coordinate types.
//!
//! `GeoPoint` is the authoritative identity of everything on the map.
//! `DevicePoint` is always derivable from it through the active projection
//! and view transform. Device y grows downward; latitude grows upward.

use serde::{Deserialize, Serialize};

/// A geographic position in degrees: longitude east-positive,
/// latitude north-positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A position in device (canvas) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other` as `(dx, dy)`.
    #[must_use]
    pub fn delta_to(&self, other: DevicePoint) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    /// `self` translated by `(dx, dy)`.
    #[must_use]
    pub fn offset_by(&self, dx: f64, dy: f64) -> DevicePoint {
        DevicePoint::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: DevicePoint) -> f64 {
        let (dx, dy) = self.delta_to(other);
        (dx * dx + dy * dy).sqrt()
    }
}
