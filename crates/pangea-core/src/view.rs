//! The view transform: projected meters → device pixels.
//!
//! A scalar ratio plus a 2D offset, with a fixed y-flip (device y grows
//! downward, latitude grows upward):
//!
//! ```text
//! device = (X*ratio + offset.0, -Y*ratio + offset.1)
//! ```
//!
//! Geography is the single source of truth: after any mutation of the
//! transform, device positions are recomputed from stored geography via
//! [`ViewTransform::to_device`], never the other way around. The one
//! exception is live dragging, where the user manipulates pixels directly
//! and geography is re-derived through [`ViewTransform::to_geographic`].

use crate::geo::{DevicePoint, GeoPoint};
use crate::projection::Projection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Scale from projected meters to device pixels. Always > 0.
    pub ratio: f64,
    /// Device-pixel translation.
    pub offset: (f64, f64),
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            offset: (0.0, 0.0),
        }
    }
}

impl ViewTransform {
    pub const fn new(ratio: f64, offset: (f64, f64)) -> Self {
        Self { ratio, offset }
    }

    /// Apply ratio, offset, and the y-flip to a projected coordinate.
    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> DevicePoint {
        DevicePoint::new(
            x * self.ratio + self.offset.0,
            -y * self.ratio + self.offset.1,
        )
    }

    /// Geographic degrees → device pixels under `proj`.
    #[must_use]
    pub fn to_device(&self, proj: &dyn Projection, geo: GeoPoint) -> DevicePoint {
        let (x, y) = proj.forward(geo.lon, geo.lat);
        self.apply(x, y)
    }

    /// Device pixels → geographic degrees under `proj`.
    #[must_use]
    pub fn to_geographic(&self, proj: &dyn Projection, pos: DevicePoint) -> GeoPoint {
        let x = (pos.x - self.offset.0) / self.ratio;
        let y = (self.offset.1 - pos.y) / self.ratio;
        let (lon, lat) = proj.inverse(x, y);
        GeoPoint::new(lon, lat)
    }

    /// Anchored zoom: scales the ratio by `factor` while keeping the device
    /// point `anchor` fixed on screen.
    pub fn zoom(&mut self, anchor: DevicePoint, factor: f64) {
        self.ratio *= factor;
        self.offset = (
            self.offset.0 * factor + anchor.x * (1.0 - factor),
            self.offset.1 * factor + anchor.y * (1.0 - factor),
        );
    }

    /// Free pan by a device-pixel delta. Unaffected by the ratio;
    /// sequential pans compose additively.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset = (self.offset.0 + dx, self.offset.1 + dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Equirectangular;
    use pretty_assertions::assert_eq;

    #[test]
    fn apply_flips_y() {
        let view = ViewTransform::default();
        assert_eq!(view.apply(3.0, 4.0), DevicePoint::new(3.0, -4.0));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let proj = Equirectangular;
        let geo = GeoPoint::new(12.0, 48.0);

        let mut view = ViewTransform::new(1.0 / 1000.0, (250.0, 300.0));
        let anchor = view.to_device(&proj, geo);

        let before = view.ratio;
        view.zoom(anchor, 1.25);

        let after = view.to_device(&proj, geo);
        assert!((after.x - anchor.x).abs() < 1e-9);
        assert!((after.y - anchor.y).abs() < 1e-9);
        assert_eq!(view.ratio, before * 1.25);
    }

    #[test]
    fn zoom_composes_with_arbitrary_anchor() {
        let mut view = ViewTransform::new(2.0, (10.0, -5.0));
        let anchor = DevicePoint::new(500.0, 400.0);
        view.zoom(anchor, 0.8);
        view.zoom(anchor, 1.25);
        assert!((view.ratio - 2.0).abs() < 1e-12);
        assert!((view.offset.0 - 10.0).abs() < 1e-9);
        assert!((view.offset.1 + 5.0).abs() < 1e-9);
    }

    #[test]
    fn pans_compose_additively() {
        let mut split = ViewTransform::new(3.0, (1.0, 2.0));
        split.pan(5.0, -7.0);
        split.pan(-2.0, 4.0);

        let mut single = ViewTransform::new(3.0, (1.0, 2.0));
        single.pan(3.0, -3.0);

        assert_eq!(split.offset, single.offset);
        assert_eq!(split.ratio, single.ratio);
    }

    #[test]
    fn device_geographic_round_trip() {
        let proj = Equirectangular;
        let view = ViewTransform::new(1.0 / 400.0, (650.0, 450.0));
        let geo = GeoPoint::new(-73.9, 40.7);
        let rt = view.to_geographic(&proj, view.to_device(&proj, geo));
        assert!((rt.lon - geo.lon).abs() < 1e-6);
        assert!((rt.lat - geo.lat).abs() < 1e-6);
    }
}
