//! Geographic projections and the projection registry.
//!
//! A projection is a pair of pure functions between geographic degrees and
//! projected meters. The registry is an immutable name → projection table
//! built once and injected into the canvas controller; it is never mutated
//! after construction.
//!
//! Out-of-domain forward results are reported as sentinel coordinates of
//! magnitude [`OUT_OF_RANGE`], never as a panic. Polygon ingestion drops
//! such vertices.

use crate::error::MapError;
use crate::geo::GeoPoint;
use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;

/// Mean planet radius (meters). Used both by the spherical projection math
/// and for sizing the water disk of bounded projections.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Sentinel magnitude for a forward projection of a point outside the
/// projection's valid domain (e.g. the far hemisphere of an orthographic
/// view).
pub const OUT_OF_RANGE: f64 = 1e30;

/// How a projection covers the plane; decides the shape of the water
/// primitive drawn beneath the land polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Bounded, disk-like image of the planet (e.g. orthographic),
    /// centered on a reference geographic point.
    Disk { center: GeoPoint },
    /// Unbounded, rectangular image (e.g. cylindrical). `lat_limit` clamps
    /// the rectangle below the projection's singular latitude.
    Plane { lat_limit: f64 },
}

/// A named pair of pure coordinate-mapping functions.
///
/// Contract: `inverse(forward(p)) ≈ p` (within 1e-6 degrees) for every `p`
/// in the projection's valid domain.
pub trait Projection: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Geographic degrees → projected meters.
    fn forward(&self, lon: f64, lat: f64) -> (f64, f64);

    /// Projected meters → geographic degrees.
    fn inverse(&self, x: f64, y: f64) -> (f64, f64);

    fn surface(&self) -> Surface;
}

// ─── Spherical Mercator ──────────────────────────────────────────────────

/// Spherical Mercator. Singular at the poles; the water rectangle is
/// clamped to ±84° latitude.
#[derive(Debug, Default)]
pub struct Mercator;

impl Projection for Mercator {
    fn name(&self) -> &'static str {
        "mercator"
    }

    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = EARTH_RADIUS_M * lon.to_radians();
        let y = EARTH_RADIUS_M * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        (x, y)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = (x / EARTH_RADIUS_M).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - FRAC_PI_2).to_degrees();
        (lon, lat)
    }

    fn surface(&self) -> Surface {
        Surface::Plane { lat_limit: 84.0 }
    }
}

// ─── Azimuthal orthographic ──────────────────────────────────────────────

/// Azimuthal orthographic: the planet seen from infinity, centered on a
/// reference point. Points on the far hemisphere have no image and project
/// to the [`OUT_OF_RANGE`] sentinel.
#[derive(Debug)]
pub struct Orthographic {
    center: GeoPoint,
}

impl Orthographic {
    pub const fn new(center: GeoPoint) -> Self {
        Self { center }
    }
}

impl Default for Orthographic {
    fn default() -> Self {
        // Reference point carried over from the original projection table.
        Self::new(GeoPoint::new(28.0, 47.0))
    }
}

impl Projection for Orthographic {
    fn name(&self) -> &'static str {
        "orthographic"
    }

    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lam = lon.to_radians();
        let phi = lat.to_radians();
        let lam0 = self.center.lon.to_radians();
        let phi0 = self.center.lat.to_radians();

        let cos_c = phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * (lam - lam0).cos();
        if cos_c < 0.0 {
            return (OUT_OF_RANGE, OUT_OF_RANGE);
        }

        let x = EARTH_RADIUS_M * phi.cos() * (lam - lam0).sin();
        let y = EARTH_RADIUS_M
            * (phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * (lam - lam0).cos());
        (x, y)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lam0 = self.center.lon.to_radians();
        let phi0 = self.center.lat.to_radians();

        let rho = (x * x + y * y).sqrt();
        if rho == 0.0 {
            return (self.center.lon, self.center.lat);
        }

        let c = (rho / EARTH_RADIUS_M).clamp(-1.0, 1.0).asin();
        let (sin_c, cos_c) = c.sin_cos();

        let phi = (cos_c * phi0.sin() + y * sin_c * phi0.cos() / rho).clamp(-1.0, 1.0).asin();
        let lam = lam0
            + (x * sin_c).atan2(rho * cos_c * phi0.cos() - y * sin_c * phi0.sin());
        (lam.to_degrees(), phi.to_degrees())
    }

    fn surface(&self) -> Surface {
        Surface::Disk {
            center: self.center,
        }
    }
}

// ─── Equirectangular ─────────────────────────────────────────────────────

/// Plate carrée: linear in both axes. Useful as a near-identity mapping
/// and as a second rectangular projection for switching.
#[derive(Debug, Default)]
pub struct Equirectangular;

impl Projection for Equirectangular {
    fn name(&self) -> &'static str {
        "equirectangular"
    }

    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        (
            EARTH_RADIUS_M * lon.to_radians(),
            EARTH_RADIUS_M * lat.to_radians(),
        )
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x / EARTH_RADIUS_M).to_degrees(),
            (y / EARTH_RADIUS_M).to_degrees(),
        )
    }

    fn surface(&self) -> Surface {
        Surface::Plane { lat_limit: 90.0 }
    }
}

// ─── Registry ────────────────────────────────────────────────────────────

/// Immutable name → projection table.
///
/// Built once at startup and handed to the canvas controller; an unknown
/// name is a configuration error, never a silent fallback.
pub struct ProjectionRegistry {
    table: HashMap<&'static str, Arc<dyn Projection>>,
}

impl ProjectionRegistry {
    /// The built-in projection set.
    pub fn builtin() -> Self {
        Self::from_projections([
            Arc::new(Mercator) as Arc<dyn Projection>,
            Arc::new(Orthographic::default()),
            Arc::new(Equirectangular),
        ])
    }

    /// Build a registry from an explicit projection set.
    pub fn from_projections(projections: impl IntoIterator<Item = Arc<dyn Projection>>) -> Self {
        let table = projections
            .into_iter()
            .map(|p| (p.name(), p))
            .collect();
        Self { table }
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Projection>, MapError> {
        self.table
            .get(name)
            .cloned()
            .ok_or_else(|| MapError::UnknownProjection(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Registered projection names, sorted for stable presentation.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.table.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ProjectionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_round_trip(proj: &dyn Projection, lon: f64, lat: f64) {
        let (x, y) = proj.forward(lon, lat);
        let (lon_rt, lat_rt) = proj.inverse(x, y);
        assert_close(lon_rt, lon, 1e-6);
        assert_close(lat_rt, lat, 1e-6);
    }

    #[test]
    fn mercator_round_trip() {
        let proj = Mercator;
        for &(lon, lat) in &[(0.0, 0.0), (28.0, 47.0), (-122.4, 37.8), (179.0, -83.0)] {
            assert_round_trip(&proj, lon, lat);
        }
    }

    #[test]
    fn orthographic_round_trip_near_hemisphere() {
        let proj = Orthographic::default();
        for &(lon, lat) in &[(28.0, 47.0), (10.0, 50.0), (45.0, 20.0), (-20.0, 60.0)] {
            assert_round_trip(&proj, lon, lat);
        }
    }

    #[test]
    fn equirectangular_round_trip() {
        let proj = Equirectangular;
        for &(lon, lat) in &[(0.0, 0.0), (-180.0, 90.0), (180.0, -90.0), (12.5, -33.3)] {
            assert_round_trip(&proj, lon, lat);
        }
    }

    #[test]
    fn orthographic_far_side_is_out_of_range() {
        let proj = Orthographic::default();
        // Antipode of the reference point.
        let (x, y) = proj.forward(28.0 - 180.0, -47.0);
        assert!(x.abs() >= OUT_OF_RANGE);
        assert!(y.abs() >= OUT_OF_RANGE);
    }

    #[test]
    fn mercator_pole_is_degenerate_not_fatal() {
        let (_, y) = Mercator.forward(0.0, 90.0);
        assert!(!y.is_finite() || y.abs() > 1e10);
    }

    #[test]
    fn registry_lookup_and_unknown_name() {
        let registry = ProjectionRegistry::builtin();
        assert!(registry.get("mercator").is_ok());
        assert_eq!(
            registry.names(),
            vec!["equirectangular", "mercator", "orthographic"]
        );

        let err = registry.get("winkel-tripel").unwrap_err();
        assert!(matches!(err, MapError::UnknownProjection(name) if name == "winkel-tripel"));
    }
}
