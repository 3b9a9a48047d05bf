//! Polygon ingestion: shape records → device-space primitives.
//!
//! Each shape record carries the exterior rings of one shapefile shape —
//! one ring for a simple polygon, several for a multipolygon. Interior
//! rings (lake holes) are intentionally not represented: land may render
//! without punched holes, a documented simplification.
//!
//! Ingestion is full-replace: every redraw regenerates the complete land
//! and water primitive set from geography. There is no incremental
//! diffing.

use crate::paint::{
    CirclePrimitive, LAND_STYLE, PolygonPrimitive, Primitive, RectPrimitive, WATER_STYLE, Z_LAND,
    Z_WATER,
};
use pangea_core::{
    DevicePoint, EARTH_RADIUS_M, GeoPoint, Projection, Surface, ViewTransform,
};
use smallvec::SmallVec;

/// An ordered, closed sequence of geographic vertices forming one exterior
/// boundary.
pub type Ring = Vec<GeoPoint>;

/// Vertices whose projected coordinate exceeds this magnitude (or is not
/// finite) are dropped from the ring being built — minor topological
/// distortion at extreme latitudes and antimeridian seams is accepted.
pub const DEGENERATE_LIMIT: f64 = 1e10;

/// One shapefile shape: a simple polygon (one exterior) or a multipolygon
/// (several).
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    pub exteriors: SmallVec<[Ring; 1]>,
}

impl ShapeRecord {
    /// A simple polygon with a single exterior ring.
    pub fn polygon(ring: Ring) -> Self {
        let mut exteriors = SmallVec::new();
        exteriors.push(ring);
        Self { exteriors }
    }

    /// A multipolygon with one exterior ring per constituent polygon.
    pub fn multipolygon(rings: impl IntoIterator<Item = Ring>) -> Self {
        Self {
            exteriors: rings.into_iter().collect(),
        }
    }
}

/// Map one ring through the projection and view transform, dropping
/// degenerate vertices. Never fails; a fully degenerate ring comes back
/// empty.
fn project_ring(ring: &[GeoPoint], proj: &dyn Projection, view: &ViewTransform) -> Vec<DevicePoint> {
    let mut points = Vec::with_capacity(ring.len());
    for vertex in ring {
        let (x, y) = proj.forward(vertex.lon, vertex.lat);
        if !x.is_finite() || !y.is_finite() || x.abs() > DEGENERATE_LIMIT || y.abs() > DEGENERATE_LIMIT
        {
            log::trace!(
                "dropping out-of-domain vertex ({}, {}) under {}",
                vertex.lon,
                vertex.lat,
                proj.name()
            );
            continue;
        }
        points.push(view.apply(x, y));
    }
    points
}

/// Build the land polygon set: one device-space polygon per exterior ring,
/// at the land z-order.
pub fn land_polygons(
    records: &[ShapeRecord],
    proj: &dyn Projection,
    view: &ViewTransform,
) -> Vec<PolygonPrimitive> {
    let mut polygons = Vec::new();
    for record in records {
        for ring in &record.exteriors {
            let points = project_ring(ring, proj, view);
            if points.is_empty() {
                continue;
            }
            polygons.push(PolygonPrimitive {
                points,
                style: LAND_STYLE,
                z: Z_LAND,
            });
        }
    }
    polygons
}

/// Build the water primitive for the active projection family: a disk for
/// bounded projections, a latitude-clamped rectangle for unbounded ones.
pub fn water_primitive(proj: &dyn Projection, view: &ViewTransform) -> Primitive {
    match proj.surface() {
        Surface::Disk { center } => Primitive::Circle(CirclePrimitive {
            center: view.to_device(proj, center),
            radius: EARTH_RADIUS_M * view.ratio,
            style: WATER_STYLE,
            z: Z_WATER,
        }),
        Surface::Plane { lat_limit } => {
            let a = view.to_device(proj, GeoPoint::new(-180.0, lat_limit));
            let b = view.to_device(proj, GeoPoint::new(180.0, -lat_limit));
            Primitive::Rect(RectPrimitive {
                min: DevicePoint::new(a.x.min(b.x), a.y.min(b.y)),
                max: DevicePoint::new(a.x.max(b.x), a.y.max(b.y)),
                style: WATER_STYLE,
                z: Z_WATER,
            })
        }
    }
}
