pub mod hit;
pub mod ingest;
pub mod paint;

pub use hit::{MARKER_RADIUS, hit_node, nodes_in_rect};
pub use ingest::{DEGENERATE_LIMIT, Ring, ShapeRecord, land_polygons, water_primitive};
pub use paint::{
    CirclePrimitive, Color, LAND_STYLE, MarkerPrimitive, PolygonPrimitive, Primitive,
    RectPrimitive, Style, TextPrimitive, WATER_STYLE, Z_LABELS, Z_LAND, Z_NODES, Z_WATER,
};
