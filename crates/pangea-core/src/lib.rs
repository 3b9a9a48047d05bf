pub mod error;
pub mod geo;
pub mod node;
pub mod projection;
pub mod view;

pub use error::MapError;
pub use geo::{DevicePoint, GeoPoint};
pub use node::{LABEL_OFFSET, Node, NodeId, NodeStore};
pub use projection::{
    EARTH_RADIUS_M, OUT_OF_RANGE, Projection, ProjectionRegistry, Surface,
};
pub use view::ViewTransform;
