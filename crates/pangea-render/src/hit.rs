//! Hit testing: cursor position → node lookup.
//!
//! Markers render topmost, so a press is resolved against the node
//! registry directly: the nearest marker within the pick radius wins.

use pangea_core::{DevicePoint, NodeId, NodeStore};

/// Pick radius in device pixels, matching the marker icon's half-size.
pub const MARKER_RADIUS: f64 = 20.0;

/// The nearest node within [`MARKER_RADIUS`] of `cursor`, if any.
pub fn hit_node(store: &NodeStore, cursor: DevicePoint) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for node in store.iter() {
        let dist = node.device.distance_to(cursor);
        if dist > MARKER_RADIUS {
            continue;
        }
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((node.id, dist)),
        }
    }
    best.map(|(id, _)| id)
}

/// Every node whose device position lies within the rectangle spanned by
/// two opposite corners, in any order. Bounds are normalized to min/max
/// and inclusive on all four edges.
pub fn nodes_in_rect(store: &NodeStore, a: DevicePoint, b: DevicePoint) -> Vec<NodeId> {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    store
        .iter()
        .filter(|node| {
            node.device.x >= min_x
                && node.device.x <= max_x
                && node.device.y >= min_y
                && node.device.y <= max_y
        })
        .map(|node| node.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pangea_core::GeoPoint;
    use pretty_assertions::assert_eq;

    fn store_with(positions: &[(f64, f64)]) -> (NodeStore, Vec<NodeId>) {
        let mut store = NodeStore::new();
        let ids = positions
            .iter()
            .map(|&(x, y)| store.insert(GeoPoint::new(0.0, 0.0), DevicePoint::new(x, y)))
            .collect();
        (store, ids)
    }

    #[test]
    fn nearest_marker_within_radius_wins() {
        let (store, ids) = store_with(&[(100.0, 100.0), (110.0, 100.0)]);
        let hit = hit_node(&store, DevicePoint::new(108.0, 100.0));
        assert_eq!(hit, Some(ids[1]));
    }

    #[test]
    fn miss_outside_radius() {
        let (store, _) = store_with(&[(100.0, 100.0)]);
        assert_eq!(hit_node(&store, DevicePoint::new(200.0, 200.0)), None);
    }

    #[test]
    fn rect_is_direction_independent() {
        let (store, ids) = store_with(&[(10.0, 10.0), (50.0, 50.0), (90.0, 90.0)]);
        let down_right = nodes_in_rect(
            &store,
            DevicePoint::new(0.0, 0.0),
            DevicePoint::new(60.0, 60.0),
        );
        let up_left = nodes_in_rect(
            &store,
            DevicePoint::new(60.0, 60.0),
            DevicePoint::new(0.0, 0.0),
        );
        assert_eq!(down_right, vec![ids[0], ids[1]]);
        assert_eq!(down_right, up_left);
    }

    #[test]
    fn rect_edges_are_inclusive() {
        let (store, ids) = store_with(&[(0.0, 0.0), (60.0, 60.0), (60.0, 0.0), (61.0, 0.0)]);
        let hits = nodes_in_rect(
            &store,
            DevicePoint::new(0.0, 0.0),
            DevicePoint::new(60.0, 60.0),
        );
        assert_eq!(hits, vec![ids[0], ids[1], ids[2]]);
    }
}
