//! Rigid multi-node drag.
//!
//! Dragging is the one path where device position drives geography: the
//! user manipulates pixels directly, so each selected node's geography is
//! re-derived from its new device position. Every update is computed from
//! the positions captured at drag start — never incrementally from the
//! previous frame — so relative offsets between nodes are preserved
//! exactly across the whole gesture.

use pangea_core::{DevicePoint, NodeId, NodeStore, Projection, ViewTransform};

#[derive(Debug)]
struct DragState {
    /// Cursor position when the drag began.
    origin: DevicePoint,
    /// Each selected node's device position at that instant.
    start_positions: Vec<(NodeId, DevicePoint)>,
}

/// Applies a rigid translation to the selected nodes while the primary
/// button is held.
#[derive(Debug, Default)]
pub struct DragController {
    state: Option<DragState>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag at `origin`, capturing the current selection. With no
    /// selected nodes the controller stays inert and returns `false`.
    pub fn begin(&mut self, store: &NodeStore, origin: DevicePoint) -> bool {
        let start_positions: Vec<_> = store
            .iter()
            .filter(|n| n.selected)
            .map(|n| (n.id, n.device))
            .collect();
        if start_positions.is_empty() {
            self.state = None;
            return false;
        }
        log::debug!("drag begins with {} node(s)", start_positions.len());
        self.state = Some(DragState {
            origin,
            start_positions,
        });
        true
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Pointer moved while the button is held: translate every captured
    /// node by `cursor - origin` from its start position and re-derive its
    /// geography. Returns whether anything moved.
    pub fn update(
        &self,
        store: &mut NodeStore,
        proj: &dyn Projection,
        view: &ViewTransform,
        cursor: DevicePoint,
    ) -> bool {
        let Some(state) = &self.state else {
            return false;
        };
        let (dx, dy) = state.origin.delta_to(cursor);
        for &(id, start) in &state.start_positions {
            let device = start.offset_by(dx, dy);
            let geo = view.to_geographic(proj, device);
            store.update_position(id, device, geo);
        }
        true
    }

    /// Drag end. No extra commit: the last computed positions are final.
    pub fn end(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pangea_core::GeoPoint;
    use pangea_core::projection::Equirectangular;
    use pretty_assertions::assert_eq;

    fn store_with_selected(positions: &[(f64, f64)]) -> (NodeStore, Vec<NodeId>) {
        let proj = Equirectangular;
        let view = ViewTransform::default();
        let mut store = NodeStore::new();
        let ids: Vec<_> = positions
            .iter()
            .map(|&(x, y)| {
                let device = DevicePoint::new(x, y);
                store.insert(view.to_geographic(&proj, device), device)
            })
            .collect();
        for &id in &ids {
            store.set_selected(id, true);
        }
        (store, ids)
    }

    #[test]
    fn translation_is_rigid_and_from_start_positions() {
        let proj = Equirectangular;
        let view = ViewTransform::default();
        let (mut store, ids) = store_with_selected(&[(100.0, 100.0), (130.0, 80.0)]);

        let mut drag = DragController::new();
        assert!(drag.begin(&store, DevicePoint::new(100.0, 100.0)));

        // Two intermediate updates must not accumulate error: the second
        // is still computed from the captured start positions.
        drag.update(&mut store, &proj, &view, DevicePoint::new(117.0, 95.0));
        drag.update(&mut store, &proj, &view, DevicePoint::new(130.0, 90.0));
        drag.end();

        assert_eq!(store.get(ids[0]).unwrap().device, DevicePoint::new(130.0, 90.0));
        assert_eq!(store.get(ids[1]).unwrap().device, DevicePoint::new(160.0, 70.0));
    }

    #[test]
    fn geography_is_rederived_during_drag() {
        let proj = Equirectangular;
        let view = ViewTransform::default();
        let (mut store, ids) = store_with_selected(&[(40.0, -20.0)]);
        let before = store.get(ids[0]).unwrap().geo;

        let mut drag = DragController::new();
        drag.begin(&store, DevicePoint::new(40.0, -20.0));
        drag.update(&mut store, &proj, &view, DevicePoint::new(50.0, -20.0));

        let node = store.get(ids[0]).unwrap();
        assert_ne!(node.geo, before);
        assert_eq!(node.geo, view.to_geographic(&proj, node.device));
        assert_eq!(node.label, pangea_core::Node::format_label(node.geo));
    }

    #[test]
    fn no_selection_means_inert_drag() {
        let proj = Equirectangular;
        let view = ViewTransform::default();
        let mut store = NodeStore::new();
        let id = store.insert(GeoPoint::new(0.0, 0.0), DevicePoint::new(10.0, 10.0));

        let mut drag = DragController::new();
        assert!(!drag.begin(&store, DevicePoint::new(10.0, 10.0)));
        assert!(!drag.update(&mut store, &proj, &view, DevicePoint::new(99.0, 99.0)));
        assert_eq!(store.get(id).unwrap().device, DevicePoint::new(10.0, 10.0));
    }
}
