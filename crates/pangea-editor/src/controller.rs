//! The map canvas controller.
//!
//! `MapCanvas` is the single type the presentation layer talks to: it
//! receives toolkit-independent pointer/wheel events plus import and
//! projection requests, routes them to the view transform, selection
//! engine, and drag controller, and answers redraw requests with a fresh
//! primitive list.
//!
//! Everything runs synchronously on the caller's thread; a large
//! shapefile or a slow projection blocks for the duration, which is an
//! accepted limitation. `MapModel` owns all mutable state exclusively —
//! nothing else holds a competing copy.

use crate::drag::DragController;
use crate::import::{self, ImportError};
use crate::input::{PointerButton, WheelDirection};
use crate::selection::{Marquee, SelectionEngine};
use pangea_core::{
    DevicePoint, GeoPoint, LABEL_OFFSET, MapError, NodeId, NodeStore, Projection,
    ProjectionRegistry, ViewTransform,
};
use pangea_render::hit::hit_node;
use pangea_render::ingest::{ShapeRecord, land_polygons, water_primitive};
use pangea_render::paint::{MarkerPrimitive, Primitive, TextPrimitive, Z_LABELS, Z_NODES};
use std::path::Path;
use std::sync::Arc;

/// All mutable map state, owned exclusively by the controller.
struct MapModel {
    projection_name: String,
    /// Cached lookup of `projection_name`; always present in the registry.
    active: Arc<dyn Projection>,
    view: ViewTransform,
    shapes: Vec<ShapeRecord>,
    store: NodeStore,
    map_visible: bool,
}

/// What the pointer is currently doing, decided at press time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    DragNodes,
    Marquee,
    Pan { last: DevicePoint },
}

pub struct MapCanvas {
    registry: Arc<ProjectionRegistry>,
    model: MapModel,
    selection: SelectionEngine,
    drag: DragController,
    gesture: Gesture,
}

impl MapCanvas {
    /// Build a canvas over an injected projection table. Fails fast if the
    /// initial projection is not registered.
    pub fn new(
        registry: Arc<ProjectionRegistry>,
        projection_name: &str,
        view: ViewTransform,
    ) -> Result<Self, MapError> {
        let active = registry.get(projection_name)?;
        Ok(Self {
            registry,
            model: MapModel {
                projection_name: projection_name.to_owned(),
                active,
                view,
                shapes: Vec::new(),
                store: NodeStore::new(),
                map_visible: true,
            },
            selection: SelectionEngine::new(),
            drag: DragController::new(),
            gesture: Gesture::Idle,
        })
    }

    /// The built-in projections with a Mercator view at the original's
    /// default scale.
    pub fn with_defaults() -> Self {
        let registry = Arc::new(ProjectionRegistry::builtin());
        // builtin() always contains "mercator"
        Self::new(registry, "mercator", ViewTransform::new(1.0 / 400.0, (0.0, 0.0)))
            .expect("builtin registry provides the default projection")
    }

    // ─── Read access ─────────────────────────────────────────────────────

    pub fn projection_name(&self) -> &str {
        &self.model.projection_name
    }

    pub fn view(&self) -> &ViewTransform {
        &self.model.view
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.model.store
    }

    pub fn shape_count(&self) -> usize {
        self.model.shapes.len()
    }

    pub fn map_visible(&self) -> bool {
        self.model.map_visible
    }

    /// The marquee currently being dragged, if any (for a presentation
    /// layer that draws the rubber band itself).
    pub fn marquee(&self) -> Option<Marquee> {
        self.selection.marquee()
    }

    /// Geographic degrees → device pixels under the current projection
    /// and view transform.
    pub fn to_device(&self, geo: GeoPoint) -> DevicePoint {
        self.model.view.to_device(self.model.active.as_ref(), geo)
    }

    /// Device pixels → geographic degrees under the current projection
    /// and view transform.
    pub fn to_geographic(&self, pos: DevicePoint) -> GeoPoint {
        self.model.view.to_geographic(self.model.active.as_ref(), pos)
    }

    // ─── Pointer & wheel events ──────────────────────────────────────────

    /// Anchored zoom under the cursor. Node markers are repositioned from
    /// their stored geography.
    pub fn on_wheel(&mut self, cursor: DevicePoint, direction: WheelDirection) -> bool {
        self.model.view.zoom(cursor, direction.factor());
        self.reposition_nodes();
        true
    }

    /// Primary press: selection rules plus drag start on a node hit, or a
    /// fresh marquee on empty canvas. Secondary press: pan start.
    pub fn on_press(&mut self, cursor: DevicePoint, button: PointerButton) -> bool {
        match button {
            PointerButton::Secondary => {
                self.gesture = Gesture::Pan { last: cursor };
                false
            }
            PointerButton::Primary => match hit_node(&self.model.store, cursor) {
                Some(id) => {
                    self.selection.press_on_node(&mut self.model.store, id);
                    self.drag.begin(&self.model.store, cursor);
                    self.gesture = Gesture::DragNodes;
                    true
                }
                None => {
                    self.selection.begin_marquee(&mut self.model.store, cursor);
                    self.gesture = Gesture::Marquee;
                    true
                }
            },
        }
    }

    /// Pointer moved with a button held; routed by the active gesture.
    /// With no gesture in progress this is a no-op, not an error.
    pub fn on_drag(&mut self, cursor: DevicePoint) -> bool {
        match self.gesture {
            Gesture::Idle => false,
            Gesture::DragNodes => self.drag.update(
                &mut self.model.store,
                self.model.active.as_ref(),
                &self.model.view,
                cursor,
            ),
            Gesture::Marquee => self.selection.update_marquee(cursor),
            Gesture::Pan { last } => {
                let (dx, dy) = last.delta_to(cursor);
                self.model.view.pan(dx, dy);
                self.gesture = Gesture::Pan { last: cursor };
                self.reposition_nodes();
                true
            }
        }
    }

    /// Button released: resolve the marquee or end the drag. Drag end has
    /// no extra commit step.
    pub fn on_release(&mut self, _cursor: DevicePoint) -> bool {
        let redraw = match self.gesture {
            Gesture::Marquee => {
                self.selection.end_marquee(&mut self.model.store);
                true
            }
            Gesture::DragNodes => {
                self.drag.end();
                false
            }
            Gesture::Idle | Gesture::Pan { .. } => false,
        };
        self.gesture = Gesture::Idle;
        redraw
    }

    // ─── Projection & imports ────────────────────────────────────────────

    /// Switch the active projection. Unknown names fail fast and leave the
    /// model untouched. On success every node's device position is
    /// recomputed from its unchanged stored geography — a full recompute,
    /// never an incremental patch of old device values.
    pub fn on_projection_change(&mut self, name: &str) -> Result<bool, MapError> {
        let active = self.registry.get(name)?;
        log::info!("switching projection {} -> {}", self.model.projection_name, name);
        self.model.projection_name = name.to_owned();
        self.model.active = active;
        self.reposition_nodes();
        Ok(true)
    }

    /// Replace the land geometry with the contents of a shapefile. The
    /// file is parsed completely before any state changes, so a failed
    /// import leaves the previous map and all nodes untouched.
    pub fn on_import_shapefile(&mut self, path: impl AsRef<Path>) -> Result<bool, ImportError> {
        let records = import::read_shapefile(path)?;
        self.model.shapes = records;
        self.model.map_visible = true;
        Ok(true)
    }

    /// Create one node per `(lon, lat)` row of a table — the
    /// geography-given path; device positions are derived. Returns the
    /// number of malformed rows skipped.
    pub fn on_import_table(&mut self, path: impl AsRef<Path>) -> Result<usize, ImportError> {
        let table = import::read_node_table_path(path)?;
        log::info!(
            "importing {} node(s), {} row(s) skipped",
            table.coords.len(),
            table.skipped
        );
        for geo in table.coords {
            let device = self.to_device(geo);
            self.model.store.insert(geo, device);
        }
        Ok(table.skipped)
    }

    // ─── Node lifecycle ──────────────────────────────────────────────────

    /// Drop a new node at a device position — the device-given path; its
    /// geography is derived once at creation.
    pub fn on_drop_node(&mut self, cursor: DevicePoint) -> NodeId {
        let geo = self.to_geographic(cursor);
        self.model.store.insert(geo, cursor)
    }

    /// Delete the selected nodes; returns how many were removed.
    pub fn on_delete_selected(&mut self) -> usize {
        self.model.store.remove_selected()
    }

    /// Delete every node; returns how many were removed.
    pub fn on_delete_all(&mut self) -> usize {
        self.model.store.clear()
    }

    // ─── Map visibility ──────────────────────────────────────────────────

    /// Show/hide the land and water primitives. Nodes stay visible.
    /// Returns the new visibility.
    pub fn on_toggle_map(&mut self) -> bool {
        self.model.map_visible = !self.model.map_visible;
        self.model.map_visible
    }

    /// Delete the land geometry entirely, keeping nodes.
    pub fn on_clear_map(&mut self) {
        self.model.shapes.clear();
    }

    // ─── Redraw ──────────────────────────────────────────────────────────

    /// Answer a redraw request with a freshly computed primitive list in
    /// z order: water, land, node markers, labels. Always full-replace —
    /// nothing from a previous redraw survives.
    pub fn render(&self) -> Vec<Primitive> {
        let proj = self.model.active.as_ref();
        let view = &self.model.view;

        let mut primitives = Vec::new();
        if self.model.map_visible {
            primitives.push(water_primitive(proj, view));
            primitives.extend(
                land_polygons(&self.model.shapes, proj, view)
                    .into_iter()
                    .map(Primitive::Polygon),
            );
        }
        for node in self.model.store.iter() {
            primitives.push(Primitive::Marker(MarkerPrimitive {
                node: node.id,
                pos: node.device,
                selected: node.selected,
                z: Z_NODES,
            }));
            primitives.push(Primitive::Text(TextPrimitive {
                pos: node.device.offset_by(LABEL_OFFSET.0, LABEL_OFFSET.1),
                content: node.label.clone(),
                z: Z_LABELS,
            }));
        }
        primitives.sort_by_key(Primitive::z);
        primitives
    }

    /// Recompute every node's device position from its stored geography.
    /// Geography is the single source of truth after any view or
    /// projection change.
    fn reposition_nodes(&mut self) {
        let proj = Arc::clone(&self.model.active);
        let view = self.model.view;
        for node in self.model.store.iter_mut() {
            node.device = view.to_device(proj.as_ref(), node.geo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_projection_fails_fast_and_changes_nothing() {
        let mut canvas = MapCanvas::with_defaults();
        let before_view = *canvas.view();

        let err = canvas.on_projection_change("winkel-tripel").unwrap_err();
        assert!(matches!(err, MapError::UnknownProjection(_)));
        assert_eq!(canvas.projection_name(), "mercator");
        assert_eq!(*canvas.view(), before_view);
    }

    #[test]
    fn failed_shapefile_import_leaves_state_untouched() {
        let mut canvas = MapCanvas::with_defaults();
        let node = canvas.on_drop_node(DevicePoint::new(120.0, 80.0));

        assert!(canvas.on_import_shapefile("/nonexistent/world.shp").is_err());
        assert_eq!(canvas.shape_count(), 0);
        assert!(canvas.nodes().get(node).is_some());
    }

    #[test]
    fn drag_without_gesture_is_a_noop() {
        let mut canvas = MapCanvas::with_defaults();
        assert!(!canvas.on_drag(DevicePoint::new(300.0, 300.0)));
    }

    #[test]
    fn toggle_map_hides_water_and_land_only() {
        let mut canvas = MapCanvas::with_defaults();
        canvas.on_drop_node(DevicePoint::new(10.0, 10.0));

        assert!(!canvas.on_toggle_map());
        let primitives = canvas.render();
        assert!(primitives.iter().all(|p| matches!(
            p,
            Primitive::Marker(_) | Primitive::Text(_)
        )));
        // One marker and one label for the node.
        assert_eq!(primitives.len(), 2);
    }

    #[test]
    fn render_is_ordered_by_z() {
        let mut canvas = MapCanvas::with_defaults();
        canvas.on_drop_node(DevicePoint::new(10.0, 10.0));
        let primitives = canvas.render();
        let zs: Vec<_> = primitives.iter().map(Primitive::z).collect();
        let mut sorted = zs.clone();
        sorted.sort_unstable();
        assert_eq!(zs, sorted);
        assert!(matches!(primitives[0], Primitive::Rect(_)));
    }
}
