//! The node registry: id-keyed storage for point markers.
//!
//! A node's identity is its geographic coordinate; the device position is
//! derived state kept in step with the active projection and view
//! transform. Nodes are owned by id in an insertion-ordered map — no
//! back-references to any canvas or controller, so components affect a
//! node by id lookup only.

use crate::geo::{DevicePoint, GeoPoint};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed device-pixel offset of a node's text label from its marker.
pub const LABEL_OFFSET: (f64, f64) = (-5.0, 30.0);

/// Display precision of label coordinates. Cosmetic only: the stored
/// geography keeps full precision.
const LABEL_DECIMALS: usize = 5;

/// Opaque node identifier, unique within one `NodeStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A point marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Authoritative geographic position.
    pub geo: GeoPoint,
    /// Derived device position under the current projection and view.
    pub device: DevicePoint,
    /// Selection is a style toggle only; it never moves the node.
    pub selected: bool,
    /// Rounded rendering of `geo` shown next to the marker.
    pub label: String,
}

impl Node {
    /// Format the display label for a geographic position.
    pub fn format_label(geo: GeoPoint) -> String {
        format!(
            "({:.prec$}, {:.prec$})",
            geo.lon,
            geo.lat,
            prec = LABEL_DECIMALS
        )
    }
}

/// Id-keyed node registry with O(1) lookup and stable iteration order.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NodeStore {
    nodes: IndexMap<NodeId, Node>,
    next_id: u64,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with both positions already known. Callers derive the
    /// missing half: drop events derive geography from the device point,
    /// bulk imports derive the device point from geography.
    pub fn insert(&mut self, geo: GeoPoint, device: DevicePoint) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                id,
                geo,
                device,
                selected: false,
                label: Node::format_label(geo),
            },
        );
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Move a node to a new position, refreshing its label.
    pub fn update_position(&mut self, id: NodeId, device: DevicePoint, geo: GeoPoint) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.device = device;
            node.geo = geo;
            node.label = Node::format_label(geo);
        }
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.shift_remove(&id)
    }

    /// Remove every selected node; returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| !node.selected);
        before - self.nodes.len()
    }

    /// Remove every node; returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.nodes.len();
        self.nodes.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.selected = selected;
        }
    }

    pub fn clear_selection(&mut self) {
        for node in self.nodes.values_mut() {
            node.selected = false;
        }
    }

    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.selected)
            .map(|n| n.id)
            .collect()
    }
}
