//! Marquee (rubber-band) selection.
//!
//! The selection set lives on the nodes themselves as a style flag; this
//! engine owns only the in-progress marquee rectangle. The two are
//! mutually exclusive: starting a marquee clears the selection
//! immediately, and only on release does the enclosed set become the new
//! selection.

use pangea_core::{DevicePoint, NodeId, NodeStore};
use pangea_render::hit::nodes_in_rect;

/// An in-progress marquee rectangle from the press point to the current
/// pointer. Corners may be in any order; normalization happens on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub start: DevicePoint,
    pub current: DevicePoint,
}

/// Tracks the marquee and applies the selection-mutation rules.
#[derive(Debug, Default)]
pub struct SelectionEngine {
    marquee: Option<Marquee>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press directly on a node. If it is already selected the whole
    /// selection is preserved (the group-drag path); otherwise the
    /// selection is replaced with just that node.
    pub fn press_on_node(&mut self, store: &mut NodeStore, id: NodeId) {
        self.marquee = None;
        let already_selected = store.get(id).is_some_and(|n| n.selected);
        if already_selected {
            return;
        }
        store.clear_selection();
        store.set_selected(id, true);
        log::debug!("selection replaced with {id}");
    }

    /// Press on empty canvas: clear the selection now and start tracking
    /// a marquee from this point.
    pub fn begin_marquee(&mut self, store: &mut NodeStore, at: DevicePoint) {
        store.clear_selection();
        self.marquee = Some(Marquee {
            start: at,
            current: at,
        });
    }

    /// Track the pointer while the marquee is active. Returns whether a
    /// marquee was actually in progress.
    pub fn update_marquee(&mut self, at: DevicePoint) -> bool {
        match &mut self.marquee {
            Some(marquee) => {
                marquee.current = at;
                true
            }
            None => false,
        }
    }

    /// Release: the selection becomes exactly the nodes enclosed by the
    /// normalized rectangle (inclusive edges). Zero enclosed nodes is a
    /// no-op selection, not an error. Returns the number selected.
    pub fn end_marquee(&mut self, store: &mut NodeStore) -> usize {
        let Some(marquee) = self.marquee.take() else {
            return 0;
        };
        let enclosed = nodes_in_rect(store, marquee.start, marquee.current);
        for &id in &enclosed {
            store.set_selected(id, true);
        }
        log::debug!("marquee selected {} node(s)", enclosed.len());
        enclosed.len()
    }

    /// The marquee currently being dragged, if any.
    pub fn marquee(&self) -> Option<Marquee> {
        self.marquee
    }

    pub fn is_marquee_active(&self) -> bool {
        self.marquee.is_some()
    }
}
