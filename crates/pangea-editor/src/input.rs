//! Input abstraction layer.
//!
//! The canvas controller accepts these toolkit-independent records instead
//! of any widget library's event types; the presentation layer translates
//! its own events into them.

/// Which pointer button a press or release refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Selects, drops, and drags nodes; draws the marquee.
    Primary,
    /// Pans the view.
    Secondary,
}

/// Wheel direction, already quantized by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    In,
    Out,
}

impl WheelDirection {
    /// The anchored-zoom factor for one wheel step. The two directions are
    /// exact inverses so a wheel-in/wheel-out pair restores the view.
    pub fn factor(self) -> f64 {
        match self {
            WheelDirection::In => 1.25,
            WheelDirection::Out => 0.8,
        }
    }
}
