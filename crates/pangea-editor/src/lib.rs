pub mod controller;
pub mod drag;
pub mod import;
pub mod input;
pub mod selection;

pub use controller::MapCanvas;
pub use drag::DragController;
pub use import::{ImportError, TableImport, read_node_table, read_node_table_path, read_shapefile};
pub use input::{PointerButton, WheelDirection};
pub use selection::SelectionEngine;
