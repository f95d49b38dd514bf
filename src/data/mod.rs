pub mod manifest;
pub mod sheet_geometry;

pub use manifest::{SheetDescriptor, SheetManifest, IDLE_SHEET, WALK_SHEET};
pub use sheet_geometry::{rect_for, FrameRect, SheetGeometry};
