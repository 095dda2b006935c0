//! MusicXML-aware colored overlay projection.

pub mod projector;

pub use projector::{project_overlay, OverlayResult, COLORABLE_TAGS, COLOR_CHANGE, COLOR_DELETE, COLOR_INSERT};
