//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the translator and an external
//! system. Implementations live in `src/adapters/`.

pub mod diagram_renderer;

pub use diagram_renderer::{DiagramRenderer, RenderRequest};
