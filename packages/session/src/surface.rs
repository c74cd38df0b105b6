//! # Editor Surfaces
//!
//! The visual editor widgets live outside the core; the session drives
//! them through this seam and never reads their rendering state.

use serde::{Deserialize, Serialize};

/// Pixel dimensions reported by or pushed to a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDims {
    pub width: u32,
    pub height: u32,
}

/// One editing surface (input or output side)
pub trait EditorSurface: Send {
    /// Replace the surface's full text
    fn set_value(&mut self, text: &str);

    /// Current layout
    fn layout_info(&self) -> LayoutDims;

    /// Relayout to new dimensions
    fn layout(&mut self, dims: LayoutDims);
}
