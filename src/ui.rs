//! Presentation-layer state: active tool, style pickers, zoom and pan.
//!
//! These are the global mutable UI flags of the editor chrome, gathered
//! into one value object and kept strictly apart from the element store
//! and history. Nothing in here ever pushes a history snapshot or marks
//! the document dirty.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::consts::{DEFAULT_GRID_SIZE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// A point in either screen or document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Drag the viewport instead of elements.
    Pan,
}

/// Current style-picker values, applied to newly created elements and
/// mirrored onto a text element when editing begins.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSettings {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: String,
    pub opacity: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            fill: "#3b82f6".to_owned(),
            stroke: "#000000".to_owned(),
            stroke_width: 0.0,
            font_family: "Arial".to_owned(),
            font_size: 20.0,
            bold: false,
            italic: false,
            underline: false,
            align: "left".to_owned(),
            opacity: 1.0,
        }
    }
}

impl StyleSettings {
    /// Wire value for the font weight (`"bold"` / `"normal"`).
    #[must_use]
    pub fn font_weight(&self) -> String {
        if self.bold { "bold".to_owned() } else { "normal".to_owned() }
    }

    /// Wire value for the font style (`"italic"` / `"normal"`).
    #[must_use]
    pub fn font_style(&self) -> String {
        if self.italic { "italic".to_owned() } else { "normal".to_owned() }
    }

    /// Wire value for the text decoration (`"underline"` or empty).
    #[must_use]
    pub fn text_decoration(&self) -> String {
        if self.underline { "underline".to_owned() } else { String::new() }
    }
}

/// Presentation state for the editor chrome.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Style-picker values for new elements.
    pub style: StyleSettings,
    /// Whether the alignment grid overlay is visible.
    pub show_grid: bool,
    /// Grid spacing in document units.
    pub grid_size: f64,
    /// Viewport zoom factor, clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    pub zoom: f64,
    /// Viewport pan x in screen pixels.
    pub pan_x: f64,
    /// Viewport pan y in screen pixels.
    pub pan_y: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            style: StyleSettings::default(),
            show_grid: false,
            grid_size: DEFAULT_GRID_SIZE,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl UiState {
    /// Set the zoom factor, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// One multiplicative zoom step in.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// One multiplicative zoom step out.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Back to 1:1.
    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Convert a document-space point to screen coordinates through the
    /// current zoom/pan, e.g. to place the text-edit overlay.
    #[must_use]
    pub fn document_to_screen(&self, document: Point) -> Point {
        Point {
            x: document.x * self.zoom + self.pan_x,
            y: document.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space point to document coordinates.
    #[must_use]
    pub fn screen_to_document(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }
}
