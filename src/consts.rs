//! Shared numeric constants for the engine.

// ── Geometry clamps ─────────────────────────────────────────────

/// Smallest width/height/radius a baked transform may leave on a shape.
pub const MIN_SHAPE_SIZE: f64 = 5.0;

/// Smallest outer radius for a star after baking.
pub const MIN_STAR_OUTER_RADIUS: f64 = 10.0;

/// Smallest font size a baked transform may leave on a text element.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Smallest width/height for an image after baking.
pub const MIN_IMAGE_SIZE: f64 = 10.0;

// ── Editing ─────────────────────────────────────────────────────

/// Position offset applied to duplicated and pasted elements, in document units.
pub const DUPLICATE_OFFSET: f64 = 15.0;

/// Largest dimension allowed for a freshly placed image; bigger uploads are
/// scaled down to fit.
pub const MAX_IMAGE_DIMENSION: f64 = 300.0;

// ── Canvas ──────────────────────────────────────────────────────

/// Canvas width when a document does not specify one.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Canvas height when a document does not specify one.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Grid spacing in document units.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Lower zoom bound.
pub const ZOOM_MIN: f64 = 0.1;

/// Upper zoom bound.
pub const ZOOM_MAX: f64 = 5.0;

/// Multiplicative step for zoom in/out.
pub const ZOOM_STEP: f64 = 1.1;

// ── Export ──────────────────────────────────────────────────────

/// Side length in pixels of the square thumbnail generated on complete save.
pub const THUMBNAIL_SIZE: u32 = 200;
