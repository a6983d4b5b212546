//! Baking interactive transforms into persisted geometry.
//!
//! During a resize/rotate gesture the renderer applies live scale factors
//! to the node without touching the store. When the gesture ends, the
//! controller folds ("bakes") the accumulated scale into the element's
//! real size fields and resets `scaleX`/`scaleY` to 1, so scale never
//! compounds across repeated transforms. Minimum-size floors keep a
//! degenerate drag from collapsing geometry to zero.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::{MIN_FONT_SIZE, MIN_IMAGE_SIZE, MIN_SHAPE_SIZE, MIN_STAR_OUTER_RADIUS};
use crate::element::{Element, ElementKind};

/// Final state of a resize/rotate gesture, as reported by the renderer's
/// transformer at gesture end.
#[derive(Debug, Clone, Copy)]
pub struct TransformEnd {
    /// Accumulated horizontal scale factor.
    pub scale_x: f64,
    /// Accumulated vertical scale factor.
    pub scale_y: f64,
    /// Final absolute rotation of the node in degrees.
    pub rotation: f64,
}

impl TransformEnd {
    /// A pure rotation with no scaling.
    #[must_use]
    pub fn rotation_only(degrees: f64) -> Self {
        Self { scale_x: 1.0, scale_y: 1.0, rotation: degrees }
    }
}

/// Fold a finished transform into the element's persisted geometry and
/// reset the transient scale factors.
pub fn bake(element: &mut Element, end: &TransformEnd) {
    let sx = end.scale_x;
    let sy = end.scale_y;
    let uniform = sx.max(sy);
    match &mut element.kind {
        ElementKind::Text(attrs) => {
            attrs.font_size = (attrs.font_size * sy).max(MIN_FONT_SIZE);
            if let Some(width) = attrs.width {
                attrs.width = Some(width * sx);
            }
        }
        ElementKind::Rect(attrs) => {
            attrs.width = (attrs.width * sx).max(MIN_SHAPE_SIZE);
            attrs.height = (attrs.height * sy).max(MIN_SHAPE_SIZE);
        }
        ElementKind::Circle(attrs) => {
            attrs.radius = (attrs.radius * uniform).max(MIN_SHAPE_SIZE);
        }
        ElementKind::Ellipse(attrs) => {
            attrs.radius_x = (attrs.radius_x * sx).max(MIN_SHAPE_SIZE);
            attrs.radius_y = (attrs.radius_y * sy).max(MIN_SHAPE_SIZE);
        }
        ElementKind::Triangle(attrs) | ElementKind::Pentagon(attrs) | ElementKind::Hexagon(attrs) => {
            attrs.radius = (attrs.radius * uniform).max(MIN_SHAPE_SIZE);
        }
        ElementKind::Star(attrs) => {
            attrs.inner_radius = (attrs.inner_radius * uniform).max(MIN_SHAPE_SIZE);
            attrs.outer_radius = (attrs.outer_radius * uniform).max(MIN_STAR_OUTER_RADIUS);
        }
        ElementKind::Line(attrs) => scale_points(&mut attrs.points, sx, sy),
        ElementKind::Arrow(attrs) => scale_points(&mut attrs.points, sx, sy),
        ElementKind::Image(attrs) => {
            attrs.width = (attrs.width * sx).max(MIN_IMAGE_SIZE);
            attrs.height = (attrs.height * sy).max(MIN_IMAGE_SIZE);
        }
        ElementKind::Heart(attrs) => {
            attrs.width = (attrs.width * sx).max(MIN_SHAPE_SIZE);
            attrs.height = (attrs.height * sy).max(MIN_SHAPE_SIZE);
        }
    }
    element.rotation = end.rotation;
    element.scale_x = 1.0;
    element.scale_y = 1.0;
}

/// Scale a flat `[x0, y0, x1, y1, ...]` vertex list in place.
fn scale_points(points: &mut [f64], sx: f64, sy: f64) {
    for (i, coord) in points.iter_mut().enumerate() {
        *coord *= if i % 2 == 0 { sx } else { sy };
    }
}
