//! Element model: the graphical objects that make up a design document.
//!
//! `Element` carries the fields common to every object (position, rotation,
//! transient scale, opacity) and a tagged [`ElementKind`] with the
//! type-specific geometry and styling. The kind tag doubles as the `"type"`
//! discriminator on the wire, so a persisted element deserializes straight
//! into the right variant with any missing optional fields defaulted.
//!
//! `ElementPatch` is the sparse-update type used for incremental edits:
//! only present fields are applied, and fields that do not apply to the
//! target's kind are ignored rather than rejected, because patches can
//! arrive late from async callbacks after the element changed or vanished.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
///
/// Opaque string rather than a `Uuid` so ids minted by earlier versions of
/// the editor (timestamps, counters) survive a load/save round trip.
pub type ElementId = String;

/// Mint a fresh element id.
#[must_use]
pub fn fresh_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// Clamp an opacity value to the valid `[0, 1]` range.
#[must_use]
pub fn clamp_opacity(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// One graphical object in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique within the document; assigned at creation, immutable after.
    pub id: ElementId,
    /// Anchor x in document space.
    #[serde(default)]
    pub x: f64,
    /// Anchor y in document space.
    #[serde(default)]
    pub y: f64,
    /// Clockwise rotation in degrees. Unbounded.
    #[serde(default)]
    pub rotation: f64,
    /// Transient horizontal scale from an in-progress transform; 1 at rest.
    #[serde(rename = "scaleX", default = "default_scale")]
    pub scale_x: f64,
    /// Transient vertical scale from an in-progress transform; 1 at rest.
    #[serde(rename = "scaleY", default = "default_scale")]
    pub scale_y: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Type tag plus type-specific geometry and styling.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create an element of the given kind with a fresh id at the origin.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: fresh_id(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
            kind,
        }
    }

    /// Same element moved to a position. Builder-style, used at creation.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// Type-specific fields, discriminated by the `"type"` tag on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A run of styled text.
    Text(TextAttrs),
    /// Axis-aligned rectangle.
    Rect(RectAttrs),
    /// Circle around `(x, y)`.
    Circle(CircleAttrs),
    /// Ellipse with independent radii.
    Ellipse(EllipseAttrs),
    /// Equilateral triangle (3-sided regular polygon).
    Triangle(RegularPolygonAttrs),
    /// Regular pentagon.
    Pentagon(RegularPolygonAttrs),
    /// Regular hexagon.
    Hexagon(RegularPolygonAttrs),
    /// Star with separate inner and outer radii.
    Star(StarAttrs),
    /// Open polyline through `points`.
    Line(LineAttrs),
    /// Polyline with an arrowhead at the far end.
    Arrow(ArrowAttrs),
    /// Bitmap image referenced by URL.
    Image(ImageAttrs),
    /// Heart shape inside a `width` × `height` box.
    Heart(HeartAttrs),
}

impl ElementKind {
    /// The wire-format `"type"` tag for this kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Rect(_) => "rect",
            Self::Circle(_) => "circle",
            Self::Ellipse(_) => "ellipse",
            Self::Triangle(_) => "triangle",
            Self::Pentagon(_) => "pentagon",
            Self::Hexagon(_) => "hexagon",
            Self::Star(_) => "star",
            Self::Line(_) => "line",
            Self::Arrow(_) => "arrow",
            Self::Image(_) => "image",
            Self::Heart(_) => "heart",
        }
    }

    /// Side count for the regular-polygon kinds; `None` for everything else.
    #[must_use]
    pub fn polygon_sides(&self) -> Option<u32> {
        match self {
            Self::Triangle(_) => Some(3),
            Self::Pentagon(_) => Some(5),
            Self::Hexagon(_) => Some(6),
            _ => None,
        }
    }
}

/// Text styling and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// `"normal"` or `"bold"`.
    #[serde(default = "default_normal")]
    pub font_weight: String,
    /// `"normal"` or `"italic"`.
    #[serde(default = "default_normal")]
    pub font_style: String,
    /// Empty string or `"underline"`.
    #[serde(default)]
    pub text_decoration: String,
    #[serde(default = "default_align")]
    pub align: String,
    #[serde(default)]
    pub letter_spacing: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default = "default_text_fill")]
    pub fill: String,
    /// Wrapping width; absent means auto-sized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl Default for TextAttrs {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_normal(),
            font_style: default_normal(),
            text_decoration: String::new(),
            align: default_align(),
            letter_spacing: 0.0,
            line_height: default_line_height(),
            fill: default_text_fill(),
            width: None,
        }
    }
}

/// Rectangle geometry and fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectAttrs {
    #[serde(default = "default_rect_side")]
    pub width: f64,
    #[serde(default = "default_rect_side")]
    pub height: f64,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default)]
    pub stroke_width: f64,
}

/// Circle geometry and fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleAttrs {
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_fill")]
    pub fill: String,
}

/// Ellipse geometry and fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseAttrs {
    #[serde(default = "default_ellipse_radius_x")]
    pub radius_x: f64,
    #[serde(default = "default_ellipse_radius_y")]
    pub radius_y: f64,
    #[serde(default = "default_fill")]
    pub fill: String,
}

/// Shared geometry for triangle, pentagon, and hexagon. The side count is
/// implied by the kind tag (see [`ElementKind::polygon_sides`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularPolygonAttrs {
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_fill")]
    pub fill: String,
}

/// Star geometry and fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarAttrs {
    #[serde(default = "default_star_points")]
    pub num_points: u32,
    #[serde(default = "default_star_inner_radius")]
    pub inner_radius: f64,
    #[serde(default = "default_radius")]
    pub outer_radius: f64,
    #[serde(default = "default_fill")]
    pub fill: String,
}

/// Polyline geometry and stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAttrs {
    /// Flat `[x0, y0, x1, y1, ...]` vertex list in document space.
    #[serde(default)]
    pub points: Vec<f64>,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default = "default_line_stroke_width")]
    pub stroke_width: f64,
}

/// Arrow geometry, stroke, and head size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowAttrs {
    /// Flat `[x0, y0, x1, y1, ...]` vertex list in document space.
    #[serde(default)]
    pub points: Vec<f64>,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_fill")]
    pub stroke: String,
    #[serde(default = "default_arrow_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_pointer_size")]
    pub pointer_length: f64,
    #[serde(default = "default_pointer_size")]
    pub pointer_width: f64,
}

/// Image source and display size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttrs {
    pub src: String,
    #[serde(default = "default_rect_side")]
    pub width: f64,
    #[serde(default = "default_rect_side")]
    pub height: f64,
}

/// Heart geometry and fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartAttrs {
    #[serde(default = "default_heart_side")]
    pub width: f64,
    #[serde(default = "default_heart_side")]
    pub height: f64,
    #[serde(default = "default_fill")]
    pub fill: String,
}

/// Sparse update for an element. Only present fields are applied; fields
/// that do not exist on the target's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl ElementPatch {
    /// Apply this patch to an element. Common fields first, then the
    /// kind-specific ones that exist on the target's variant.
    pub fn apply(&self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
        if let Some(scale_x) = self.scale_x {
            element.scale_x = scale_x;
        }
        if let Some(scale_y) = self.scale_y {
            element.scale_y = scale_y;
        }
        if let Some(opacity) = self.opacity {
            element.opacity = clamp_opacity(opacity);
        }
        match &mut element.kind {
            ElementKind::Text(attrs) => self.apply_text(attrs),
            ElementKind::Rect(attrs) => {
                apply_opt(&mut attrs.width, self.width);
                apply_opt(&mut attrs.height, self.height);
                apply_opt_clone(&mut attrs.fill, self.fill.as_ref());
                if let Some(stroke) = &self.stroke {
                    attrs.stroke = Some(stroke.clone());
                }
                apply_opt(&mut attrs.stroke_width, self.stroke_width);
            }
            ElementKind::Circle(attrs) => {
                apply_opt(&mut attrs.radius, self.radius);
                apply_opt_clone(&mut attrs.fill, self.fill.as_ref());
            }
            ElementKind::Ellipse(attrs) => {
                apply_opt(&mut attrs.radius_x, self.radius_x);
                apply_opt(&mut attrs.radius_y, self.radius_y);
                apply_opt_clone(&mut attrs.fill, self.fill.as_ref());
            }
            ElementKind::Triangle(attrs) | ElementKind::Pentagon(attrs) | ElementKind::Hexagon(attrs) => {
                apply_opt(&mut attrs.radius, self.radius);
                apply_opt_clone(&mut attrs.fill, self.fill.as_ref());
            }
            ElementKind::Star(attrs) => {
                apply_opt(&mut attrs.num_points, self.num_points);
                apply_opt(&mut attrs.inner_radius, self.inner_radius);
                apply_opt(&mut attrs.outer_radius, self.outer_radius);
                apply_opt_clone(&mut attrs.fill, self.fill.as_ref());
            }
            ElementKind::Line(attrs) => {
                apply_opt_clone(&mut attrs.points, self.points.as_ref());
                apply_opt_clone(&mut attrs.stroke, self.stroke.as_ref());
                apply_opt(&mut attrs.stroke_width, self.stroke_width);
            }
            ElementKind::Arrow(attrs) => {
                apply_opt_clone(&mut attrs.points, self.points.as_ref());
                apply_opt_clone(&mut attrs.fill, self.fill.as_ref());
                apply_opt_clone(&mut attrs.stroke, self.stroke.as_ref());
                apply_opt(&mut attrs.stroke_width, self.stroke_width);
            }
            ElementKind::Image(attrs) => {
                apply_opt_clone(&mut attrs.src, self.src.as_ref());
                apply_opt(&mut attrs.width, self.width);
                apply_opt(&mut attrs.height, self.height);
            }
            ElementKind::Heart(attrs) => {
                apply_opt(&mut attrs.width, self.width);
                apply_opt(&mut attrs.height, self.height);
                apply_opt_clone(&mut attrs.fill, self.fill.as_ref());
            }
        }
    }

    fn apply_text(&self, attrs: &mut TextAttrs) {
        apply_opt_clone(&mut attrs.text, self.text.as_ref());
        apply_opt(&mut attrs.font_size, self.font_size);
        apply_opt_clone(&mut attrs.font_family, self.font_family.as_ref());
        apply_opt_clone(&mut attrs.font_weight, self.font_weight.as_ref());
        apply_opt_clone(&mut attrs.font_style, self.font_style.as_ref());
        apply_opt_clone(&mut attrs.text_decoration, self.text_decoration.as_ref());
        apply_opt_clone(&mut attrs.align, self.align.as_ref());
        apply_opt(&mut attrs.letter_spacing, self.letter_spacing);
        apply_opt(&mut attrs.line_height, self.line_height);
        apply_opt_clone(&mut attrs.fill, self.fill.as_ref());
        if let Some(width) = self.width {
            attrs.width = Some(width);
        }
    }
}

fn apply_opt<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn apply_opt_clone<T: Clone>(target: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

// Serde default values. These are what a decoder fills in when a persisted
// element omits an optional field.

fn default_scale() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    20.0
}

fn default_font_family() -> String {
    "Arial".to_owned()
}

fn default_normal() -> String {
    "normal".to_owned()
}

fn default_align() -> String {
    "left".to_owned()
}

fn default_line_height() -> f64 {
    1.2
}

fn default_text_fill() -> String {
    "#000000".to_owned()
}

fn default_fill() -> String {
    "#3b82f6".to_owned()
}

fn default_stroke() -> String {
    "#000000".to_owned()
}

fn default_rect_side() -> f64 {
    100.0
}

fn default_radius() -> f64 {
    50.0
}

fn default_ellipse_radius_x() -> f64 {
    80.0
}

fn default_ellipse_radius_y() -> f64 {
    40.0
}

fn default_star_points() -> u32 {
    5
}

fn default_star_inner_radius() -> f64 {
    25.0
}

fn default_line_stroke_width() -> f64 {
    3.0
}

fn default_arrow_stroke_width() -> f64 {
    4.0
}

fn default_pointer_size() -> f64 {
    10.0
}

fn default_heart_side() -> f64 {
    80.0
}
