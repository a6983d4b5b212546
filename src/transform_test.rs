#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{
    ArrowAttrs, CircleAttrs, EllipseAttrs, HeartAttrs, ImageAttrs, LineAttrs, RectAttrs,
    RegularPolygonAttrs, StarAttrs, TextAttrs,
};

// =============================================================
// Helpers
// =============================================================

fn end(scale_x: f64, scale_y: f64) -> TransformEnd {
    TransformEnd { scale_x, scale_y, rotation: 0.0 }
}

fn circle(radius: f64) -> Element {
    Element::new(ElementKind::Circle(CircleAttrs { radius, fill: "#3b82f6".to_owned() }))
}

fn rect(width: f64, height: f64) -> Element {
    Element::new(ElementKind::Rect(RectAttrs {
        width,
        height,
        fill: "#3b82f6".to_owned(),
        stroke: None,
        stroke_width: 0.0,
    }))
}

// =============================================================
// Scale reset and rotation
// =============================================================

#[test]
fn bake_resets_transient_scale() {
    let mut element = rect(100.0, 100.0);
    element.scale_x = 1.5;
    element.scale_y = 2.0;
    bake(&mut element, &end(1.5, 2.0));
    assert_eq!(element.scale_x, 1.0);
    assert_eq!(element.scale_y, 1.0);
}

#[test]
fn bake_assigns_absolute_rotation() {
    let mut element = rect(100.0, 100.0);
    element.rotation = 10.0;
    bake(&mut element, &TransformEnd { scale_x: 1.0, scale_y: 1.0, rotation: 45.0 });
    assert_eq!(element.rotation, 45.0);
}

#[test]
fn rotation_only_leaves_geometry_alone() {
    let mut element = rect(100.0, 60.0);
    bake(&mut element, &TransformEnd::rotation_only(90.0));
    let ElementKind::Rect(attrs) = &element.kind else {
        panic!("expected rect kind");
    };
    assert_eq!(attrs.width, 100.0);
    assert_eq!(attrs.height, 60.0);
    assert_eq!(element.rotation, 90.0);
}

// =============================================================
// Per-kind geometry folding
// =============================================================

#[test]
fn circle_uses_the_larger_scale_factor() {
    let mut element = circle(50.0);
    bake(&mut element, &end(1.5, 2.0));
    let ElementKind::Circle(attrs) = &element.kind else {
        panic!("expected circle kind");
    };
    assert_eq!(attrs.radius, 100.0);
}

#[test]
fn rect_scales_each_axis() {
    let mut element = rect(100.0, 50.0);
    bake(&mut element, &end(2.0, 3.0));
    let ElementKind::Rect(attrs) = &element.kind else {
        panic!("expected rect kind");
    };
    assert_eq!(attrs.width, 200.0);
    assert_eq!(attrs.height, 150.0);
}

#[test]
fn ellipse_scales_radii_independently() {
    let mut element =
        Element::new(ElementKind::Ellipse(EllipseAttrs {
            radius_x: 80.0,
            radius_y: 40.0,
            fill: "#3b82f6".to_owned(),
        }));
    bake(&mut element, &end(0.5, 2.0));
    let ElementKind::Ellipse(attrs) = &element.kind else {
        panic!("expected ellipse kind");
    };
    assert_eq!(attrs.radius_x, 40.0);
    assert_eq!(attrs.radius_y, 80.0);
}

#[test]
fn polygon_radius_uses_uniform_scale() {
    let mut element = Element::new(ElementKind::Pentagon(RegularPolygonAttrs {
        radius: 50.0,
        fill: "#3b82f6".to_owned(),
    }));
    bake(&mut element, &end(3.0, 2.0));
    let ElementKind::Pentagon(attrs) = &element.kind else {
        panic!("expected pentagon kind");
    };
    assert_eq!(attrs.radius, 150.0);
}

#[test]
fn star_scales_both_radii() {
    let mut element = Element::new(ElementKind::Star(StarAttrs {
        num_points: 5,
        inner_radius: 25.0,
        outer_radius: 50.0,
        fill: "#3b82f6".to_owned(),
    }));
    bake(&mut element, &end(2.0, 2.0));
    let ElementKind::Star(attrs) = &element.kind else {
        panic!("expected star kind");
    };
    assert_eq!(attrs.inner_radius, 50.0);
    assert_eq!(attrs.outer_radius, 100.0);
}

#[test]
fn text_scales_font_size_from_vertical_factor() {
    let mut element = Element::new(ElementKind::Text(TextAttrs {
        text: "hi".to_owned(),
        width: Some(120.0),
        ..TextAttrs::default()
    }));
    bake(&mut element, &end(2.0, 1.5));
    let ElementKind::Text(attrs) = &element.kind else {
        panic!("expected text kind");
    };
    assert_eq!(attrs.font_size, 30.0);
    assert_eq!(attrs.width, Some(240.0));
}

#[test]
fn heart_scales_each_axis() {
    let mut element = Element::new(ElementKind::Heart(HeartAttrs {
        width: 80.0,
        height: 80.0,
        fill: "#ef4444".to_owned(),
    }));
    bake(&mut element, &end(2.0, 0.5));
    let ElementKind::Heart(attrs) = &element.kind else {
        panic!("expected heart kind");
    };
    assert_eq!(attrs.width, 160.0);
    assert_eq!(attrs.height, 40.0);
}

#[test]
fn image_scales_each_axis() {
    let mut element = Element::new(ElementKind::Image(ImageAttrs {
        src: "https://example.com/a.png".to_owned(),
        width: 300.0,
        height: 200.0,
    }));
    bake(&mut element, &end(0.5, 0.5));
    let ElementKind::Image(attrs) = &element.kind else {
        panic!("expected image kind");
    };
    assert_eq!(attrs.width, 150.0);
    assert_eq!(attrs.height, 100.0);
}

#[test]
fn line_scales_alternating_coordinates() {
    let mut element = Element::new(ElementKind::Line(LineAttrs {
        points: vec![100.0, 150.0, 200.0, 150.0],
        stroke: "#000000".to_owned(),
        stroke_width: 3.0,
    }));
    bake(&mut element, &end(2.0, 0.5));
    let ElementKind::Line(attrs) = &element.kind else {
        panic!("expected line kind");
    };
    assert_eq!(attrs.points, vec![200.0, 75.0, 400.0, 75.0]);
}

#[test]
fn arrow_scales_alternating_coordinates() {
    let mut element = Element::new(ElementKind::Arrow(ArrowAttrs {
        points: vec![0.0, 0.0, 100.0, 50.0],
        fill: "#3b82f6".to_owned(),
        stroke: "#3b82f6".to_owned(),
        stroke_width: 4.0,
        pointer_length: 10.0,
        pointer_width: 10.0,
    }));
    bake(&mut element, &end(3.0, 2.0));
    let ElementKind::Arrow(attrs) = &element.kind else {
        panic!("expected arrow kind");
    };
    assert_eq!(attrs.points, vec![0.0, 0.0, 300.0, 100.0]);
}

// =============================================================
// Minimum-size floors
// =============================================================

#[test]
fn rect_floors_at_min_shape_size() {
    let mut element = rect(100.0, 100.0);
    bake(&mut element, &end(0.01, 0.01));
    let ElementKind::Rect(attrs) = &element.kind else {
        panic!("expected rect kind");
    };
    assert_eq!(attrs.width, 5.0);
    assert_eq!(attrs.height, 5.0);
}

#[test]
fn star_outer_radius_floors_higher_than_inner() {
    let mut element = Element::new(ElementKind::Star(StarAttrs {
        num_points: 5,
        inner_radius: 25.0,
        outer_radius: 50.0,
        fill: "#3b82f6".to_owned(),
    }));
    bake(&mut element, &end(0.001, 0.001));
    let ElementKind::Star(attrs) = &element.kind else {
        panic!("expected star kind");
    };
    assert_eq!(attrs.inner_radius, 5.0);
    assert_eq!(attrs.outer_radius, 10.0);
}

#[test]
fn font_size_floors_at_minimum() {
    let mut element = Element::new(ElementKind::Text(TextAttrs {
        text: "hi".to_owned(),
        ..TextAttrs::default()
    }));
    bake(&mut element, &end(1.0, 0.01));
    let ElementKind::Text(attrs) = &element.kind else {
        panic!("expected text kind");
    };
    assert_eq!(attrs.font_size, 8.0);
}

#[test]
fn image_floors_at_min_image_size() {
    let mut element = Element::new(ElementKind::Image(ImageAttrs {
        src: "https://example.com/a.png".to_owned(),
        width: 100.0,
        height: 100.0,
    }));
    bake(&mut element, &end(0.01, 0.01));
    let ElementKind::Image(attrs) = &element.kind else {
        panic!("expected image kind");
    };
    assert_eq!(attrs.width, 10.0);
    assert_eq!(attrs.height, 10.0);
}
