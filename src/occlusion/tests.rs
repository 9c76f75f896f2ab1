use super::*;
use crate::annotation::{AnnotationInfo, AnnotationType};

fn viewport() -> Viewport {
    Viewport::new(100.0, 100.0)
}

fn shape(id: &str, kind: AnnotationType, points: &[f64], thickness: f64) -> Annotation {
    Annotation::new(
        id,
        StatusConfig::default().end,
        kind,
        AnnotationInfo {
            points: Some(points.to_vec()),
            thickness: Some(thickness),
            ..AnnotationInfo::default()
        },
    )
}

fn eraser_at(id: &str, points: &[f64]) -> Annotation {
    shape(id, AnnotationType::ElementEraser, points, 1.0)
}

fn visibility(annotations: &[Annotation]) -> Vec<bool> {
    compute_visibility(annotations, viewport(), &StatusConfig::default())
}

fn text_box() -> Annotation {
    Annotation::new(
        "T",
        StatusConfig::default().end,
        AnnotationType::Text,
        AnnotationInfo {
            x: Some(10.0),
            y: Some(10.0),
            text: Some("note".into()),
            text_box_width: Some(20.0),
            text_box_height: Some(5.0),
            ..AnnotationInfo::default()
        },
    )
}

#[test]
fn element_eraser_on_line_hides_it() {
    let annotations = vec![
        shape("A", AnnotationType::Line, &[10.0, 10.0, 90.0, 10.0], 1.0),
        eraser_at("B", &[50.0, 10.0]),
    ];
    assert_eq!(visibility(&annotations), vec![false, false]);
}

#[test]
fn element_eraser_off_line_leaves_it() {
    let annotations = vec![
        shape("A", AnnotationType::Line, &[10.0, 10.0, 90.0, 10.0], 1.0),
        eraser_at("B", &[50.0, 40.0]),
    ];
    assert_eq!(visibility(&annotations), vec![true, false]);
}

#[test]
fn ordinary_shapes_never_occlude_each_other() {
    let annotations = vec![
        shape("R1", AnnotationType::Rectangle, &[10.0, 10.0, 50.0, 50.0], 1.0),
        shape("R2", AnnotationType::Rectangle, &[10.0, 10.0, 50.0, 50.0], 1.0),
        shape("R3", AnnotationType::Rectangle, &[30.0, 30.0, 70.0, 70.0], 1.0),
    ];
    assert_eq!(visibility(&annotations), vec![true, true, true]);
}

#[test]
fn text_box_is_erased_inside_only() {
    let hit = vec![text_box(), eraser_at("E", &[15.0, 12.0])];
    assert_eq!(visibility(&hit), vec![false, false]);

    let miss = vec![text_box(), eraser_at("E", &[50.0, 50.0])];
    assert_eq!(visibility(&miss), vec![true, false]);
}

#[test]
fn eraser_only_reaches_earlier_shapes() {
    let annotations = vec![
        eraser_at("E", &[50.0, 10.0]),
        shape("A", AnnotationType::Line, &[10.0, 10.0, 90.0, 10.0], 1.0),
    ];
    assert_eq!(visibility(&annotations), vec![false, true]);
}

#[test]
fn any_eraser_point_is_enough() {
    let annotations = vec![
        shape("A", AnnotationType::Line, &[10.0, 10.0, 90.0, 10.0], 1.0),
        eraser_at("E", &[0.0, 90.0, 90.0, 90.0, 30.0, 10.0]),
    ];
    assert_eq!(visibility(&annotations), vec![false, false]);
}

#[test]
fn rectangle_interior_is_not_erasable() {
    let rect = shape("R", AnnotationType::Rectangle, &[10.0, 10.0, 50.0, 50.0], 1.0);
    assert_eq!(
        visibility(&[rect.clone(), eraser_at("E", &[30.0, 30.0])]),
        vec![true, false]
    );
    assert_eq!(
        visibility(&[rect, eraser_at("E", &[50.0, 30.0])]),
        vec![false, false]
    );
}

#[test]
fn triangle_edges_are_erasable() {
    let tri = shape("T", AnnotationType::Triangle, &[10.0, 10.0, 50.0, 50.0], 1.0);
    // Midpoint of the base
    assert_eq!(
        visibility(&[tri.clone(), eraser_at("E", &[30.0, 50.0])]),
        vec![false, false]
    );
    assert_eq!(
        visibility(&[tri, eraser_at("E", &[30.0, 40.0])]),
        vec![true, false]
    );
}

#[test]
fn ellipse_outline_is_erasable_but_center_is_not() {
    let oval = shape("O", AnnotationType::Ellipse, &[10.0, 10.0, 50.0, 30.0], 1.0);
    assert_eq!(
        visibility(&[oval.clone(), eraser_at("E", &[10.0, 20.0])]),
        vec![false, false]
    );
    assert_eq!(
        visibility(&[oval, eraser_at("E", &[30.0, 20.0])]),
        vec![true, false]
    );
}

#[test]
fn finished_pencil_curve_is_sampled() {
    let mut pencil = shape(
        "P",
        AnnotationType::Pencil,
        &[0.0, 50.0, 50.0, 0.0, 100.0, 50.0],
        2.0,
    );
    pencil.annotation_info.commands = Some(vec![1, 3]);

    // The quadratic peaks at (50, 25).
    assert_eq!(
        visibility(&[pencil.clone(), eraser_at("E", &[50.0, 25.5])]),
        vec![false, false]
    );
    assert_eq!(
        visibility(&[pencil, eraser_at("E", &[50.0, 0.0])]),
        vec![true, false]
    );
}

#[test]
fn live_pencil_is_tested_as_polyline() {
    let mut pencil = shape(
        "P",
        AnnotationType::Pencil,
        &[0.0, 50.0, 50.0, 0.0, 100.0, 50.0],
        1.0,
    );
    pencil.status = StatusConfig::default().update;

    // A vertex of the polyline, which a fitted curve would not pass through.
    assert_eq!(
        visibility(&[pencil, eraser_at("E", &[50.0, 0.0])]),
        vec![false, false]
    );
}

#[test]
fn freehand_erasers_and_unknown_types_are_never_hidden() {
    let annotations = vec![
        shape("X", AnnotationType::Eraser, &[50.0, 50.0], 5.0),
        shape("U", AnnotationType::Other("sticker".into()), &[50.0, 50.0], 5.0),
        shape("M", AnnotationType::Line, &[50.0], 5.0),
        eraser_at("E", &[50.0, 50.0]),
    ];
    assert_eq!(visibility(&annotations), vec![true, true, true, false]);
}

#[test]
fn adding_an_eraser_never_reveals_and_removing_it_restores() {
    let mut annotations = vec![
        shape("A", AnnotationType::Line, &[10.0, 10.0, 90.0, 10.0], 1.0),
        shape("B", AnnotationType::Rectangle, &[20.0, 20.0, 60.0, 60.0], 1.0),
        shape("C", AnnotationType::Ellipse, &[0.0, 0.0, 40.0, 40.0], 1.0),
        eraser_at("E1", &[20.0, 40.0]),
        text_box(),
    ];
    let before = visibility(&annotations);

    for probe in [
        [50.0, 10.0],
        [60.0, 40.0],
        [15.0, 12.0],
        [99.0, 99.0],
        [20.0, 20.0],
    ] {
        annotations.push(eraser_at("E2", &probe));
        let after = visibility(&annotations);
        for (old, new) in before.iter().zip(&after) {
            assert!(!new || *old, "eraser at {probe:?} revealed a shape");
        }
        annotations.pop();
        assert_eq!(visibility(&annotations), before);
    }
}

#[test]
fn curve_step_is_configurable() {
    let mut pencil = shape(
        "P",
        AnnotationType::Pencil,
        &[0.0, 50.0, 50.0, 0.0, 100.0, 50.0],
        1.0,
    );
    pencil.annotation_info.commands = Some(vec![1, 3]);
    // B(0.125) on the quadratic: x = 100t, y = 50(1 - 2t + 2t^2)
    let annotations = vec![pencil, eraser_at("E", &[12.5, 39.0625])];
    let statuses = StatusConfig::default();

    // Quarter steps sample t = 0 and t = 0.25, both far from the eraser.
    let coarse = OcclusionResolver::new(&statuses)
        .with_curve_step(0.25)
        .resolve(&annotations, viewport());
    assert_eq!(coarse, vec![true, false]);

    let fine = OcclusionResolver::new(&statuses)
        .with_curve_step(0.125)
        .resolve(&annotations, viewport());
    assert_eq!(fine, vec![false, false]);
}

#[test]
fn curve_step_is_clamped_to_config_range() {
    let statuses = StatusConfig::default();
    let step = |value: f64| OcclusionResolver::new(&statuses).with_curve_step(value).curve_step();

    assert_eq!(step(1e-12), 0.001);
    assert_eq!(step(0.0), 0.001);
    assert_eq!(step(-3.0), 0.001);
    assert_eq!(step(1.0), 0.25);
    assert_eq!(step(f64::NAN), 0.01);
    assert_eq!(step(0.05), 0.05);
}
