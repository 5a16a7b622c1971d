// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D boolean clip engine
//!
//! Polygon union/difference/intersection over sets of closed paths with
//! holes, built on the i_overlay crate. The engine is injected into the
//! drawing pipeline rather than reached through a global service instance,
//! which keeps it swappable and unit-testable.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Minimum area threshold - contours smaller than this are degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Boolean operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipMode {
    Union,
    Difference,
    Intersection,
}

impl ClipMode {
    fn overlay_rule(self) -> OverlayRule {
        match self {
            Self::Union => OverlayRule::Union,
            Self::Difference => OverlayRule::Difference,
            Self::Intersection => OverlayRule::Intersect,
        }
    }
}

/// A closed region: counter-clockwise outer contour plus clockwise holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipShape {
    pub outer: Vec<Point2<f64>>,
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl ClipShape {
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(outer: Vec<Point2<f64>>, holes: Vec<Vec<Point2<f64>>>) -> Self {
        Self { outer, holes }
    }

    /// Enclosed area: outer area minus hole areas
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        signed_area(&self.outer).abs() - holes
    }
}

/// Polygon clipping service.
///
/// Stateless; each call runs one overlay pass. Even-odd filling makes the
/// subject/clip winding irrelevant on input, and output contours are
/// re-normalized (outer CCW, holes CW) before being returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipEngine;

impl ClipEngine {
    pub fn new() -> Self {
        Self
    }

    /// Clip `subject` against `clip`.
    ///
    /// The result may contain several disjoint shapes, each with its own
    /// holes, free of self-intersections. A fully consumed subject yields
    /// an empty vec — callers treat that as "nothing left", not an error.
    pub fn clip(&self, subject: &[ClipShape], clip: &[ClipShape], mode: ClipMode) -> Vec<ClipShape> {
        let subject_paths = shapes_to_paths(subject);
        let clip_paths = shapes_to_paths(clip);

        if subject_paths.is_empty() {
            return match mode {
                ClipMode::Union => normalize_shapes(clip),
                _ => Vec::new(),
            };
        }
        if clip_paths.is_empty() {
            return match mode {
                ClipMode::Intersection => Vec::new(),
                _ => normalize_shapes(subject),
            };
        }

        let result = subject_paths.overlay(&clip_paths, mode.overlay_rule(), FillRule::EvenOdd);
        result
            .iter()
            .filter_map(|shape| shape_from_contours(shape))
            .collect()
    }

    /// Union a set of standalone contours into shapes, merging overlaps.
    pub fn union_contours(&self, contours: &[Vec<Point2<f64>>]) -> Vec<ClipShape> {
        let valid: Vec<ClipShape> = contours
            .iter()
            .filter(|c| is_valid_contour(c))
            .map(|c| ClipShape::new(c.clone()))
            .collect();
        match valid.split_first() {
            None => Vec::new(),
            Some((first, [])) => vec![first.clone()],
            Some((first, rest)) => {
                self.clip(std::slice::from_ref(first), rest, ClipMode::Union)
            }
        }
    }
}

/// Signed area of a contour; positive means counter-clockwise.
pub fn signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }
    let n = contour.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y - contour[j].x * contour[i].y;
    }
    area * 0.5
}

/// A contour is valid when it has at least 3 vertices and non-trivial area
pub fn is_valid_contour(contour: &[Point2<f64>]) -> bool {
    contour.len() >= 3 && signed_area(contour).abs() > MIN_AREA_THRESHOLD
}

/// Force counter-clockwise winding
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if signed_area(contour) < 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Force clockwise winding (hole convention)
pub fn ensure_cw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if signed_area(contour) > 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Even-odd ray-cast containment test
pub fn point_in_contour(point: &Point2<f64>, contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }
    let n = contour.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&contour[i], &contour[j]);
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Whether every vertex of `inner` lies inside `outer`
pub fn contour_inside_contour(inner: &[Point2<f64>], outer: &[Point2<f64>]) -> bool {
    inner.iter().all(|p| point_in_contour(p, outer))
}

/// Axis-aligned bounds of a contour
pub fn contour_bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    let first = contour.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &contour[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Overlap test for two axis-aligned bounds
pub fn bounds_overlap(
    a_min: &Point2<f64>,
    a_max: &Point2<f64>,
    b_min: &Point2<f64>,
    b_max: &Point2<f64>,
) -> bool {
    a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
}

/// Drop collinear vertices. Keeps the input unchanged when simplification
/// would leave fewer than 3 points.
pub fn simplify_contour(contour: &[Point2<f64>], epsilon: f64) -> Vec<Point2<f64>> {
    if contour.len() <= 3 {
        return contour.to_vec();
    }
    let n = contour.len();
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let prev = &contour[(i + n - 1) % n];
        let curr = &contour[i];
        let next = &contour[(i + 1) % n];
        let cross = (curr.x - prev.x) * (next.y - prev.y) - (curr.y - prev.y) * (next.x - prev.x);
        if cross.abs() > epsilon {
            result.push(*curr);
        }
    }
    if result.len() < 3 {
        return contour.to_vec();
    }
    result
}

// ============================================================================
// i_overlay format conversion
// ============================================================================

fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

fn shapes_to_paths(shapes: &[ClipShape]) -> Vec<Vec<[f64; 2]>> {
    let mut paths = Vec::with_capacity(shapes.len());
    for shape in shapes {
        if !is_valid_contour(&shape.outer) {
            continue;
        }
        paths.push(contour_to_path(&ensure_ccw(&shape.outer)));
        for hole in &shape.holes {
            if is_valid_contour(hole) {
                paths.push(contour_to_path(&ensure_cw(hole)));
            }
        }
    }
    paths
}

/// Re-normalize shapes without clipping (used for the empty-operand fast
/// paths so output winding matches clipped output)
fn normalize_shapes(shapes: &[ClipShape]) -> Vec<ClipShape> {
    shapes
        .iter()
        .filter(|s| is_valid_contour(&s.outer))
        .map(|s| ClipShape {
            outer: ensure_ccw(&s.outer),
            holes: s
                .holes
                .iter()
                .filter(|h| is_valid_contour(h))
                .map(|h| ensure_cw(h))
                .collect(),
        })
        .collect()
}

/// i_overlay returns each shape as contours, first outer then holes
fn shape_from_contours(contours: &[Vec<[f64; 2]>]) -> Option<ClipShape> {
    let (outer, holes) = contours.split_first()?;
    let outer: Vec<Point2<f64>> = outer.iter().map(|p| Point2::new(p[0], p[1])).collect();
    if !is_valid_contour(&outer) {
        return None;
    }
    let holes = holes
        .iter()
        .map(|c| c.iter().map(|p| Point2::new(p[0], p[1])).collect::<Vec<_>>())
        .filter(|h| is_valid_contour(h))
        .map(|h| ensure_cw(&h))
        .collect();
    Some(ClipShape {
        outer: ensure_ccw(&outer),
        holes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ]
    }

    #[test]
    fn test_signed_area_winding() {
        let ccw = square(0.0, 0.0, 1.0);
        assert!((signed_area(&ccw) - 1.0).abs() < 1e-9);
        let cw: Vec<_> = ccw.iter().rev().cloned().collect();
        assert!((signed_area(&cw) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_difference_carves_hole() {
        let engine = ClipEngine::new();
        let subject = [ClipShape::new(square(0.0, 0.0, 10.0))];
        let clip = [ClipShape::new(square(3.0, 3.0, 4.0))];

        let result = engine.clip(&subject, &clip, ClipMode::Difference);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes.len(), 1);
        assert!((result[0].area() - 84.0).abs() < 1e-6);
    }

    #[test]
    fn test_difference_disjoint_returns_subject() {
        let engine = ClipEngine::new();
        let subject = [ClipShape::new(square(0.0, 0.0, 10.0))];
        let clip = [ClipShape::new(square(20.0, 20.0, 5.0))];

        let result = engine.clip(&subject, &clip, ClipMode::Difference);
        assert_eq!(result.len(), 1);
        assert!(result[0].holes.is_empty());
        assert!((result[0].area() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_difference_full_consumption_is_empty() {
        let engine = ClipEngine::new();
        let subject = [ClipShape::new(square(2.0, 2.0, 4.0))];
        let clip = [ClipShape::new(square(0.0, 0.0, 10.0))];

        let result = engine.clip(&subject, &clip, ClipMode::Difference);
        assert!(result.is_empty());
    }

    #[test]
    fn test_difference_can_split_subject() {
        // A strip through the middle splits the square in two
        let engine = ClipEngine::new();
        let subject = [ClipShape::new(square(0.0, 0.0, 10.0))];
        let strip = vec![
            Point2::new(4.0, -1.0),
            Point2::new(6.0, -1.0),
            Point2::new(6.0, 11.0),
            Point2::new(4.0, 11.0),
        ];
        let result = engine.clip(&subject, &[ClipShape::new(strip)], ClipMode::Difference);
        assert_eq!(result.len(), 2);
        let total: f64 = result.iter().map(ClipShape::area).sum();
        assert!((total - 80.0).abs() < 1e-6);
    }

    #[test]
    fn test_union_merges_overlapping_squares() {
        let engine = ClipEngine::new();
        let a = [ClipShape::new(square(0.0, 0.0, 2.0))];
        let b = [ClipShape::new(square(1.0, 1.0, 2.0))];

        let result = engine.clip(&a, &b, ClipMode::Union);
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_intersection() {
        let engine = ClipEngine::new();
        let a = [ClipShape::new(square(0.0, 0.0, 4.0))];
        let b = [ClipShape::new(square(2.0, 2.0, 4.0))];

        let result = engine.clip(&a, &b, ClipMode::Intersection);
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_abutting_regions_clip_without_slivers() {
        // Shared-edge neighbors: subtracting one from the other leaves the
        // subject intact, no sliver shapes
        let engine = ClipEngine::new();
        let left = [ClipShape::new(square(0.0, 0.0, 5.0))];
        let right = [ClipShape::new(square(5.0, 0.0, 5.0))];

        let result = engine.clip(&left, &right, ClipMode::Difference);
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_union_contours() {
        let engine = ClipEngine::new();
        let contours = vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)];
        let result = engine.union_contours(&contours);
        assert_eq!(result.len(), 1);
        assert!((result[0].area() - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_in_contour() {
        let contour = square(0.0, 0.0, 10.0);
        assert!(point_in_contour(&Point2::new(5.0, 5.0), &contour));
        assert!(!point_in_contour(&Point2::new(15.0, 5.0), &contour));
        assert!(!point_in_contour(&Point2::new(-1.0, 5.0), &contour));
    }

    #[test]
    fn test_contour_inside_contour() {
        let outer = square(0.0, 0.0, 10.0);
        assert!(contour_inside_contour(&square(2.0, 2.0, 3.0), &outer));
        assert!(!contour_inside_contour(&square(8.0, 8.0, 5.0), &outer));
    }

    #[test]
    fn test_simplify_contour_drops_collinear_points() {
        let contour = vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert_eq!(simplify_contour(&contour, 1e-6).len(), 4);
    }

    #[test]
    fn test_is_valid_contour() {
        assert!(is_valid_contour(&square(0.0, 0.0, 1.0)));
        assert!(!is_valid_contour(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ]));
        assert!(!is_valid_contour(&[Point2::new(0.0, 0.0)]));
    }
}
