// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary representation: co-edge loops with holes
//!
//! A `CoEdgePath` is one closed outer loop plus zero or more hole loops.
//! Construction never validates — interactive edits would pay for it on
//! every drag — so the invariants (closure, winding, hole containment) are
//! checked on demand through [`CoEdgePath::validate`]. Downstream
//! algorithms assume they hold.

use crate::bool2d::{
    bounds_overlap, contour_bounds, signed_area, ClipEngine, ClipMode, ClipShape,
};
use crate::curve::{points_nearly_equal, Curve2d, TOLERANCE};
use nalgebra::{Matrix3, Point2, Vector2};
use thiserror::Error;

/// Boundary invariant violations reported by [`CoEdgePath::validate`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryError {
    #[error("loop {loop_index} has fewer than two co-edges")]
    DegenerateLoop { loop_index: usize },

    #[error("loop {loop_index} is not closed")]
    OpenLoop { loop_index: usize },

    #[error("outer loop winds clockwise, expected counter-clockwise")]
    BadWinding,

    #[error("hole {hole} is not contained in the outer loop")]
    HoleOutsideOuter { hole: usize },

    #[error("holes {first} and {second} intersect")]
    HolesIntersect { first: usize, second: usize },
}

/// A directed curve segment forming part of a boundary loop.
#[derive(Debug, Clone, PartialEq)]
pub struct CoEdge {
    pub curve: Curve2d,
}

impl CoEdge {
    pub fn new(curve: Curve2d) -> Self {
        Self { curve }
    }
}

/// An outer boundary loop plus hole loops, defining a planar region.
///
/// Curves are owned values: cloning a path never aliases another region's
/// boundary, so in-place mutation (translate, mirror) is always safe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoEdgePath {
    /// Closed, counter-clockwise outer loop
    pub outer: Vec<CoEdge>,
    /// Closed hole loops, each fully inside the outer loop
    pub holes: Vec<Vec<CoEdge>>,
}

impl CoEdgePath {
    pub fn new(outer: Vec<CoEdge>, holes: Vec<Vec<CoEdge>>) -> Self {
        Self { outer, holes }
    }

    /// Build a polygonal path from point loops, closing each loop with
    /// line segments.
    pub fn from_points(outer: &[Point2<f64>], holes: &[Vec<Point2<f64>>]) -> Self {
        Self {
            outer: loop_from_points(outer),
            holes: holes.iter().map(|h| loop_from_points(h)).collect(),
        }
    }

    /// All loops of the path: outer first, then holes
    pub fn loops(&self) -> impl Iterator<Item = &[CoEdge]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(|h| h.as_slice()))
    }

    /// Tessellate every loop into a point polygon (outer first). Arc
    /// co-edges contribute their discretization; consecutive duplicate
    /// join points are dropped.
    pub fn discrete_loops(&self) -> Vec<Vec<Point2<f64>>> {
        self.loops().map(discretize_loop).collect()
    }

    /// Even-odd containment over all loops: inside the outer loop but not
    /// inside any hole.
    pub fn contains_point(&self, p: &Point2<f64>) -> bool {
        let mut crossings = 0usize;
        for lp in self.loops() {
            for coedge in lp {
                crossings += coedge
                    .curve
                    .h_line_intersections(p.y)
                    .iter()
                    .filter(|hit| hit.x > p.x)
                    .count();
            }
        }
        crossings % 2 == 1
    }

    /// Check the boundary invariants the rest of the core assumes.
    pub fn validate(&self) -> Result<(), BoundaryError> {
        for (loop_index, lp) in self.loops().enumerate() {
            if lp.len() < 2 {
                return Err(BoundaryError::DegenerateLoop { loop_index });
            }
            for (i, coedge) in lp.iter().enumerate() {
                let next = &lp[(i + 1) % lp.len()];
                if !points_nearly_equal(&coedge.curve.end(), &next.curve.start(), TOLERANCE) {
                    return Err(BoundaryError::OpenLoop { loop_index });
                }
            }
        }

        let polys = self.discrete_loops();
        if signed_area(&polys[0]) <= 0.0 {
            return Err(BoundaryError::BadWinding);
        }

        // Vertex sampling is not enough for either check: a hole edge can
        // leave a concave outer between two interior vertices, and two
        // holes can cross without either's vertices entering the other.
        // Both run as area tests through the clip engine instead.
        let engine = ClipEngine::new();
        let outer_shape = [ClipShape::new(polys[0].clone())];
        for (hole, poly) in polys[1..].iter().enumerate() {
            let hole_shape = [ClipShape::new(poly.clone())];
            let escaped = engine.clip(&hole_shape, &outer_shape, ClipMode::Difference);
            if !escaped.is_empty() {
                return Err(BoundaryError::HoleOutsideOuter { hole });
            }
        }

        for first in 0..self.holes.len() {
            for second in first + 1..self.holes.len() {
                let (a, b) = (&polys[first + 1], &polys[second + 1]);
                let (Some(ab), Some(bb)) = (contour_bounds(a), contour_bounds(b)) else {
                    continue;
                };
                if !bounds_overlap(&ab.0, &ab.1, &bb.0, &bb.1) {
                    continue;
                }
                let shared = engine.clip(
                    &[ClipShape::new(a.clone())],
                    &[ClipShape::new(b.clone())],
                    ClipMode::Intersection,
                );
                if !shared.is_empty() {
                    return Err(BoundaryError::HolesIntersect { first, second });
                }
            }
        }

        Ok(())
    }

    /// Translate every curve in place. Derived 3D geometry must be
    /// re-extruded afterwards.
    pub fn translate(&mut self, offset: &Vector2<f64>) {
        for coedge in self.loops_mut() {
            coedge.curve.translate(offset);
        }
    }

    /// Transform every curve in place. When the transform is a reflection
    /// (negative determinant of the linear part) every loop is reversed so
    /// the outward-normal convention survives.
    pub fn transform(&mut self, m: &Matrix3<f64>) {
        for coedge in self.loops_mut() {
            coedge.curve.transform(m);
        }
        let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
        if det < 0.0 {
            reverse_loop(&mut self.outer);
            for hole in &mut self.holes {
                reverse_loop(hole);
            }
        }
    }

    fn loops_mut(&mut self) -> impl Iterator<Item = &mut CoEdge> {
        self.outer
            .iter_mut()
            .chain(self.holes.iter_mut().flatten())
    }
}

fn loop_from_points(points: &[Point2<f64>]) -> Vec<CoEdge> {
    let n = points.len();
    (0..n)
        .map(|i| CoEdge::new(Curve2d::line(points[i], points[(i + 1) % n])))
        .collect()
}

fn discretize_loop(lp: &[CoEdge]) -> Vec<Point2<f64>> {
    let mut points: Vec<Point2<f64>> = Vec::with_capacity(lp.len() * 2);
    for coedge in lp {
        let mut segment = coedge.curve.discrete_points();
        // The end of each curve is the start of the next
        segment.pop();
        for p in segment {
            if points
                .last()
                .is_some_and(|last| points_nearly_equal(last, &p, TOLERANCE))
            {
                continue;
            }
            points.push(p);
        }
    }
    points
}

/// Reverse traversal order of a loop: flip each curve, then the sequence
pub(crate) fn reverse_loop(lp: &mut Vec<CoEdge>) {
    for coedge in lp.iter_mut() {
        coedge.curve.reverse();
    }
    lp.reverse();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    fn square_with_hole() -> CoEdgePath {
        let hole = vec![
            Point2::new(3.0, 3.0),
            Point2::new(3.0, 7.0),
            Point2::new(7.0, 7.0),
            Point2::new(7.0, 3.0),
        ];
        CoEdgePath::from_points(&square(10.0), &[hole])
    }

    #[test]
    fn test_validate_square_with_hole() {
        assert_eq!(square_with_hole().validate(), Ok(()));
    }

    #[test]
    fn test_validate_open_loop() {
        let mut path = square_with_hole();
        // Break the outer loop by moving one segment away
        path.outer[1]
            .curve
            .translate(&Vector2::new(0.5, 0.0));
        assert_eq!(
            path.validate(),
            Err(BoundaryError::OpenLoop { loop_index: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_clockwise_outer() {
        let mut cw = square(10.0);
        cw.reverse();
        let path = CoEdgePath::from_points(&cw, &[]);
        assert_eq!(path.validate(), Err(BoundaryError::BadWinding));
    }

    #[test]
    fn test_validate_hole_outside_outer() {
        let hole = vec![
            Point2::new(20.0, 20.0),
            Point2::new(20.0, 22.0),
            Point2::new(22.0, 22.0),
            Point2::new(22.0, 20.0),
        ];
        let path = CoEdgePath::from_points(&square(10.0), &[hole]);
        assert_eq!(
            path.validate(),
            Err(BoundaryError::HoleOutsideOuter { hole: 0 })
        );
    }

    #[test]
    fn test_validate_intersecting_holes() {
        let a = vec![
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 6.0),
            Point2::new(6.0, 6.0),
            Point2::new(6.0, 2.0),
        ];
        let b = vec![
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 8.0),
            Point2::new(8.0, 8.0),
            Point2::new(8.0, 4.0),
        ];
        let path = CoEdgePath::from_points(&square(10.0), &[a, b]);
        assert_eq!(
            path.validate(),
            Err(BoundaryError::HolesIntersect {
                first: 0,
                second: 1
            })
        );
    }

    #[test]
    fn test_validate_crossing_bar_holes() {
        // Two bars crossing like a plus sign: neither hole's vertices lie
        // inside the other, only their edges cross
        let horizontal = vec![
            Point2::new(4.0, 9.0),
            Point2::new(16.0, 9.0),
            Point2::new(16.0, 11.0),
            Point2::new(4.0, 11.0),
        ];
        let vertical = vec![
            Point2::new(9.0, 4.0),
            Point2::new(11.0, 4.0),
            Point2::new(11.0, 16.0),
            Point2::new(9.0, 16.0),
        ];
        let path = CoEdgePath::from_points(&square(20.0), &[horizontal, vertical]);
        assert_eq!(
            path.validate(),
            Err(BoundaryError::HolesIntersect {
                first: 0,
                second: 1
            })
        );
    }

    #[test]
    fn test_validate_hole_edge_escaping_concave_outer() {
        // L-shaped outer; every hole vertex is inside, but one edge cuts
        // across the notch
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.0),
            Point2::new(6.0, 4.0),
            Point2::new(6.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let hole = vec![
            Point2::new(1.0, 9.0),
            Point2::new(2.0, 9.0),
            Point2::new(9.0, 1.0),
        ];
        let path = CoEdgePath::from_points(&outer, &[hole]);
        assert_eq!(
            path.validate(),
            Err(BoundaryError::HoleOutsideOuter { hole: 0 })
        );
    }

    #[test]
    fn test_contains_point_respects_holes() {
        let path = square_with_hole();
        assert!(path.contains_point(&Point2::new(1.0, 1.0)));
        assert!(!path.contains_point(&Point2::new(5.0, 5.0))); // in the hole
        assert!(!path.contains_point(&Point2::new(11.0, 5.0)));
    }

    #[test]
    fn test_h_line_parity_is_even() {
        // Property: for a closed loop and a scan line away from vertices,
        // the summed crossing count is even
        let path = square_with_hole();
        for y in [0.5, 2.5, 5.1, 6.9, 9.3] {
            let crossings: usize = path
                .loops()
                .flatten()
                .map(|c| c.curve.h_line_intersections(y).len())
                .sum();
            assert_eq!(crossings % 2, 0, "odd parity at y={y}");
        }
    }

    #[test]
    fn test_clone_is_deep() {
        let path = square_with_hole();
        let mut copy = path.clone();
        copy.translate(&Vector2::new(100.0, 0.0));
        // The original is untouched by mutating the clone
        assert!(points_nearly_equal(
            &path.outer[0].curve.start(),
            &Point2::new(0.0, 0.0),
            TOLERANCE
        ));
    }

    #[test]
    fn test_reflection_preserves_winding_convention() {
        let mut path = square_with_hole();
        // Mirror across the Y axis
        let m = Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        path.transform(&m);
        // Loops were reversed, so the outer loop is CCW again
        assert_eq!(path.validate(), Ok(()));
    }

    #[test]
    fn test_discrete_loops_order_and_closure() {
        let path = square_with_hole();
        let polys = path.discrete_loops();
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].len(), 4);
        assert_eq!(polys[1].len(), 4);
        assert!(signed_area(&polys[0]) > 0.0);
        assert!(signed_area(&polys[1]) < 0.0); // hole loops wind clockwise
    }
}
