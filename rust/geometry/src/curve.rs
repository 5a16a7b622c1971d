// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D curve primitives
//!
//! Closed sum type over the curve shapes a boundary loop may contain. Every
//! algorithm downstream (clipping, extrusion, drawing) is written against
//! `Curve2d` with exhaustive matches, so adding a curve variant fails to
//! compile until every algorithm handles it.

use nalgebra::{Matrix3, Point2, Vector2, Vector3};

/// Tolerance for coordinate comparisons throughout the geometry core.
///
/// All equality is tolerance-based: coordinates arrive through transform
/// chains and boolean operations and carry floating-point noise.
pub const TOLERANCE: f64 = 1e-6;

/// Scalar comparison within [`TOLERANCE`]
#[inline]
pub fn nearly_equals(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Point comparison within `tol` on both axes
#[inline]
pub fn points_nearly_equal(a: &Point2<f64>, b: &Point2<f64>, tol: f64) -> bool {
    (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
}

/// Apply a 2D homogeneous transform to a point
#[inline]
fn transform_point(m: &Matrix3<f64>, p: &Point2<f64>) -> Point2<f64> {
    let v = m * Vector3::new(p.x, p.y, 1.0);
    Point2::new(v.x, v.y)
}

/// A directed straight segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment2d {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl LineSegment2d {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Parametric evaluation on `[0, 1]`.
    ///
    /// Parameters within tolerance of 0 or 1 return exact endpoint copies
    /// rather than re-derived values.
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        if t.abs() <= TOLERANCE {
            return self.start;
        }
        if (t - 1.0).abs() <= TOLERANCE {
            return self.end;
        }
        self.start + (self.end - self.start) * t
    }

    /// Distance-based point-on-segment test
    pub fn is_point_on(&self, p: &Point2<f64>, tol: f64) -> bool {
        let d = self.end - self.start;
        let len_sq = d.norm_squared();
        if len_sq == 0.0 {
            return points_nearly_equal(p, &self.start, tol);
        }
        let t = ((p - self.start).dot(&d) / len_sq).clamp(0.0, 1.0);
        let proj = self.start + d * t;
        (p - proj).norm() <= tol
    }

    /// Intersection with the horizontal line at `y`.
    ///
    /// The strict inequality `(y0 > y) != (y1 > y)` means a horizontal edge
    /// never counts and a crossing through a shared vertex is counted by
    /// exactly one of the two incident segments. Scan-line parity depends
    /// on this.
    pub fn h_line_intersection(&self, y: f64) -> Option<Point2<f64>> {
        let (y0, y1) = (self.start.y, self.end.y);
        if (y0 > y) == (y1 > y) {
            return None;
        }
        let t = (y - y0) / (y1 - y0);
        Some(Point2::new(
            self.start.x + t * (self.end.x - self.start.x),
            y,
        ))
    }

    /// Sub-segment between parameters `t0 <= t1`
    pub fn sub_curve(&self, t0: f64, t1: f64) -> Self {
        Self::new(self.point_at(t0), self.point_at(t1))
    }

    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn translate(&mut self, offset: &Vector2<f64>) {
        self.start += offset;
        self.end += offset;
    }

    pub fn transform(&mut self, m: &Matrix3<f64>) {
        self.start = transform_point(m, &self.start);
        self.end = transform_point(m, &self.end);
    }
}

/// A directed circular arc.
///
/// `sweep` is signed: positive runs counter-clockwise from `start_angle`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc2d {
    pub center: Point2<f64>,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl Arc2d {
    pub fn new(center: Point2<f64>, radius: f64, start_angle: f64, sweep: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep,
        }
    }

    /// Reconstruct the arc through three points (start, interior, end).
    ///
    /// Used to carry arcs through affine isometries: transform three samples
    /// and rebuild. Collinear inputs fall back to a zero-sweep arc at the
    /// start point.
    pub fn through_points(start: Point2<f64>, mid: Point2<f64>, end: Point2<f64>) -> Self {
        let d = 2.0
            * ((mid.x - start.x) * (end.y - start.y) - (mid.y - start.y) * (end.x - start.x));
        if d.abs() < 1e-12 {
            return Self::new(start, 0.0, 0.0, 0.0);
        }
        let sq_s = start.coords.norm_squared();
        let sq_m = mid.coords.norm_squared();
        let sq_e = end.coords.norm_squared();
        let ux = ((sq_m - sq_s) * (end.y - start.y) - (sq_e - sq_s) * (mid.y - start.y)) / d;
        let uy = ((sq_e - sq_s) * (mid.x - start.x) - (sq_m - sq_s) * (end.x - start.x)) / d;
        let center = Point2::new(ux, uy);
        let radius = (start - center).norm();

        let a0 = (start.y - center.y).atan2(start.x - center.x);
        let am = (mid.y - center.y).atan2(mid.x - center.x);
        let a1 = (end.y - center.y).atan2(end.x - center.x);

        // Pick the sweep direction that passes through the interior sample
        let ccw_sweep = (a1 - a0).rem_euclid(std::f64::consts::TAU);
        let ccw_mid = (am - a0).rem_euclid(std::f64::consts::TAU);
        let sweep = if ccw_mid <= ccw_sweep {
            ccw_sweep
        } else {
            ccw_sweep - std::f64::consts::TAU
        };
        Self::new(center, radius, a0, sweep)
    }

    fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + t * self.sweep
    }

    fn point_at_angle(&self, angle: f64) -> Point2<f64> {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start(&self) -> Point2<f64> {
        self.point_at_angle(self.start_angle)
    }

    pub fn end(&self) -> Point2<f64> {
        self.point_at_angle(self.start_angle + self.sweep)
    }

    pub fn point_at(&self, t: f64) -> Point2<f64> {
        if t.abs() <= TOLERANCE {
            return self.start();
        }
        if (t - 1.0).abs() <= TOLERANCE {
            return self.end();
        }
        self.point_at_angle(self.angle_at(t))
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    /// Number of polyline segments used when tessellating this arc
    pub fn discrete_segment_count(&self) -> usize {
        let full = (self.radius.abs().sqrt() * 8.0).ceil();
        let frac = self.sweep.abs() / std::f64::consts::TAU;
        ((full * frac).ceil() as usize).clamp(4, 32)
    }

    /// Tessellate into points from start to end, inclusive
    pub fn discrete_points(&self) -> Vec<Point2<f64>> {
        let n = self.discrete_segment_count();
        (0..=n)
            .map(|i| self.point_at_angle(self.angle_at(i as f64 / n as f64)))
            .collect()
    }

    /// Parameter of `angle` along the arc, or `None` when outside the sweep
    fn param_of_angle(&self, angle: f64) -> Option<f64> {
        if self.sweep == 0.0 {
            return None;
        }
        let delta = if self.sweep > 0.0 {
            (angle - self.start_angle).rem_euclid(std::f64::consts::TAU)
        } else {
            (self.start_angle - angle).rem_euclid(std::f64::consts::TAU)
        };
        let t = delta / self.sweep.abs();
        (t <= 1.0 + 1e-9).then_some(t.min(1.0))
    }

    pub fn is_point_on(&self, p: &Point2<f64>, tol: f64) -> bool {
        if ((p - self.center).norm() - self.radius).abs() > tol {
            return false;
        }
        let angle = (p.y - self.center.y).atan2(p.x - self.center.x);
        self.param_of_angle(angle).is_some()
    }

    /// Intersections with the horizontal line at `y`, up to two points.
    ///
    /// Tangent contact does not count as a crossing; the arc end point is
    /// excluded the same way a segment's end vertex is, so parity across a
    /// closed loop stays even.
    pub fn h_line_intersections(&self, y: f64) -> Vec<Point2<f64>> {
        let dy = y - self.center.y;
        let disc = self.radius * self.radius - dy * dy;
        if disc <= TOLERANCE * TOLERANCE {
            return Vec::new();
        }
        let dx = disc.sqrt();
        let mut out = Vec::new();
        for x in [self.center.x - dx, self.center.x + dx] {
            let angle = dy.atan2(x - self.center.x);
            if let Some(t) = self.param_of_angle(angle) {
                // Half-open: the end point belongs to the next curve
                if t < 1.0 - 1e-9 {
                    out.push(Point2::new(x, y));
                }
            }
        }
        out
    }

    pub fn sub_curve(&self, t0: f64, t1: f64) -> Self {
        Self::new(
            self.center,
            self.radius,
            self.angle_at(t0),
            (t1 - t0) * self.sweep,
        )
    }

    pub fn reverse(&mut self) {
        self.start_angle += self.sweep;
        self.sweep = -self.sweep;
    }

    pub fn translate(&mut self, offset: &Vector2<f64>) {
        self.center += offset;
    }

    /// Apply a similarity transform (rotation, translation, mirror,
    /// uniform scale) by rebuilding the arc through three transformed
    /// samples. A circle is only closed under similarities; shear or
    /// non-uniform scale would need an elliptical carrier this type
    /// cannot represent, so such transforms are rejected in debug builds.
    pub fn transform(&mut self, m: &Matrix3<f64>) {
        debug_assert!(
            is_similarity(m),
            "arc transform requires a similarity, got a shearing or non-uniformly scaling matrix"
        );
        let s = transform_point(m, &self.point_at(0.0));
        let mid = transform_point(m, &self.point_at(0.5));
        let e = transform_point(m, &self.point_at(1.0));
        *self = Self::through_points(s, mid, e);
    }
}

/// Whether the linear part of `m` preserves circles: orthogonal columns
/// of equal length
fn is_similarity(m: &Matrix3<f64>) -> bool {
    let a = Vector2::new(m[(0, 0)], m[(1, 0)]);
    let b = Vector2::new(m[(0, 1)], m[(1, 1)]);
    let scale = a.norm().max(b.norm());
    if scale <= TOLERANCE {
        return false;
    }
    (a.norm() - b.norm()).abs() <= TOLERANCE * scale
        && a.dot(&b).abs() <= TOLERANCE * scale * scale
}

/// Polymorphic 2D curve.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve2d {
    Line(LineSegment2d),
    Arc(Arc2d),
}

impl Curve2d {
    pub fn line(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self::Line(LineSegment2d::new(start, end))
    }

    pub fn arc(center: Point2<f64>, radius: f64, start_angle: f64, sweep: f64) -> Self {
        Self::Arc(Arc2d::new(center, radius, start_angle, sweep))
    }

    pub fn start(&self) -> Point2<f64> {
        match self {
            Self::Line(l) => l.start,
            Self::Arc(a) => a.start(),
        }
    }

    pub fn end(&self) -> Point2<f64> {
        match self {
            Self::Line(l) => l.end,
            Self::Arc(a) => a.end(),
        }
    }

    /// Parametric evaluation on `[0, 1]` with endpoint snapping
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        match self {
            Self::Line(l) => l.point_at(t),
            Self::Arc(a) => a.point_at(t),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Self::Line(l) => l.length(),
            Self::Arc(a) => a.length(),
        }
    }

    /// Finite tessellation from start to end, inclusive of both
    pub fn discrete_points(&self) -> Vec<Point2<f64>> {
        match self {
            Self::Line(l) => vec![l.start, l.end],
            Self::Arc(a) => a.discrete_points(),
        }
    }

    pub fn is_point_on_curve(&self, p: &Point2<f64>, tol: f64) -> bool {
        match self {
            Self::Line(l) => l.is_point_on(p, tol),
            Self::Arc(a) => a.is_point_on(p, tol),
        }
    }

    /// Crossings of the horizontal line at `y`: 0 or 1 for a segment, up to
    /// 2 for an arc. Summed over a closed simple loop the count is even for
    /// any `y` away from vertices.
    pub fn h_line_intersections(&self, y: f64) -> Vec<Point2<f64>> {
        match self {
            Self::Line(l) => l.h_line_intersection(y).into_iter().collect(),
            Self::Arc(a) => a.h_line_intersections(y),
        }
    }

    pub fn sub_curve(&self, t0: f64, t1: f64) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.sub_curve(t0, t1)),
            Self::Arc(a) => Self::Arc(a.sub_curve(t0, t1)),
        }
    }

    /// Sameness: same variant and both endpoints within `tol`, in order.
    ///
    /// Order-sensitive by contract: a reversed copy of a curve is a
    /// different curve. Callers needing orientation-free equality check
    /// both orderings themselves.
    pub fn is_same_curve(&self, other: &Self, tol: f64) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => {
                points_nearly_equal(&a.start, &b.start, tol)
                    && points_nearly_equal(&a.end, &b.end, tol)
            }
            (Self::Arc(a), Self::Arc(b)) => {
                points_nearly_equal(&a.center, &b.center, tol)
                    && (a.radius - b.radius).abs() <= tol
                    && points_nearly_equal(&a.start(), &b.start(), tol)
                    && points_nearly_equal(&a.end(), &b.end(), tol)
                    && a.sweep.signum() == b.sweep.signum()
            }
            _ => false,
        }
    }

    pub fn reverse(&mut self) {
        match self {
            Self::Line(l) => l.reverse(),
            Self::Arc(a) => a.reverse(),
        }
    }

    pub fn translate(&mut self, offset: &Vector2<f64>) {
        match self {
            Self::Line(l) => l.translate(offset),
            Self::Arc(a) => a.translate(offset),
        }
    }

    /// Apply a planar transform in place. Segments accept any affine map;
    /// arc variants are restricted to similarities, see
    /// [`Arc2d::transform`].
    pub fn transform(&mut self, m: &Matrix3<f64>) {
        match self {
            Self::Line(l) => l.transform(m),
            Self::Arc(a) => a.transform(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_snaps_to_endpoints() {
        let seg = LineSegment2d::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        assert_eq!(seg.point_at(1e-9), seg.start);
        assert_eq!(seg.point_at(1.0 - 1e-9), seg.end);
        assert_eq!(seg.point_at(0.5), Point2::new(5.0, 0.0));
    }

    #[test]
    fn test_h_line_strict_inequality() {
        // Crossing segment yields one point
        let seg = LineSegment2d::new(Point2::new(0.0, 0.0), Point2::new(0.0, 2.0));
        assert!(seg.h_line_intersection(1.0).is_some());

        // Horizontal segment never counts
        let flat = LineSegment2d::new(Point2::new(0.0, 1.0), Point2::new(5.0, 1.0));
        assert!(flat.h_line_intersection(1.0).is_none());

        // A scan exactly through the upper endpoint does not count; the
        // segment continuing upward from that vertex does
        let below = LineSegment2d::new(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0));
        let above = LineSegment2d::new(Point2::new(0.0, 1.0), Point2::new(0.0, 2.0));
        let hits = [below.h_line_intersection(1.0), above.h_line_intersection(1.0)];
        assert_eq!(hits.iter().filter(|h| h.is_some()).count(), 1);
    }

    #[test]
    fn test_sameness_is_not_reversal_invariant() {
        let s = Curve2d::line(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let mut reversed = s.clone();
        reversed.reverse();

        assert!(!s.is_same_curve(&reversed, TOLERANCE));
        assert!(s.is_same_curve(&s.clone(), TOLERANCE));
    }

    #[test]
    fn test_arc_endpoints_and_midpoint() {
        let arc = Arc2d::new(Point2::new(0.0, 0.0), 2.0, 0.0, std::f64::consts::PI);
        assert!(points_nearly_equal(&arc.start(), &Point2::new(2.0, 0.0), 1e-9));
        assert!(points_nearly_equal(&arc.end(), &Point2::new(-2.0, 0.0), 1e-9));
        assert!(points_nearly_equal(&arc.point_at(0.5), &Point2::new(0.0, 2.0), 1e-9));
    }

    #[test]
    fn test_arc_h_line_intersections() {
        // Upper half circle of radius 2: a scan at y=1 crosses twice
        let arc = Arc2d::new(Point2::new(0.0, 0.0), 2.0, 0.0, std::f64::consts::PI);
        assert_eq!(arc.h_line_intersections(1.0).len(), 2);

        // Scan above the arc: no crossings
        assert!(arc.h_line_intersections(3.0).is_empty());

        // Tangent at the apex is not a crossing
        assert!(arc.h_line_intersections(2.0).is_empty());
    }

    #[test]
    fn test_arc_through_points_roundtrip() {
        let arc = Arc2d::new(Point2::new(1.0, -1.0), 3.0, 0.3, 1.8);
        let rebuilt =
            Arc2d::through_points(arc.point_at(0.0), arc.point_at(0.5), arc.point_at(1.0));
        assert!(points_nearly_equal(&rebuilt.center, &arc.center, 1e-6));
        assert!((rebuilt.radius - arc.radius).abs() < 1e-6);
        assert!((rebuilt.sweep - arc.sweep).abs() < 1e-6);
    }

    #[test]
    fn test_arc_reverse_swaps_endpoints() {
        let mut arc = Arc2d::new(Point2::new(0.0, 0.0), 1.0, 0.2, 1.1);
        let (s, e) = (arc.start(), arc.end());
        arc.reverse();
        assert!(points_nearly_equal(&arc.start(), &e, 1e-9));
        assert!(points_nearly_equal(&arc.end(), &s, 1e-9));
    }

    #[test]
    fn test_uniform_scale_carries_arc() {
        let m = Matrix3::new(2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0);
        let mut curve = Curve2d::arc(Point2::new(1.0, 1.0), 1.5, 0.1, 1.2);
        curve.transform(&m);
        if let Curve2d::Arc(a) = &curve {
            assert!((a.radius - 3.0).abs() < 1e-6);
            assert!(points_nearly_equal(&a.center, &Point2::new(2.0, 2.0), 1e-6));
        } else {
            panic!("arc expected after transform");
        }
    }

    #[test]
    #[should_panic(expected = "similarity")]
    fn test_arc_transform_rejects_shear() {
        let m = Matrix3::new(1.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let mut curve = Curve2d::arc(Point2::new(0.0, 0.0), 1.0, 0.0, 1.0);
        curve.transform(&m);
    }

    #[test]
    fn test_mirror_transform_carries_arc() {
        // Reflection across the Y axis
        let m = Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let mut curve = Curve2d::arc(Point2::new(2.0, 0.0), 1.0, 0.0, std::f64::consts::PI);
        let old_start = curve.start();
        curve.transform(&m);

        assert!(points_nearly_equal(
            &curve.start(),
            &Point2::new(-old_start.x, old_start.y),
            1e-6
        ));
        if let Curve2d::Arc(a) = &curve {
            assert!((a.radius - 1.0).abs() < 1e-6);
            // Reflection flips the sweep direction
            assert!(a.sweep < 0.0);
        } else {
            panic!("arc expected after transform");
        }
    }
}
