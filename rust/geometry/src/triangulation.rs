// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation
//!
//! Thin wrapper around earcutr, with fast paths for triangles and quads
//! so cap generation for simple slabs never allocates the ear-clipping
//! machinery.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};

/// Triangulate a simple polygon (no holes), returning indices into `points`
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::TriangulationError(format!(
            "polygon has {n} points, need at least 3"
        )));
    }
    if n == 3 {
        return Ok(vec![0, 1, 2]);
    }
    // Fan triangulation is only valid for convex quads; concave ones go
    // through earcut like any other polygon
    if n == 4 && is_convex(points) {
        return Ok(vec![0, 1, 2, 0, 2, 3]);
    }

    let mut vertices = Vec::with_capacity(n * 2);
    for p in points {
        vertices.push(p.x);
        vertices.push(p.y);
    }
    earcutr::earcut(&vertices, &[], 2).map_err(|e| Error::TriangulationError(format!("{e:?}")))
}

/// Triangulate a polygon with holes.
///
/// Indices refer to the concatenated vertex list: outer loop first, then
/// each hole in order. Holes with fewer than 3 points are ignored.
pub fn triangulate_with_holes(
    outer: &[Point2<f64>],
    holes: &[Vec<Point2<f64>>],
) -> Result<Vec<usize>> {
    if outer.len() < 3 {
        return Err(Error::TriangulationError(
            "outer boundary needs at least 3 points".to_string(),
        ));
    }

    let valid_holes: Vec<&Vec<Point2<f64>>> = holes.iter().filter(|h| h.len() >= 3).collect();
    if valid_holes.is_empty() {
        return triangulate_polygon(outer);
    }

    let total: usize = outer.len() + valid_holes.iter().map(|h| h.len()).sum::<usize>();
    let mut vertices = Vec::with_capacity(total * 2);
    for p in outer {
        vertices.push(p.x);
        vertices.push(p.y);
    }
    let mut hole_indices = Vec::with_capacity(valid_holes.len());
    for hole in valid_holes {
        hole_indices.push(vertices.len() / 2);
        for p in hole {
            vertices.push(p.x);
            vertices.push(p.y);
        }
    }

    earcutr::earcut(&vertices, &hole_indices, 2)
        .map_err(|e| Error::TriangulationError(format!("{e:?}")))
}

/// Project coplanar 3D points onto the plane defined by `normal`.
///
/// Returns the 2D points and the basis used (u axis, v axis, origin) so a
/// second point set can be projected into the same space.
pub fn project_to_plane(
    points: &[Point3<f64>],
    normal: &Vector3<f64>,
) -> (Vec<Point2<f64>>, Vector3<f64>, Vector3<f64>, Point3<f64>) {
    let Some(origin) = points.first().copied() else {
        return (Vec::new(), Vector3::zeros(), Vector3::zeros(), Point3::origin());
    };

    // Pick the world axis least parallel to the normal for a stable basis
    let reference = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let u_axis = normal.cross(&reference).normalize();
    let v_axis = normal.cross(&u_axis).normalize();

    let projected = points
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(&u_axis), d.dot(&v_axis))
        })
        .collect();
    (projected, u_axis, v_axis, origin)
}

/// Whether all turns of the polygon share one sign (collinear runs allowed)
fn is_convex(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    let mut sign = 0.0f64;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let c = &points[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross.abs() < 1e-12 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

/// Polygon normal via Newell's method; degenerate polygons fall back to +Z
pub fn polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    if n < 3 {
        return Vector3::z();
    }

    let mut normal = Vector3::<f64>::zeros();
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal.try_normalize(1e-10).unwrap_or_else(Vector3::z)
}
