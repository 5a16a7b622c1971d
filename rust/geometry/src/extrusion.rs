// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slab extrusion: boundary paths to topology faces and solid meshes
//!
//! Extrusion runs along +Z from the face-local plane. Each boundary
//! co-edge produces one ruled side face (a quad for a line segment, a
//! quad strip for an arc), grouped per loop with the outer loop first.
//! The watertight solid adds triangulated top and bottom caps.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::path::CoEdgePath;
use crate::triangulation::{polygon_normal, triangulate_with_holes};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// A planar boundary face of an extruded solid, stored as its outline
/// polygon in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct TopoFace {
    pub outline: Vec<Point3<f64>>,
}

impl TopoFace {
    pub fn new(outline: Vec<Point3<f64>>) -> Self {
        Self { outline }
    }

    pub fn normal(&self) -> Vector3<f64> {
        polygon_normal(&self.outline)
    }
}

/// A side face of a slab, wrapping the topology face produced by one
/// boundary co-edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SlabTopoFace {
    pub face: TopoFace,
}

impl SlabTopoFace {
    /// Ruled face between a boundary polyline at z=0 and its copy at
    /// z=depth. Outline runs along the bottom then back along the top, so
    /// the face normal points away from the region interior for CCW outer
    /// loops.
    pub fn ruled(strip: &[Point2<f64>], depth: f64) -> Option<Self> {
        if strip.len() < 2 {
            return None;
        }
        let mut outline = Vec::with_capacity(strip.len() * 2);
        for p in strip {
            outline.push(Point3::new(p.x, p.y, 0.0));
        }
        for p in strip.iter().rev() {
            outline.push(Point3::new(p.x, p.y, depth));
        }
        Some(Self {
            face: TopoFace::new(outline),
        })
    }
}

/// The extruded shell of a slab region.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellWrapper {
    /// Side faces grouped per boundary loop; the outer loop's group is
    /// at index 0, hole groups follow in hole order
    pub side_faces: Vec<Vec<SlabTopoFace>>,
    /// Watertight solid mesh: caps plus side walls
    pub solid: Mesh,
}

impl ShellWrapper {
    pub fn loop_count(&self) -> usize {
        self.side_faces.len()
    }
}

/// Extrude a boundary path into a shell.
pub fn extrude_path(path: &CoEdgePath, thickness: f64) -> Result<ShellWrapper> {
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(Error::InvalidExtrusion(format!(
            "thickness must be positive, got {thickness}"
        )));
    }

    let mut side_faces = Vec::with_capacity(1 + path.holes.len());
    for lp in path.loops() {
        let mut group = Vec::with_capacity(lp.len());
        for coedge in lp {
            let strip = coedge.curve.discrete_points();
            if let Some(face) = SlabTopoFace::ruled(&strip, thickness) {
                group.push(face);
            }
        }
        side_faces.push(group);
    }

    let polys = path.discrete_loops();
    let (outer, holes) = polys
        .split_first()
        .ok_or_else(|| Error::InvalidExtrusion("path has no outer loop".to_string()))?;
    let solid = extrude_solid(outer, holes, thickness)?;

    Ok(ShellWrapper { side_faces, solid })
}

/// Extrude a polygon with holes into a watertight solid mesh.
pub fn extrude_solid(
    outer: &[Point2<f64>],
    holes: &[Vec<Point2<f64>>],
    depth: f64,
) -> Result<Mesh> {
    if !depth.is_finite() || depth <= 0.0 {
        return Err(Error::InvalidExtrusion(format!(
            "depth must be positive, got {depth}"
        )));
    }

    let indices = triangulate_with_holes(outer, holes)?;
    let cap_points: Vec<Point2<f64>> = outer
        .iter()
        .chain(holes.iter().filter(|h| h.len() >= 3).flatten())
        .copied()
        .collect();

    let side_quads = outer.len() + holes.iter().map(Vec::len).sum::<usize>();
    let mut mesh = Mesh::with_capacity(
        cap_points.len() * 2 + side_quads * 4,
        indices.len() * 2 + side_quads * 6,
    );

    add_cap(&mut mesh, &cap_points, &indices, 0.0, -Vector3::z());
    add_cap(&mut mesh, &cap_points, &indices, depth, Vector3::z());

    add_side_walls(&mut mesh, outer, depth);
    for hole in holes {
        add_side_walls(&mut mesh, hole, depth);
    }

    Ok(mesh)
}

/// Enclosed footprint area of a path's discrete loops
pub fn footprint_area(path: &CoEdgePath) -> f64 {
    use crate::bool2d::signed_area;

    let polys = path.discrete_loops();
    let Some((outer, holes)) = polys.split_first() else {
        return 0.0;
    };
    let hole_area: f64 = holes.iter().map(|h| signed_area(h).abs()).sum();
    signed_area(outer).abs() - hole_area
}

/// Apply a homogeneous transform to every vertex and normal of a mesh
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let p = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let t = transform.transform_point(&p);
        chunk[0] = t.x as f32;
        chunk[1] = t.y as f32;
        chunk[2] = t.z as f32;
    });

    // Normals transform by the inverse transpose
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();
    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let n = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let t = (normal_matrix * n.to_homogeneous()).xyz();
        let t = t.try_normalize(1e-10).unwrap_or(n);
        chunk[0] = t.x as f32;
        chunk[1] = t.y as f32;
        chunk[2] = t.z as f32;
    });
}

fn add_cap(
    mesh: &mut Mesh,
    points: &[Point2<f64>],
    indices: &[usize],
    z: f64,
    normal: Vector3<f64>,
) {
    let base = mesh.vertex_count() as u32;
    for p in points {
        mesh.add_vertex(Point3::new(p.x, p.y, z), normal);
    }
    let downward = normal.z < 0.0;
    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (
            base + tri[0] as u32,
            base + tri[1] as u32,
            base + tri[2] as u32,
        );
        // Bottom cap winding is mirrored so it faces outward
        if downward {
            mesh.add_triangle(i0, i2, i1);
        } else {
            mesh.add_triangle(i0, i1, i2);
        }
    }
}

fn add_side_walls(mesh: &mut Mesh, boundary: &[Point2<f64>], depth: f64) {
    let n = boundary.len();
    for i in 0..n {
        let p0 = &boundary[i];
        let p1 = &boundary[(i + 1) % n];

        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        // Degenerate edges come from duplicate consecutive points
        let Some(normal) = Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) else {
            continue;
        };

        let idx = mesh.vertex_count() as u32;
        mesh.add_vertex(Point3::new(p0.x, p0.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, depth), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, depth), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_hole() -> CoEdgePath {
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let hole = vec![
            Point2::new(3.0, 3.0),
            Point2::new(3.0, 7.0),
            Point2::new(7.0, 7.0),
            Point2::new(7.0, 3.0),
        ];
        CoEdgePath::from_points(&outer, &[hole])
    }

    #[test]
    fn test_side_faces_grouped_per_loop() {
        let shell = extrude_path(&square_with_hole(), 100.0).unwrap();
        assert_eq!(shell.loop_count(), 2);
        assert_eq!(shell.side_faces[0].len(), 4);
        assert_eq!(shell.side_faces[1].len(), 4);
    }

    #[test]
    fn test_side_face_outline_is_a_quad() {
        let shell = extrude_path(&square_with_hole(), 100.0).unwrap();
        let face = &shell.side_faces[0][0];
        assert_eq!(face.face.outline.len(), 4);
        // First edge (0,0)->(10,0) at z 0 and 100
        assert_eq!(face.face.outline[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(face.face.outline[1], Point3::new(10.0, 0.0, 0.0));
        assert_eq!(face.face.outline[2], Point3::new(10.0, 0.0, 100.0));
        assert_eq!(face.face.outline[3], Point3::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn test_outer_side_face_normal_points_outward() {
        let shell = extrude_path(&square_with_hole(), 100.0).unwrap();
        // Bottom edge of the CCW outer square faces -Y
        let normal = shell.side_faces[0][0].face.normal();
        assert!((normal.y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_solid_bounds_span_thickness() {
        let shell = extrude_path(&square_with_hole(), 100.0).unwrap();
        let (min, max) = shell.solid.bounds();
        assert!((min.z - 0.0).abs() < 1e-4);
        assert!((max.z - 100.0).abs() < 1e-4);
        assert!(!shell.solid.is_empty());
    }

    #[test]
    fn test_footprint_area_excludes_holes() {
        assert!((footprint_area(&square_with_hole()) - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_thickness_rejected() {
        assert!(extrude_path(&square_with_hole(), 0.0).is_err());
        assert!(extrude_path(&square_with_hole(), -5.0).is_err());
        assert!(extrude_path(&square_with_hole(), f64::NAN).is_err());
    }

    #[test]
    fn test_extrusion_is_deterministic() {
        let path = square_with_hole();
        let a = extrude_path(&path, 100.0).unwrap();
        let b = extrude_path(&path, 100.0).unwrap();
        assert_eq!(a.loop_count(), b.loop_count());
        for (ga, gb) in a.side_faces.iter().zip(&b.side_faces) {
            assert_eq!(ga.len(), gb.len());
        }
        assert_eq!(a.solid, b.solid);
    }

    #[test]
    fn test_apply_transform_translates_solid() {
        let mut shell = extrude_path(&square_with_hole(), 10.0).unwrap();
        let m = Matrix4::new_translation(&Vector3::new(100.0, 0.0, 0.0));
        apply_transform(&mut shell.solid, &m);
        let (min, max) = shell.solid.bounds();
        assert!((min.x - 100.0).abs() < 1e-3);
        assert!((max.x - 110.0).abs() < 1e-3);
    }
}
