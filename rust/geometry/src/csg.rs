// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 3D boolean operations on triangle meshes
//!
//! Pure functions over immutable mesh values: each call converts to the
//! csgrs polygon-soup representation, runs the boolean, and converts back.
//! No solid state persists across calls. Degenerate input (zero-area
//! triangles) is skipped during conversion; non-manifold input is the
//! caller's responsibility.

use crate::error::Result;
use crate::mesh::Mesh;
use crate::triangulation::{polygon_normal, project_to_plane, triangulate_polygon};
use csgrs::traits::CSG;
use nalgebra::{Point3, Vector3};

/// The csgrs BSP-backed solid used as the boolean working representation.
/// Convert with [`to_csg`]/[`from_csg`] to hold pre-converted operands
/// across several boolean calls.
pub type CsgMesh = csgrs::mesh::Mesh<()>;

/// Mesh boolean engine.
///
/// Stateless; injected where solids are combined so tests can substitute
/// their own instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsgEngine;

impl CsgEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn union(&self, a: &Mesh, b: &Mesh) -> Result<Mesh> {
        if a.is_empty() {
            return Ok(b.clone());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }
        let result = to_csg(a)?.union(&to_csg(b)?);
        from_csg(&result)
    }

    pub fn subtract(&self, a: &Mesh, b: &Mesh) -> Result<Mesh> {
        if a.is_empty() || b.is_empty() {
            return Ok(a.clone());
        }
        let result = to_csg(a)?.difference(&to_csg(b)?);
        from_csg(&result)
    }

    pub fn intersect(&self, a: &Mesh, b: &Mesh) -> Result<Mesh> {
        if a.is_empty() || b.is_empty() {
            return Ok(Mesh::new());
        }
        let result = to_csg(a)?.intersection(&to_csg(b)?);
        from_csg(&result)
    }

    /// Orientation flip: reversed winding and negated normals
    pub fn inverse(&self, mesh: &Mesh) -> Mesh {
        let mut flipped = mesh.clone();
        flipped.invert();
        flipped
    }

    /// Subtract each cutter from `base` in order. The fold is
    /// order-dependent: the result of step i feeds step i+1.
    pub fn subtract_meshes(&self, base: &Mesh, cutters: &[Mesh]) -> Result<Mesh> {
        let operands = cutters
            .iter()
            .filter(|c| !c.is_empty())
            .map(to_csg)
            .collect::<Result<Vec<_>>>()?;
        self.subtract_by_csgs(base, &operands)
    }

    /// Subtract pre-converted operands from `base` in order. The base is
    /// converted once and the whole fold runs in the BSP representation,
    /// so repeated cutters (wall openings against many slabs) can be
    /// converted up front and reused.
    pub fn subtract_by_csgs(&self, base: &Mesh, operands: &[CsgMesh]) -> Result<Mesh> {
        if base.is_empty() || operands.is_empty() {
            return Ok(base.clone());
        }
        let mut solid = to_csg(base)?;
        for operand in operands {
            solid = solid.difference(operand);
        }
        from_csg(&solid)
    }

    /// Union each addition into `base` in order
    pub fn union_meshes(&self, base: &Mesh, additions: &[Mesh]) -> Result<Mesh> {
        let mut result = base.clone();
        for addition in additions {
            result = self.union(&result, addition)?;
        }
        Ok(result)
    }
}

/// Convert a triangle mesh into the boolean working representation,
/// skipping degenerate triangles
pub fn to_csg(mesh: &Mesh) -> Result<CsgMesh> {
    use csgrs::mesh::{polygon::Polygon, vertex::Vertex};

    let mut polygons = Vec::with_capacity(mesh.triangle_count());
    for [v0, v1, v2] in mesh.triangles() {
        // Degenerate triangles would propagate NaN normals through the BSP
        let Some(normal) = (v1 - v0).cross(&(v2 - v0)).try_normalize(1e-10) else {
            continue;
        };
        polygons.push(Polygon::new(
            vec![
                Vertex::new(v0, normal),
                Vertex::new(v1, normal),
                Vertex::new(v2, normal),
            ],
            None,
        ));
    }
    Ok(CsgMesh::from_polygons(&polygons, None))
}

/// Convert a boolean result back into an indexed triangle mesh,
/// re-triangulating non-triangle polygons through plane projection
pub fn from_csg(csg: &CsgMesh) -> Result<Mesh> {
    let mut mesh = Mesh::new();

    for polygon in &csg.polygons {
        let vertices = &polygon.vertices;
        if vertices.len() < 3 {
            continue;
        }

        let points: Vec<Point3<f64>> = vertices
            .iter()
            .map(|v| Point3::new(v.pos[0], v.pos[1], v.pos[2]))
            .collect();

        if points.len() == 3 {
            let base = mesh.vertex_count() as u32;
            for v in vertices {
                mesh.add_vertex(v.pos, v.normal);
            }
            mesh.add_triangle(base, base + 1, base + 2);
            continue;
        }

        // Use the polygon's own normal when it is usable so the 2D
        // projection keeps the winding intent
        let raw = Vector3::new(
            vertices[0].normal[0],
            vertices[0].normal[1],
            vertices[0].normal[2],
        );
        let normal = match raw.try_normalize(1e-10) {
            Some(n) if n.iter().all(|c| c.is_finite()) => n,
            _ => polygon_normal(&points),
        };

        let (points_2d, _, _, _) = project_to_plane(&points, &normal);
        let Ok(indices) = triangulate_polygon(&points_2d) else {
            continue;
        };

        let base = mesh.vertex_count();
        for v in vertices {
            mesh.add_vertex(v.pos, v.normal);
        }
        for tri in indices.chunks_exact(3) {
            mesh.add_triangle(
                (base + tri[0]) as u32,
                (base + tri[1]) as u32,
                (base + tri[2]) as u32,
            );
        }
    }

    Ok(mesh)
}
