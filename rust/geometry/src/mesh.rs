// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle mesh for extruded slab solids

use nalgebra::{Point3, Vector3};

/// Indexed triangle mesh.
///
/// Positions and normals are f32 triples for compact transfer to the
/// renderer; boolean math converts through f64 at the solid layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Append a standalone triangle with its face normal
    pub fn push_face_triangle(&mut self, v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) {
        let normal = (v1 - v0).cross(&(v2 - v0));
        let normal = normal
            .try_normalize(1e-10)
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, 1.0));
        let base = self.vertex_count() as u32;
        self.add_vertex(v0, normal);
        self.add_vertex(v1, normal);
        self.add_vertex(v2, normal);
        self.add_triangle(base, base + 1, base + 2);
    }

    /// Append another mesh, offsetting its indices
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }
        let vertex_offset = (self.positions.len() / 3) as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex position in f64, by vertex index
    #[inline]
    pub fn position(&self, index: usize) -> Point3<f64> {
        Point3::new(
            self.positions[index * 3] as f64,
            self.positions[index * 3 + 1] as f64,
            self.positions[index * 3 + 2] as f64,
        )
    }

    /// Iterate triangles as f64 vertex triples
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.position(tri[0] as usize),
                self.position(tri[1] as usize),
                self.position(tri[2] as usize),
            ]
        })
    }

    /// Flip orientation: reverse every triangle's winding and negate normals
    pub fn invert(&mut self) {
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
        for n in &mut self.normals {
            *n = -*n;
        }
    }

    /// Axis-aligned bounds (min, max)
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }
        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        for chunk in self.positions.chunks_exact(3) {
            min.x = min.x.min(chunk[0]);
            min.y = min.y.min(chunk[1]);
            min.z = min.z.min(chunk[2]);
            max.x = max.x.max(chunk[0]);
            max.y = max.y.max(chunk[1]);
            max.z = max.z.max(chunk[2]);
        }
        (min, max)
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = Mesh::new();
        a.push_face_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let mut b = Mesh::new();
        b.push_face_triangle(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        a.merge(&b);
        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(&a.indices[3..], &[3, 4, 5]);
    }

    #[test]
    fn test_invert_flips_winding_and_normals() {
        let mut mesh = Mesh::new();
        mesh.push_face_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(mesh.normals[2] > 0.0); // +Z before inversion
        mesh.invert();
        assert_eq!(&mesh.indices, &[0, 2, 1]);
        assert!(mesh.normals[2] < 0.0);
    }

    #[test]
    fn test_triangles_iterator() {
        let mut mesh = Mesh::new();
        mesh.push_face_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        );
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0][1], Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_bounds() {
        let mut mesh = Mesh::new();
        mesh.push_face_triangle(
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 5.0),
            Point3::new(0.0, 2.0, 0.0),
        );
        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(3.0, 2.0, 5.0));
    }
}
