// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slab regions: boundary path plus derived extruded shell
//!
//! A `SlabRegion` owns its boundary exclusively. Derived 3D geometry is
//! computed lazily by [`SlabRegion::extrude_body`] and invalidated by any
//! boundary edit, so a freshly edited (or cloned) region re-extrudes on
//! the next request instead of serving stale faces.

use crate::bool2d::{bounds_overlap, signed_area, ClipEngine, ClipMode, ClipShape};
use crate::curve::{points_nearly_equal, TOLERANCE};
use crate::error::Result;
use crate::extrusion::{extrude_path, footprint_area, ShellWrapper, SlabTopoFace};
use crate::path::CoEdgePath;
use nalgebra::{Matrix3, Point2, Vector2};
use planlite_kernel::Layer;

/// Functional classification of a slab region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlabRegionType {
    #[default]
    Full,
    Main,
    Balcony,
    Bathroom,
    Kitchen,
    Corridor,
    Custom,
}

/// A slab region: one boundary-with-holes on a layer, optionally linked
/// to surrounding walls.
#[derive(Debug, PartialEq)]
pub struct SlabRegion {
    pub id: u32,
    pub region_type: SlabRegionType,
    pub co_edge_path: CoEdgePath,
    pub layer: Layer,
    pub link_wall_ids: Vec<u32>,
    shell_wrapper: Option<ShellWrapper>,
}

impl SlabRegion {
    pub fn create(
        id: u32,
        co_edge_path: CoEdgePath,
        layer: Layer,
        link_wall_ids: Vec<u32>,
    ) -> Self {
        Self {
            id,
            region_type: SlabRegionType::default(),
            co_edge_path,
            layer,
            link_wall_ids,
            shell_wrapper: None,
        }
    }

    pub fn with_type(mut self, region_type: SlabRegionType) -> Self {
        self.region_type = region_type;
        self
    }

    /// Extrude the boundary into the shell, reusing the cached result
    /// while the boundary and layer are unchanged.
    pub fn extrude_body(&mut self) -> Result<&ShellWrapper> {
        if self.shell_wrapper.is_none() {
            let shell = extrude_path(&self.co_edge_path, self.layer.slab_thickness)?;
            self.shell_wrapper = Some(shell);
        }
        Ok(self.shell_wrapper.as_ref().unwrap())
    }

    /// The cached shell, if [`extrude_body`](Self::extrude_body) has run
    /// since the last boundary edit
    pub fn shell_wrapper(&self) -> Option<&ShellWrapper> {
        self.shell_wrapper.as_ref()
    }

    /// All side faces of the cached shell, outer loop's faces first
    pub fn topo_faces(&self) -> Vec<&SlabTopoFace> {
        self.shell_wrapper
            .iter()
            .flat_map(|shell| shell.side_faces.iter().flatten())
            .collect()
    }

    /// Move the boundary in place. Derived geometry is dropped.
    pub fn translate(&mut self, offset: &Vector2<f64>) {
        self.co_edge_path.translate(offset);
        self.shell_wrapper = None;
    }

    /// Mirror the boundary across a line through `origin` along `axis`.
    /// Loop winding is restored by the underlying reflection handling, and
    /// derived geometry is dropped.
    pub fn mirror(&mut self, origin: &Point2<f64>, axis: &Vector2<f64>) {
        let d = axis.normalize();
        // Householder reflection about the axis direction
        let (dx, dy) = (d.x, d.y);
        let linear = Matrix3::new(
            2.0 * dx * dx - 1.0,
            2.0 * dx * dy,
            0.0,
            2.0 * dx * dy,
            2.0 * dy * dy - 1.0,
            0.0,
            0.0,
            0.0,
            1.0,
        );
        let to_origin = Matrix3::new_translation(&Vector2::new(-origin.x, -origin.y));
        let back = Matrix3::new_translation(&Vector2::new(origin.x, origin.y));
        self.co_edge_path.transform(&(back * linear * to_origin));
        self.shell_wrapper = None;
    }

    /// Apply an arbitrary planar transform to the boundary
    pub fn transform(&mut self, m: &Matrix3<f64>) {
        self.co_edge_path.transform(m);
        self.shell_wrapper = None;
    }

    /// Enclosed area of the region (outer minus holes)
    pub fn area(&self) -> f64 {
        footprint_area(&self.co_edge_path)
    }

    /// Length of the outer boundary
    pub fn perimeter(&self) -> f64 {
        self.co_edge_path
            .outer
            .iter()
            .map(|coedge| coedge.curve.length())
            .sum()
    }

    pub fn contains_point(&self, p: &Point2<f64>) -> bool {
        self.co_edge_path.contains_point(p)
    }

    /// Axis-aligned bounds of the outer loop
    pub fn bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let polys = self.co_edge_path.discrete_loops();
        crate::bool2d::contour_bounds(polys.first()?)
    }

    /// Center of the outer loop's bounds
    pub fn center(&self) -> Option<Point2<f64>> {
        let (min, max) = self.bounds()?;
        Some(Point2::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5))
    }

    pub fn width(&self) -> f64 {
        self.bounds().map_or(0.0, |(min, max)| max.x - min.x)
    }

    pub fn height(&self) -> f64 {
        self.bounds().map_or(0.0, |(min, max)| max.y - min.y)
    }

    /// Whether the enclosed areas of two regions overlap. Abutting regions
    /// sharing only a boundary edge do not count as overlapping.
    pub fn overlaps(&self, other: &SlabRegion) -> bool {
        let (Some(a), Some(b)) = (self.bounds(), other.bounds()) else {
            return false;
        };
        if !bounds_overlap(&a.0, &a.1, &b.0, &b.1) {
            return false;
        }
        !ClipEngine::new()
            .clip(
                &discrete_shapes(&self.co_edge_path),
                &discrete_shapes(&other.co_edge_path),
                ClipMode::Intersection,
            )
            .is_empty()
    }

    /// Drop boundary points that are collinear with their neighbors or
    /// coincident within tolerance. Only polygonal loops are simplified;
    /// loops carrying arcs are left alone. Returns whether anything changed.
    pub fn simplify(&mut self) -> bool {
        let mut changed = false;
        let outer_changed = simplify_polygonal_loop(&mut self.co_edge_path.outer);
        changed |= outer_changed;
        for hole in &mut self.co_edge_path.holes {
            changed |= simplify_polygonal_loop(hole);
        }
        if changed {
            self.shell_wrapper = None;
        }
        changed
    }
}

impl Clone for SlabRegion {
    /// Deep-copies the boundary; derived geometry is not carried over, the
    /// clone re-extrudes on first use.
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            region_type: self.region_type,
            co_edge_path: self.co_edge_path.clone(),
            layer: self.layer.clone(),
            link_wall_ids: self.link_wall_ids.clone(),
            shell_wrapper: None,
        }
    }
}

fn discrete_shapes(path: &CoEdgePath) -> Vec<ClipShape> {
    let mut polys = path.discrete_loops().into_iter();
    match polys.next() {
        Some(outer) => vec![ClipShape::with_holes(outer, polys.collect())],
        None => Vec::new(),
    }
}

fn simplify_polygonal_loop(lp: &mut Vec<crate::path::CoEdge>) -> bool {
    if lp.len() < 4 || lp.iter().any(|c| matches!(c.curve, crate::curve::Curve2d::Arc(_))) {
        return false;
    }

    let points: Vec<Point2<f64>> = lp.iter().map(|c| c.curve.start()).collect();
    let mut kept: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    let n = points.len();
    for i in 0..n {
        let prev = &points[(i + n - 1) % n];
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        if points_nearly_equal(curr, next, TOLERANCE) {
            continue;
        }
        let cross = (curr.x - prev.x) * (next.y - prev.y) - (curr.y - prev.y) * (next.x - prev.x);
        if cross.abs() <= TOLERANCE {
            continue;
        }
        kept.push(*curr);
    }

    if kept.len() == points.len() || kept.len() < 3 {
        return false;
    }
    // Degenerate result would drop area entirely, keep the original
    if signed_area(&kept).abs() <= TOLERANCE {
        return false;
    }
    *lp = CoEdgePath::from_points(&kept, &[]).outer;
    true
}
