// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawing-data assembly for painted faces
//!
//! Turns a face's boundary, soft openings, material, and transform chain
//! into a renderer-consumable payload. Collaborators (clip engine, face
//! groups, floor-link resolution, material decoration) are injected
//! through [`DwgContext`] so the pipeline has no hidden globals.
//!
//! Absence is not failure here: a face without material, or one whose
//! boundary is fully clipped away, yields `None` and the renderer simply
//! draws nothing.

use crate::bool2d::{ClipEngine, ClipMode, ClipShape};
use nalgebra::{Matrix3, Matrix4, Point2};
use planlite_kernel::{
    EntityKind, FaceGroupRegistry, Material, Mixpaint, PointLoop, SurfaceEntity,
};

/// Renderer payload assembled by a decorator.
///
/// The geometry core does not interpret `regions` beyond carrying them;
/// their meaning (tile courses, paint fields) belongs to the decorator
/// that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationData {
    /// Material catalog id the renderer resolves textures with
    pub seek_id: String,
    /// Paving pattern id for mixpaint output, `None` for uniform paint
    pub pattern_id: Option<String>,
    /// Decorated regions, in the space the decorator worked in
    pub regions: Vec<ClipShape>,
}

/// Drawing data for one face: the decoration payload plus the transform
/// placing it in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct PaveDwgData {
    pub pave_dwg_data: DecorationData,
    pub world_transform: Matrix4<f64>,
}

/// Material decoration strategy.
///
/// Returning `None` means the material produced nothing to draw for the
/// given regions, which the pipeline passes through as "no drawing data".
pub trait PaveDecorator {
    /// Decorate a uniform material over face-local shapes
    fn decorate(&self, material: &Material, shapes: &[ClipShape]) -> Option<DecorationData>;

    /// Decorate a mixpaint composite. `shapes` and `merge_shapes` are in
    /// face-group space; the caller restores the frame afterwards.
    fn decorate_mixpaint(
        &self,
        material: &Material,
        mixpaint: &Mixpaint,
        shapes: &[ClipShape],
        merge_shapes: &[ClipShape],
    ) -> Option<DecorationData>;
}

/// Default decorator: forwards clipped regions with the material ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixPaveDwgDecorator;

impl PaveDecorator for MixPaveDwgDecorator {
    fn decorate(&self, material: &Material, shapes: &[ClipShape]) -> Option<DecorationData> {
        if shapes.is_empty() {
            return None;
        }
        Some(DecorationData {
            seek_id: material.seek_id.clone(),
            pattern_id: None,
            regions: shapes.to_vec(),
        })
    }

    fn decorate_mixpaint(
        &self,
        material: &Material,
        mixpaint: &Mixpaint,
        shapes: &[ClipShape],
        merge_shapes: &[ClipShape],
    ) -> Option<DecorationData> {
        if shapes.is_empty() {
            return None;
        }
        let mut regions = shapes.to_vec();
        regions.extend_from_slice(merge_shapes);
        Some(DecorationData {
            seek_id: material.seek_id.clone(),
            pattern_id: Some(mixpaint.mix_pave.pattern_id.clone()),
            regions,
        })
    }
}

/// Resolves adjacent floor outlines that merge into one drawing region.
pub trait FloorLinkResolver {
    fn merge_outlines(&self, entity: &SurfaceEntity) -> Vec<ClipShape>;
}

/// Resolver for hosts without floor linking
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFloorLinks;

impl FloorLinkResolver for NoFloorLinks {
    fn merge_outlines(&self, _entity: &SurfaceEntity) -> Vec<ClipShape> {
        Vec::new()
    }
}

/// Injected collaborators for drawing-data assembly.
pub struct DwgContext<'a> {
    pub clip_engine: &'a ClipEngine,
    pub face_groups: &'a FaceGroupRegistry,
    pub floor_links: &'a dyn FloorLinkResolver,
    pub decorator: &'a dyn PaveDecorator,
}

impl<'a> DwgContext<'a> {
    /// The outline to draw for an entity, in its own 2D frame.
    ///
    /// Base-path selection runs first (floors prefer their background
    /// outline, reflected ceiling plans their RCP background), then a
    /// non-identity face-group transform is applied. The order matters:
    /// the group transform is defined over the selected space, so
    /// transforming before selection would move floor backgrounds through
    /// the wrong frame.
    pub fn get_pave_outline(
        &self,
        entity: &SurfaceEntity,
        use_rcp_background: bool,
    ) -> Vec<PointLoop> {
        let face = &entity.face;
        let base: &Vec<PointLoop> = if entity.kind == EntityKind::Floor {
            face.background_path_2d.as_ref().unwrap_or(&face.real_path_2d)
        } else if use_rcp_background {
            face.rcp_background_path_2d
                .as_ref()
                .unwrap_or(&face.real_path_2d)
        } else {
            &face.real_path_2d
        };

        let mut outline = base.clone();
        if let Some(group) = self.face_groups.face_group_transform(entity.id) {
            for lp in &mut outline {
                for p in lp.iter_mut() {
                    *p = transform_point(group, p);
                }
            }
        }
        outline
    }

    /// Assemble drawing data for one face.
    pub fn get_dwg_data(&self, entity: &SurfaceEntity) -> Option<PaveDwgData> {
        let face = &entity.face;
        let material = face.material.as_ref()?;

        let merge_shapes = self.floor_links.merge_outlines(entity);

        let subject = loops_to_shapes(&face.real_path_2d);
        let shapes = if face.has_soft_holes() {
            let cutters: Vec<ClipShape> = face
                .soft_holes_path_2d
                .iter()
                .filter(|l| l.len() >= 3)
                .map(|l| ClipShape::new(l.clone()))
                .collect();
            self.clip_engine
                .clip(&subject, &cutters, ClipMode::Difference)
        } else {
            subject
        };
        if shapes.is_empty() {
            return None;
        }

        let mut world_transform = entity.local_to_world;

        let pave_dwg_data = if let Some(mixpaint) = &material.mixpaint {
            // Mixpaint decoration works in face-group space: shapes go in
            // pre-transformed, and the group transform is peeled back off
            // the world transform so the result still lands in the
            // parent's frame.
            let group = self.face_groups.face_group_transform(entity.id);
            let (shapes, merge_shapes) = match group {
                Some(g) => (
                    transform_shapes(&shapes, g),
                    transform_shapes(&merge_shapes, g),
                ),
                None => (shapes, merge_shapes),
            };
            let data =
                self.decorator
                    .decorate_mixpaint(material, mixpaint, &shapes, &merge_shapes)?;
            if let Some(g) = group {
                if let Some(inverse) = lift_to_3d(g).try_inverse() {
                    world_transform *= inverse;
                }
            }
            data
        } else {
            self.decorator.decorate(material, &shapes)?
        };

        if let Some(master) = entity.independent_master_transform() {
            world_transform = master * world_transform;
        }

        Some(PaveDwgData {
            pave_dwg_data,
            world_transform,
        })
    }
}

/// Group point loops into clip shapes: first loop outer, rest holes
pub fn loops_to_shapes(loops: &[PointLoop]) -> Vec<ClipShape> {
    match loops.split_first() {
        Some((outer, holes)) if outer.len() >= 3 => vec![ClipShape::with_holes(
            outer.clone(),
            holes.iter().filter(|h| h.len() >= 3).cloned().collect(),
        )],
        _ => Vec::new(),
    }
}

/// Lift a planar homogeneous transform into 3D, acting on the XY plane
pub fn lift_to_3d(m: &Matrix3<f64>) -> Matrix4<f64> {
    let mut out = Matrix4::identity();
    out[(0, 0)] = m[(0, 0)];
    out[(0, 1)] = m[(0, 1)];
    out[(0, 3)] = m[(0, 2)];
    out[(1, 0)] = m[(1, 0)];
    out[(1, 1)] = m[(1, 1)];
    out[(1, 3)] = m[(1, 2)];
    out
}

fn transform_point(m: &Matrix3<f64>, p: &Point2<f64>) -> Point2<f64> {
    let v = m * nalgebra::Vector3::new(p.x, p.y, 1.0);
    Point2::new(v.x, v.y)
}

fn transform_shapes(shapes: &[ClipShape], m: &Matrix3<f64>) -> Vec<ClipShape> {
    shapes
        .iter()
        .map(|s| ClipShape {
            outer: s.outer.iter().map(|p| transform_point(m, p)).collect(),
            holes: s
                .holes
                .iter()
                .map(|h| h.iter().map(|p| transform_point(m, p)).collect())
                .collect(),
        })
        .collect()
}
