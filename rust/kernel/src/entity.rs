// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface entities and master frames

use crate::face::Face;
use nalgebra::Matrix4;

/// Kernel entity identifier
pub type EntityId = u32;

/// Kind of the entity that owns a paintable surface.
///
/// Drawing-outline selection dispatches on this: floors use their merged
/// background outline, everything else uses the raw face path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Floor,
    Ceiling,
    Wall,
    CustomizedStructure,
}

/// The master object a surface hangs off (a customized structure, a swept
/// body, ...). Independent-mode masters carry their own coordinate frame
/// that face transforms do not account for.
#[derive(Debug, Clone)]
pub struct SurfaceObject {
    /// Local-to-world transform of the master
    pub local_to_world: Matrix4<f64>,
    /// Whether the master runs in independent coordinate mode
    pub independent: bool,
}

impl SurfaceObject {
    pub fn new(local_to_world: Matrix4<f64>, independent: bool) -> Self {
        Self {
            local_to_world,
            independent,
        }
    }
}

/// A paintable surface together with its owning-entity context.
#[derive(Debug, Clone)]
pub struct SurfaceEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub face: Face,
    /// Face-local to world transform supplied by the kernel
    pub local_to_world: Matrix4<f64>,
    /// Master object, when the surface belongs to a customized structure
    pub master: Option<SurfaceObject>,
}

impl SurfaceEntity {
    pub fn new(id: EntityId, kind: EntityKind, face: Face) -> Self {
        Self {
            id,
            kind,
            face,
            local_to_world: Matrix4::identity(),
            master: None,
        }
    }

    /// Master local-to-world, but only when the master is independent
    pub fn independent_master_transform(&self) -> Option<&Matrix4<f64>> {
        self.master
            .as_ref()
            .filter(|m| m.independent)
            .map(|m| &m.local_to_world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_independent_master_transform() {
        let face = Face::default();
        let mut entity = SurfaceEntity::new(7, EntityKind::Wall, face);
        assert!(entity.independent_master_transform().is_none());

        let m = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        entity.master = Some(SurfaceObject::new(m, false));
        assert!(entity.independent_master_transform().is_none());

        entity.master = Some(SurfaceObject::new(m, true));
        assert_eq!(entity.independent_master_transform(), Some(&m));
    }
}
