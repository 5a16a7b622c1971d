// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face-group transform registry
//!
//! Faces painted as one mixpaint composite share a decoration origin that is
//! distinct from each face's local frame. The registry maps entity ids to
//! the 2D transform taking face-local outline coordinates into group space.

use crate::entity::EntityId;
use nalgebra::Matrix3;
use rustc_hash::FxHashMap;

/// Entity-id indexed map of face-group transforms.
#[derive(Debug, Clone, Default)]
pub struct FaceGroupRegistry {
    transforms: FxHashMap<EntityId, Matrix3<f64>>,
}

impl FaceGroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the group transform for an entity. Identity registrations
    /// are dropped so lookups stay `None` for untransformed members.
    pub fn register(&mut self, entity: EntityId, transform: Matrix3<f64>) {
        if transform == Matrix3::identity() {
            self.transforms.remove(&entity);
        } else {
            self.transforms.insert(entity, transform);
        }
    }

    /// Remove an entity from its group
    pub fn unregister(&mut self, entity: EntityId) {
        self.transforms.remove(&entity);
    }

    /// The non-identity group transform for an entity, if it has one.
    pub fn face_group_transform(&self, entity: EntityId) -> Option<&Matrix3<f64>> {
        self.transforms.get(&entity)
    }

    /// Number of grouped entities
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}
