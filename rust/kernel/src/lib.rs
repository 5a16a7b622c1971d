// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planlite Kernel Boundary
//!
//! Value types describing what the modeling kernel hands to the geometry
//! core: layers, faces with their 2D path loops, materials (including
//! mixpaint composites), face-group transforms and master frames. The
//! geometry core consumes these contracts; it never reaches back into the
//! kernel.

pub mod entity;
pub mod face;
pub mod facegroup;
pub mod layer;
pub mod material;

pub use entity::{EntityId, EntityKind, SurfaceEntity, SurfaceObject};
pub use face::{Face, PointLoop};
pub use facegroup::FaceGroupRegistry;
pub use layer::Layer;
pub use material::{Material, MixPave, Mixpaint};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector2, Vector3};
