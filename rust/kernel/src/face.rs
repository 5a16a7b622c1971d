// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face data in face-local 2D space

use crate::material::Material;
use nalgebra::Point2;

/// A closed point loop in face-local 2D coordinates
pub type PointLoop = Vec<Point2<f64>>;

/// A paintable face as the modeling kernel describes it.
///
/// All loops are in the face's own local 2D frame. `real_path_2d` is the
/// face boundary actually painted; `soft_holes_path_2d` are openings cut by
/// soft furnishing (rugs, inset fixtures) that must be clipped out before
/// decoration. Floor faces may additionally carry a background outline that
/// already accounts for wall openings, and an RCP-specific background used
/// by reflected ceiling plans.
#[derive(Debug, Clone, Default)]
pub struct Face {
    /// Painted boundary loops (first loop outer, rest holes)
    pub real_path_2d: Vec<PointLoop>,
    /// Soft-opening loops to subtract before decoration
    pub soft_holes_path_2d: Vec<PointLoop>,
    /// Floor background outline with wall openings merged in
    pub background_path_2d: Option<Vec<PointLoop>>,
    /// Background outline specific to reflected ceiling plans
    pub rcp_background_path_2d: Option<Vec<PointLoop>>,
    /// Material assigned by the catalog; `None` means nothing to draw
    pub material: Option<Material>,
}

impl Face {
    /// Create a face from its painted boundary loops
    pub fn new(real_path_2d: Vec<PointLoop>) -> Self {
        Self {
            real_path_2d,
            ..Default::default()
        }
    }

    /// Whether any soft opening is present
    pub fn has_soft_holes(&self) -> bool {
        self.soft_holes_path_2d.iter().any(|l| l.len() >= 3)
    }
}
