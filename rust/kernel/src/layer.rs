// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building layer data consumed by slab extrusion

/// A building layer. The geometry core only reads the slab thickness;
/// everything else about a layer stays in the modeling kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Slab thickness in model units, used as the extrusion depth
    pub slab_thickness: f64,
}

impl Layer {
    /// Create a layer with the given slab thickness
    pub fn new(slab_thickness: f64) -> Self {
        Self { slab_thickness }
    }
}

impl Default for Layer {
    fn default() -> Self {
        // Common residential slab thickness in millimeters
        Self {
            slab_thickness: 100.0,
        }
    }
}
