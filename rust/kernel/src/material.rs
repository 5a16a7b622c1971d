// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material and mixpaint descriptors
//!
//! The geometry core treats paint patterns as opaque: it only needs to know
//! whether a material is a mixpaint composite (which changes how the drawing
//! transform chain is assembled) and to pass the descriptor through to the
//! decorator.

/// Opaque paint-pattern descriptor for a mixpaint region.
///
/// Assembled by the catalog, interpreted by the drawing decorator; the
/// geometry core forwards it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct MixPave {
    /// Catalog id of the paving pattern
    pub pattern_id: String,
    /// Raw pattern parameters as the catalog serialized them
    pub params: Vec<f64>,
}

impl MixPave {
    pub fn new(pattern_id: impl Into<String>, params: Vec<f64>) -> Self {
        Self {
            pattern_id: pattern_id.into(),
            params,
        }
    }
}

/// Mixpaint: a composite decoration spanning a face group.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixpaint {
    pub mix_pave: MixPave,
}

/// Surface material as handed over by the material catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Catalog id, also used by renderers to resolve textures
    pub seek_id: String,
    /// Present when this material is a multi-region painted composite
    pub mixpaint: Option<Mixpaint>,
}

impl Material {
    /// Create a uniform (non-mixpaint) material
    pub fn uniform(seek_id: impl Into<String>) -> Self {
        Self {
            seek_id: seek_id.into(),
            mixpaint: None,
        }
    }

    /// Create a mixpaint material from a pave descriptor
    pub fn mixpaint(seek_id: impl Into<String>, mix_pave: MixPave) -> Self {
        Self {
            seek_id: seek_id.into(),
            mixpaint: Some(Mixpaint { mix_pave }),
        }
    }

    /// Whether this material decorates through the mixpaint pipeline
    pub fn is_mixpaint(&self) -> bool {
        self.mixpaint.is_some()
    }
}
