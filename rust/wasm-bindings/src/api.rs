// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript-facing geometry API
//!
//! Clip operations take and return the flat path-buffer wire format; solid
//! operations work on [`SolidMesh`] handles held in WASM memory.

use crate::paths::NativePaths;
use planlite_geometry::bool2d::{ClipEngine, ClipMode, ClipShape};
use planlite_geometry::csg::CsgEngine;
use planlite_geometry::extrusion::extrude_solid;
use planlite_geometry::mesh::Mesh;
use planlite_geometry::native_paths::{buffer_to_contours, contours_to_buffer};
use wasm_bindgen::prelude::*;

/// An extruded or combined solid held in WASM memory.
#[wasm_bindgen]
pub struct SolidMesh {
    mesh: Mesh,
}

#[wasm_bindgen]
impl SolidMesh {
    /// Get positions as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.mesh.positions[..])
    }

    /// Get normals as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.mesh.normals[..])
    }

    /// Get indices as Uint32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.mesh.indices[..])
    }

    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    #[wasm_bindgen(getter, js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// Release the mesh storage
    pub fn delete(self) {}
}

impl From<Mesh> for SolidMesh {
    fn from(mesh: Mesh) -> Self {
        Self { mesh }
    }
}

/// Main geometry API entry point.
#[wasm_bindgen]
pub struct PlanliteApi {
    clip_engine: ClipEngine,
    csg_engine: CsgEngine,
}

#[wasm_bindgen]
impl PlanliteApi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        crate::utils::set_panic_hook();
        Self {
            clip_engine: ClipEngine::new(),
            csg_engine: CsgEngine::new(),
        }
    }

    /// Boolean-clip two encoded path sets.
    ///
    /// `mode` is 0 = union, 1 = difference, 2 = intersection. Input
    /// contours are grouped even-odd; the result buffer lists each output
    /// shape's outer contour (counter-clockwise) followed by its holes
    /// (clockwise). An empty result encodes as `[0]`.
    pub fn clip(&self, subject: &[f64], clip: &[f64], mode: u8) -> Result<NativePaths, JsError> {
        let mode = match mode {
            0 => ClipMode::Union,
            1 => ClipMode::Difference,
            2 => ClipMode::Intersection,
            other => return Err(JsError::new(&format!("unknown clip mode {other}"))),
        };

        let subject = decode_shapes(subject)?;
        let clip = decode_shapes(clip)?;
        let result = self.clip_engine.clip(&subject, &clip, mode);

        let mut contours = Vec::new();
        for shape in result {
            contours.push(shape.outer);
            contours.extend(shape.holes);
        }
        Ok(NativePaths::from(contours_to_buffer(&contours)))
    }

    /// Extrude an encoded path set (first path outer, rest holes) into a
    /// watertight solid.
    pub fn extrude(&self, path: &[f64], thickness: f64) -> Result<SolidMesh, JsError> {
        let contours = buffer_to_contours(path).map_err(|e| JsError::new(&e.to_string()))?;
        let Some((outer, holes)) = contours.split_first() else {
            return Err(JsError::new("path buffer holds no contours"));
        };
        let mesh = extrude_solid(outer, holes, thickness)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(SolidMesh::from(mesh))
    }

    /// Union two solids
    pub fn union(&self, a: &SolidMesh, b: &SolidMesh) -> Result<SolidMesh, JsError> {
        self.csg_engine
            .union(&a.mesh, &b.mesh)
            .map(SolidMesh::from)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Subtract solid `b` from solid `a`
    pub fn subtract(&self, a: &SolidMesh, b: &SolidMesh) -> Result<SolidMesh, JsError> {
        self.csg_engine
            .subtract(&a.mesh, &b.mesh)
            .map(SolidMesh::from)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Intersect two solids
    pub fn intersect(&self, a: &SolidMesh, b: &SolidMesh) -> Result<SolidMesh, JsError> {
        self.csg_engine
            .intersect(&a.mesh, &b.mesh)
            .map(SolidMesh::from)
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl Default for PlanliteApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Each decoded contour becomes its own shape; even-odd filling in the
/// clip engine resolves the nesting.
fn decode_shapes(buffer: &[f64]) -> Result<Vec<ClipShape>, JsError> {
    let contours = buffer_to_contours(buffer).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(contours.into_iter().map(ClipShape::new).collect())
}
