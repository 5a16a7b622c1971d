// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Path buffers across the WASM boundary
//!
//! A [`NativePaths`] handle owns the flat `[pathCount, len, values...]`
//! buffer on the WASM side. JavaScript reads it through a typed-array view
//! into WASM memory and releases it with `delete()` (or lets wasm-bindgen's
//! `free()` reclaim it); the handle owns the storage, so there is no
//! separate should-free flag to coordinate.

use planlite_geometry::native_paths::{buffer_to_paths, paths_to_buffer, NativePathBuffer};
use wasm_bindgen::prelude::*;

/// An encoded path buffer held in WASM memory.
#[wasm_bindgen]
pub struct NativePaths {
    buffer: NativePathBuffer,
}

#[wasm_bindgen]
impl NativePaths {
    /// Decode and re-encode a flat buffer, validating the wire format.
    /// Throws on truncated or padded input.
    #[wasm_bindgen(constructor)]
    pub fn new(data: &[f64]) -> Result<NativePaths, JsError> {
        let paths = buffer_to_paths(data).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self {
            buffer: paths_to_buffer(&paths),
        })
    }

    /// Pointer to the buffer. JavaScript views it as
    /// `new Float64Array(memory.buffer, ptr, length)`.
    #[wasm_bindgen(getter)]
    pub fn ptr(&self) -> *const f64 {
        self.buffer.as_slice().as_ptr()
    }

    /// Length of the buffer in f64 elements, not bytes
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.buffer.len()
    }

    /// Number of encoded paths
    #[wasm_bindgen(getter, js_name = pathCount)]
    pub fn path_count(&self) -> usize {
        self.buffer.as_slice().first().map_or(0, |&n| n as usize)
    }

    /// Copy the buffer out as a Float64Array
    #[wasm_bindgen(js_name = toArray)]
    pub fn to_array(&self) -> js_sys::Float64Array {
        js_sys::Float64Array::from(self.buffer.as_slice())
    }

    /// Release the buffer. Kept for callers that manage lifetimes
    /// explicitly; dropping the handle has the same effect.
    pub fn delete(self) {}
}

impl From<NativePathBuffer> for NativePaths {
    fn from(buffer: NativePathBuffer) -> Self {
        Self { buffer }
    }
}

/// Get WASM memory to allow JavaScript to create TypedArray views
#[wasm_bindgen]
pub fn get_memory() -> JsValue {
    wasm_bindgen::memory()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_handle() {
        let data = [2.0, 4.0, 0.0, 0.0, 1.0, 1.0, 2.0, 5.0, 5.0];
        let handle = NativePaths::new(&data).unwrap();
        assert_eq!(handle.length(), data.len());
        assert_eq!(handle.path_count(), 2);
        assert_eq!(handle.buffer.as_slice(), &data);
    }

    #[test]
    fn test_truncated_buffer_rejected() {
        assert!(NativePaths::new(&[1.0, 4.0, 1.0]).is_err());
    }

    #[test]
    fn test_empty_path_set() {
        let handle = NativePaths::new(&[0.0]).unwrap();
        assert_eq!(handle.length(), 1);
        assert_eq!(handle.path_count(), 0);
    }
}
