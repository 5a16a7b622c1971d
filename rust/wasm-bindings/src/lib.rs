//! Planlite WebAssembly Bindings
//!
//! JavaScript/TypeScript API for the planlite geometry core built with
//! wasm-bindgen. Paths cross the boundary as flat Float64Array buffers.

use wasm_bindgen::prelude::*;

mod api;
mod paths;
mod utils;

pub use api::PlanliteApi;
pub use paths::{get_memory, NativePaths};
pub use utils::set_panic_hook as init_panic_hook;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    web_sys::console::debug_1(
        &format!("planlite-wasm {} initialized", env!("CARGO_PKG_VERSION")).into(),
    );
}

/// Get the version of planlite
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
