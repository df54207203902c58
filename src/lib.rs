// Reusable library API — visible to both CLI and WASM builds
pub mod assignment;
pub mod consistency;
pub mod domains;
pub mod errors;
pub mod log;
pub mod puzzle;
pub mod render;
pub mod slot;
pub mod solver;
pub mod word_list;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
