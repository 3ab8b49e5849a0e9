//! WebAssembly bindings for the nibble4 emulator.
//!
//! This module provides JavaScript-callable interfaces to the CPU emulator
//! and assembler, enabling browser-based front ends.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Machine;
