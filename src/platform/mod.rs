//! Platform abstraction layer
//!
//! Browser implementations of the host capabilities the core is written
//! against:
//! - Frame scheduling (`requestAnimationFrame`)
//! - Drawing (`CanvasRenderingContext2d`)
//! - Storage (LocalStorage)
//!
//! Native builds use the in-crate `ManualScheduler`, `RecordingSurface` and
//! `MemoryStore` instead.

#[cfg(target_arch = "wasm32")]
pub mod web;
