// LogTail - core/mod.rs
//
// Core types and line classification.
// Dependencies: standard library, regex, serde.
// Must NOT depend on: app, platform, or any I/O.

pub mod model;
pub mod patterns;
