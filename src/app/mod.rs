// LogTail - app/mod.rs
//
// Application layer: the tail operation, logger sessions, and the session
// lock table.
// Dependencies: core layer, platform::fs.

pub mod overview;
pub mod registry;
pub mod session;
pub mod tail;
