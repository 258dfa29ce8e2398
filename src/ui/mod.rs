//! Terminal presentation: pure renderers plus the interactive screen loop.

pub mod app;
pub mod render;
