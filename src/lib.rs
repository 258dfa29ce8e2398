//! Memoria, a memory journal for the terminal.
//!
//! Write a few lines about the moment you are in. Memoria captures where and
//! when it happened, asks an AI service for the weather, a mood, a colour, a
//! soundtrack, tags, a one-line poem, and an illustration, then keeps the
//! enriched entry in a newest-first timeline.
//!
//! # Architecture
//!
//! - **Storage**: the whole journal is one JSON blob under a fixed key in a
//!   SQLite key/value table
//! - **Location**: captured once per session (IP lookup, fixed coordinates, or
//!   disabled)
//! - **Enrichment**: Gemini `generateContent` for weather and analysis, Imagen
//!   `predict` for the image, each with its own fallback value
//! - **Pipeline**: weather → analysis → image → record, strictly in sequence
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite database initialization and schema
//! - [`geo`]: One-shot geolocation providers
//! - [`enrichment`]: Remote weather, analysis, and image calls with fallbacks
//! - [`memory`]: Records, storage adapter, creation pipeline, and the journal state
//! - [`ui`]: Terminal rendering and the interactive screen loop
//! - [`cli`]: Subcommand entry points

pub mod cli;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod geo;
pub mod memory;
pub mod ui;
