//! Common utilities for the clamp workspace.
//!
//! This crate provides shared infrastructure used by all clamp components:
//! - **Warning System** - deduplicated warnings for unsupported input

pub mod warning;
