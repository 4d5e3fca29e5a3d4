//! Common utilities for the weft parser crates.
//!
//! This crate provides shared infrastructure used by the parser components:
//! - **Warning System** - deduplicated diagnostics routed through the `log` facade

pub mod warning;
