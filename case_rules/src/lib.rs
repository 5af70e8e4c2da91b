//! # Case Rules
//!
//! The "case book" crate - content definitions, session state, and scoring
//! tables for a detective case. This crate holds data and its invariants; it
//! does not drive the narrative. See `case_engine` for that.

pub mod config;
pub mod content;
pub mod scoring;
pub mod state;

pub use config::*;
pub use content::*;
pub use scoring::*;
pub use state::*;
