//! # Case Engine
//!
//! The narrative state engine of a detective case book. It consumes the
//! immutable content described by `case_rules`, mutates one `CaseState` per
//! session, and emits render instructions for whatever front-end is attached.
//!
//! ## Core Components
//!
//! - **evaluator**: nested condition trees and the deprecated flat `conditionalText` list
//! - **visit**: the fixed visit sequence (lock check, lead count, clue grant, text, conditions)
//! - **resolver**: declarative action consequences (lock, record choice, sequence, end)
//! - **sequence**: named sub-scenes of a location
//! - **score**: the pure end-of-case score calculator
//! - **session**: `CaseSession`, the public operations and the action surface
//!
//! ## Design Philosophy
//!
//! - **Data-Driven**: new locations and choices need content, not code
//! - **Explicit Outcomes**: every operation proceeds, rejects with a notice, or aborts with a diagnostic
//! - **No Presentation**: the engine only emits `RenderInstruction`s

pub mod evaluator;
pub mod outcome;
pub mod render;
pub mod resolver;
pub mod score;
pub mod screens;
pub mod sequence;
pub mod session;
pub mod visit;

pub use evaluator::*;
pub use outcome::*;
pub use render::*;
pub use score::*;
pub use session::*;
