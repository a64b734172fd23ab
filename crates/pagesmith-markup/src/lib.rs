//! Markup generation for parsed designs.
//!
//! Renders sections and design tokens into one complete document. Output is
//! a pure function of the input: no randomness, clocks or external state.

pub mod css;
pub mod escape;
pub mod generator;

pub use generator::{generate, GeneratorOptions, MarkupGenerator};
