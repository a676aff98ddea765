//! Row models and their conversions to the wire types in `taskboard_core`.
//!
//! Each submodule contains a `FromRow` struct matching the selected columns
//! and the mapping into the canonical entity shape.

pub mod project;
pub mod task;
pub mod user;
