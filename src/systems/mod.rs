//! Runtime systems.
//!
//! Submodules overview
//! - [`scriptsequence`] – run pending actions of each sprite's script sequence

pub mod scriptsequence;
