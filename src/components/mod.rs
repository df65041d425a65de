//! ECS components for sprite entities.
//!
//! Submodules overview:
//! - [`looksize`] – display size of a sprite in percent
//! - [`scriptsequence`] – ordered actions a sprite's script runs
//! - [`spritename`] – name of the sprite an entity represents

pub mod looksize;
pub mod scriptsequence;
pub mod spritename;
