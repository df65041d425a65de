//! catbricks library.
//!
//! A headless runtime for brick-based sprite scripts. Bricks hold formula
//! fields and, when a script is built, ask the sprite's action factory for
//! actions that a `bevy_ecs` system then executes against sprite state.
//!
//! - [`actions`] – executable actions and the factory trait that builds them
//! - [`bricks`] – brick kinds, their field registry and view identifiers
//! - [`components`] – ECS components describing sprite state
//! - [`formula`] – expression trees bound to brick fields
//! - [`project`] – JSON project files and spawning them into a world
//! - [`resources`] – ECS resources (configuration, user variables)
//! - [`runtime`] – world + schedule driver
//! - [`sprite`] – handle passed to bricks on activation
//! - [`systems`] – ECS systems executing script sequences

pub mod actions;
pub mod bricks;
pub mod components;
pub mod formula;
pub mod project;
pub mod resources;
pub mod runtime;
pub mod sprite;
pub mod systems;
