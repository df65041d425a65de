//! ECS resources made available to systems.
//!
//! Overview
//! - `runtimeconfig` – settings loaded from the INI configuration file
//! - `uservariables` – numeric variables readable from formulas
pub mod runtimeconfig;
pub mod uservariables;
