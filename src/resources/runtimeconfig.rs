//! Runtime configuration resource.
//!
//! Settings loaded from an INI configuration file. Defaults are used for any
//! missing value, so a missing file is not fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [runtime]
//! actions_per_tick = 1
//! default_size = 100
//! max_ticks = 600
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

const DEFAULT_ACTIONS_PER_TICK: u32 = 1;
const DEFAULT_SIZE_PERCENT: f64 = 100.0;
const DEFAULT_MAX_TICKS: u32 = 600;
const DEFAULT_CONFIG_PATH: &str = "./catbricks.ini";

/// Runtime configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// How many pending actions each sprite sequence runs per tick.
    pub actions_per_tick: u32,
    /// Size (percent) given to sprites that do not declare one.
    pub default_size: f64,
    /// Upper bound on ticks the runner executes before giving up.
    pub max_ticks: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            actions_per_tick: DEFAULT_ACTIONS_PER_TICK,
            default_size: DEFAULT_SIZE_PERCENT,
            max_ticks: DEFAULT_MAX_TICKS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(n) = read_u32(&config, "actions_per_tick") {
            // zero would stall every sequence
            self.actions_per_tick = n.max(1);
        }
        if let Some(size) = config.getfloat("runtime", "default_size").ok().flatten() {
            self.default_size = size.max(0.0);
        }
        if let Some(n) = read_u32(&config, "max_ticks") {
            self.max_ticks = n;
        }

        info!(
            "Loaded config: actions_per_tick={}, default_size={}, max_ticks={}",
            self.actions_per_tick, self.default_size, self.max_ticks
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set(
            "runtime",
            "actions_per_tick",
            Some(self.actions_per_tick.to_string()),
        );
        config.set("runtime", "default_size", Some(self.default_size.to_string()));
        config.set("runtime", "max_ticks", Some(self.max_ticks.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

/// Read a `[runtime]` key as `u32`, ignoring values that do not fit.
fn read_u32(config: &Ini, key: &str) -> Option<u32> {
    let n = config.getuint("runtime", key).ok().flatten()?;
    match u32::try_from(n) {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Config value runtime.{} = {} is out of range, ignoring", key, n);
            None
        }
    }
}
