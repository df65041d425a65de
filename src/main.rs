//! catbricks entry point.
//!
//! Loads a project file, builds each sprite's script sequence from its
//! bricks, runs the sequences headlessly and prints the final sprite sizes.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- project.json --config catbricks.ini
//! ```

use catbricks::project::Project;
use catbricks::resources::runtimeconfig::RuntimeConfig;
use catbricks::runtime::ScriptRuntime;
use clap::Parser;
use std::path::PathBuf;

/// Headless runner for brick scripts
#[derive(Parser)]
#[command(version, about = "Run brick scripts and report sprite sizes.")]
struct Cli {
    /// Project JSON file to run.
    project: Option<PathBuf>,

    /// INI configuration file (default: ./catbricks.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum number of ticks to run. Overrides `max_ticks` from the config.
    #[arg(long, value_name = "N")]
    ticks: Option<u32>,

    /// Write the loaded project back to PATH after validation.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Write the effective configuration and exit.
    /// Optionally provide a path (default: the --config path).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::with_path(path),
        None => RuntimeConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        // defaults are fine when there is no config file
        log::debug!("{}", e);
    }

    // Early-exit: write config and quit
    if let Some(maybe_path) = cli.write_config {
        if let Some(path) = maybe_path {
            config.config_path = path;
        }
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    let Some(project_path) = cli.project else {
        eprintln!("Error: no project file given (see --help)");
        std::process::exit(2);
    };

    let project = match Project::load(&project_path) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error loading {}: {e}", project_path.display());
            std::process::exit(1);
        }
    };

    if let Some(path) = &cli.save {
        if let Err(e) = project.save(path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let max_ticks = cli.ticks.unwrap_or(config.max_ticks);
    let mut runtime = ScriptRuntime::new(config);
    if let Err(e) = runtime.load(&project) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    runtime.run_until_finished(max_ticks);
    if !runtime.all_finished() {
        log::warn!("Stopped after {} tick(s) with actions pending", max_ticks);
    }

    for (name, size) in runtime.sizes() {
        println!("{name}: {size}%");
    }
}
