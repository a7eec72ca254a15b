//! Command implementations behind the `wirecut` binary.

use crate::job::{JobFile, ProfileFile};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{info, warn};
use wirecut_core::Config;
use wirecut_gcode::{GcodeEmitter, GcodeStats};
use wirecut_toolpath::{sync_tapered_paths, PathOptimizer};

/// Loads `path`, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Writes `text` to `output`, or stdout when absent.
fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn log_stats(text: &str) {
    let stats = GcodeStats::from_text(text);
    info!(
        "Program: {} lines, {} moves ({} rapid, {} feed)",
        stats.total_lines, stats.move_commands, stats.rapid_moves, stats.feed_moves
    );
}

/// Optimizes a job file and emits its program.
pub fn optimize(
    job_path: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
    path_json: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let job = JobFile::load(job_path)
        .with_context(|| format!("Failed to load job {}", job_path.display()))?;

    let path = PathOptimizer::new(config.optimizer.clone()).optimize(&job.contours(), &job.overrides)?;
    for warning in &path.warnings {
        warn!("{}", warning);
    }

    if let Some(json_path) = path_json {
        let json = serde_json::to_string_pretty(&path)?;
        std::fs::write(json_path, json)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        info!("Wrote optimized path to {}", json_path.display());
    }

    let text = GcodeEmitter::from_settings(&config.machine).emit_path(&path);
    log_stats(&text);
    write_output(&text, output)
}

/// Synchronizes root and tip profiles and emits a 4-axis program.
pub fn taper(
    root_path: &Path,
    tip_path: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let root = ProfileFile::load(root_path)
        .with_context(|| format!("Failed to load root profile {}", root_path.display()))?;
    let tip = ProfileFile::load(tip_path)
        .with_context(|| format!("Failed to load tip profile {}", tip_path.display()))?;

    let synced = sync_tapered_paths(
        &root.polyline("root"),
        &tip.polyline("tip"),
        config.tapered.samples,
    );
    if synced.is_empty() {
        bail!("Root and tip profiles need at least two points each");
    }
    info!(
        "Synchronized {} samples (root {:.3}, tip {:.3})",
        synced.len(),
        synced.root_length,
        synced.tip_length
    );

    let text = GcodeEmitter::from_settings(&config.machine).emit4(&synced.polyline4);
    log_stats(&text);
    write_output(&text, output)
}

/// Writes the default configuration.
pub fn write_default_config(output: Option<&Path>) -> Result<()> {
    let config = Config::default();
    match output {
        Some(path) => {
            config
                .save_to_file(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote default configuration to {}", path.display());
            Ok(())
        }
        None => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
