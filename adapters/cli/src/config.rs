//! TOML configuration consumed by the command-line harness.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use glam::DVec2;
use isoroom_rendering::{IsoProjection, RenderingError};
use isoroom_world::WorldConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Settings for a harness run.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AppConfig {
    /// Format version of the configuration file.
    pub(crate) version: u32,
    /// Limits and timings forwarded to the world.
    pub(crate) world: WorldConfig,
    /// Canvas and tile geometry used when capturing scenes.
    pub(crate) projection: ProjectionConfig,
    /// Fixed-step simulation parameters.
    pub(crate) simulation: SimulationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            world: WorldConfig::default(),
            projection: ProjectionConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

/// Tile and canvas geometry in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ProjectionConfig {
    pub(crate) tile_width: f64,
    pub(crate) tile_height: f64,
    pub(crate) zoom: f64,
    pub(crate) canvas_width: f64,
    pub(crate) canvas_height: f64,
}

impl ProjectionConfig {
    /// Builds the projection described by the configuration.
    pub(crate) fn projection(&self) -> Result<IsoProjection, RenderingError> {
        IsoProjection::new(
            DVec2::new(self.tile_width, self.tile_height),
            self.zoom,
            DVec2::new(self.canvas_width, self.canvas_height),
        )
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            tile_width: 64.0,
            tile_height: 32.0,
            zoom: 1.0,
            canvas_width: 1280.0,
            canvas_height: 720.0,
        }
    }
}

/// Fixed-step loop parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationConfig {
    pub(crate) tick_ms: u64,
    pub(crate) max_ticks: u64,
}

impl SimulationConfig {
    /// Duration of a single simulation step.
    pub(crate) const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            max_ticks: 10_000,
        }
    }
}

/// Semantic problems found in an otherwise well-formed configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub(crate) enum ConfigError {
    /// The file declares a format version this build does not understand.
    #[error("unsupported configuration version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version supported by this build.
        expected: u32,
    },
    /// A zero tick would never advance the simulation.
    #[error("simulation tick_ms must be greater than zero")]
    ZeroTick,
}

/// Loads the configuration, falling back to defaults when no file exists.
pub(crate) fn load(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        warn!(path = %path.display(), "configuration file not found; using defaults");
        return Ok(AppConfig::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration from {}", path.display()))?;
    let config = parse(&contents)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn parse(contents: &str) -> Result<AppConfig> {
    let config: AppConfig =
        toml::from_str(contents).context("failed to parse configuration toml contents")?;

    if config.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: config.version,
            expected: SUPPORTED_CONFIG_VERSION,
        }
        .into());
    }
    if config.simulation.tick_ms == 0 {
        return Err(ConfigError::ZeroTick.into());
    }

    Ok(config)
}
