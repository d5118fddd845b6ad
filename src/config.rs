use crate::domains::navigation::{HeuristicKind, Rgb, TerrainCosts};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub map: MapConfig,
    pub search: SearchConfig,
    pub route: RouteConfig,
    pub motion: MotionConfig,
    pub logging: LoggingConfig,
}

/// Color contract with the vision service and terrain cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub wall_color: Rgb,
    pub target_color: Rgb,
    pub wall_clearance_radius: u32,
    pub wall_cost: u32,
    pub open_cost: u32,
    /// Minimum distance between two distinct objective markers, in pixels.
    pub target_separation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub heuristic: HeuristicKind,
    pub path_cache_capacity: usize,
    pub heuristic_cache_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub bearing_tolerance_deg: f64,
    pub waypoint_separation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub arrival_tolerance: f64,
    pub poll_interval_ms: u64,
    pub track_interval_ms: u64,
    /// 0 waits for combat to clear without a deadline.
    pub combat_wait_timeout_secs: u64,
    pub max_recoveries_per_waypoint: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            wall_color: Rgb::WHITE,
            target_color: Rgb::MARKER_RED,
            wall_clearance_radius: 10,
            wall_cost: 10,
            open_cost: 1,
            target_separation: 15.0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::Chebyshev,
            path_cache_capacity: 50,
            heuristic_cache_capacity: 50,
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            bearing_tolerance_deg: 8.0,
            waypoint_separation: 5.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            arrival_tolerance: 8.0,
            poll_interval_ms: 300,
            track_interval_ms: 50,
            combat_wait_timeout_secs: 120,
            max_recoveries_per_waypoint: 20,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl MapConfig {
    pub fn terrain_costs(&self) -> TerrainCosts {
        TerrainCosts {
            wall_color: self.wall_color,
            clearance_radius: self.wall_clearance_radius,
            wall_cost: self.wall_cost,
            open_cost: self.open_cost,
        }
    }
}

impl MotionConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn track_interval(&self) -> Duration {
        Duration::from_millis(self.track_interval_ms)
    }

    pub fn combat_wait_timeout(&self) -> Option<Duration> {
        (self.combat_wait_timeout_secs > 0).then(|| Duration::from_secs(self.combat_wait_timeout_secs))
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Layer `WAYMARK__<SECTION>__<KEY>` environment variables over the
    /// optional TOML file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix("WAYMARK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.map.open_cost >= 1, "map.open_cost must be at least 1");
        ensure!(
            self.map.wall_cost >= self.map.open_cost,
            "map.wall_cost must not be below map.open_cost"
        );
        ensure!(self.map.target_separation >= 0.0, "map.target_separation must not be negative");
        ensure!(self.search.path_cache_capacity > 0, "search.path_cache_capacity must be positive");
        ensure!(
            self.search.heuristic_cache_capacity > 0,
            "search.heuristic_cache_capacity must be positive"
        );
        ensure!(self.route.bearing_tolerance_deg >= 0.0, "route.bearing_tolerance_deg must not be negative");
        ensure!(self.route.waypoint_separation >= 0.0, "route.waypoint_separation must not be negative");
        ensure!(self.motion.arrival_tolerance >= 0.0, "motion.arrival_tolerance must not be negative");
        ensure!(self.motion.poll_interval_ms > 0, "motion.poll_interval_ms must be positive");
        Ok(())
    }
}
