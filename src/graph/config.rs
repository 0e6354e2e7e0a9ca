//! Configuration options and statistics for the game graph.
//!
//! The configuration controls pre-allocation of the node arena, the category
//! buckets and the match cursor frames, plus how often the solver reports
//! progress. None of it changes the results the graph computes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::error::ConfigError;

/// Configuration for a [`Graph`](crate::graph::Graph).
///
/// # Example
/// ```
/// use game_graph::graph::GraphConfig;
///
/// let config = GraphConfig::default().with_frame_capacity(16);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.bucket_capacity, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of nodes to reserve in the arena up front.
    ///
    /// Set this close to the expected graph size to avoid reallocations
    /// while solving large games.
    pub initial_capacity: usize,

    /// Initial capacity of a freshly created category bucket.
    ///
    /// Most categories hold only a handful of positions, so a small value
    /// keeps memory overhead low.
    pub bucket_capacity: usize,

    /// Initial number of frames reserved by a match cursor.
    ///
    /// Should be at least the usual match length of the game.
    pub frame_capacity: usize,

    /// Number of newly created nodes between two solver progress reports.
    pub log_interval: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            bucket_capacity: 4,
            frame_capacity: 64,
            log_interval: 100_000,
        }
    }
}

impl GraphConfig {
    /// Create a new GraphConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GraphConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method: set the initial arena capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Builder method: set the initial capacity of category buckets.
    pub fn with_bucket_capacity(mut self, capacity: usize) -> Self {
        self.bucket_capacity = capacity;
        self
    }

    /// Builder method: set the initial capacity of cursor frames.
    pub fn with_frame_capacity(mut self, capacity: usize) -> Self {
        self.frame_capacity = capacity;
        self
    }

    /// Builder method: set the solver progress interval.
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// Validate the configuration and return any errors.
    ///
    /// A zero `initial_capacity` is allowed; the arena then grows on demand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("bucket capacity"));
        }
        if self.frame_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("frame capacity"));
        }
        if self.log_interval == 0 {
            return Err(ConfigError::ZeroLogInterval);
        }
        Ok(())
    }
}

/// Statistics tracked while the graph grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Normal nodes in the graph, the root included.
    pub normal_nodes: usize,

    /// Transformation nodes in the graph.
    pub transformation_nodes: usize,

    /// Distinct position categories seen so far.
    pub categories: usize,

    /// Filled child slots.
    pub edges: usize,

    /// Propagations that changed at least one result.
    pub propagation_waves: u64,

    /// Result recomputations of any node during propagation.
    pub nodes_recomputed: u64,

    /// The largest number of results changed by a single new edge.
    pub largest_wave: usize,
}

impl GraphStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes of both kinds.
    pub fn total_nodes(&self) -> usize {
        self.normal_nodes + self.transformation_nodes
    }

    /// Record the end of a propagation that changed `changed` results.
    pub fn record_wave(&mut self, changed: usize) {
        if changed > 0 {
            self.propagation_waves += 1;
            self.largest_wave = self.largest_wave.max(changed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GraphConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_capacity, 64);
    }

    #[test]
    fn test_zero_capacities_rejected() {
        let config = GraphConfig::default().with_bucket_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCapacity("bucket capacity"))
        ));

        let config = GraphConfig::default().with_log_interval(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroLogInterval)));

        let config = GraphConfig::default().with_initial_capacity(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_str_fills_defaults() {
        let config = GraphConfig::from_json_str(r#"{ "frame_capacity": 12 }"#).unwrap();
        assert_eq!(config.frame_capacity, 12);
        assert_eq!(config.bucket_capacity, GraphConfig::default().bucket_capacity);
    }

    #[test]
    fn test_from_json_str_errors() {
        assert!(matches!(
            GraphConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GraphConfig::from_json_str(r#"{ "frame_capacity": 0 }"#),
            Err(ConfigError::ZeroCapacity(_))
        ));
        assert!(matches!(
            GraphConfig::from_json_file("/nonexistent/graph.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_stats_record_wave() {
        let mut stats = GraphStats::new();
        stats.record_wave(0);
        assert_eq!(stats.propagation_waves, 0);
        stats.record_wave(3);
        stats.record_wave(2);
        assert_eq!(stats.propagation_waves, 2);
        assert_eq!(stats.largest_wave, 3);
    }
}
