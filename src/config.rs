//! Site configuration.
//!
//! A single [`SiteConfig`] is built once at startup and handed by reference
//! to every component. Each section deserializes with `#[serde(default)]`,
//! so JavaScript can pass a partial object and override only what it names.

use serde::{Deserialize, Serialize};

use crate::background::Rgba;
use crate::error::ConfigError;

/// Top-level configuration for every page component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub background: BackgroundConfig,
    pub typewriter: TypewriterConfig,
    pub scroll: ScrollConfig,
    pub blog: BlogConfig,
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.background.validate()?;
        positive("typewriter.typeDelayMs", self.typewriter.type_delay_ms)?;
        positive("typewriter.deleteDelayMs", self.typewriter.delete_delay_ms)?;
        positive("scroll.throttleMs", self.scroll.throttle_ms)?;
        if !(0.0..1.0).contains(&self.scroll.reveal_threshold) {
            return Err(ConfigError::Invalid(format!(
                "scroll.revealThreshold must lie in [0, 1), got {}",
                self.scroll.reveal_threshold
            )));
        }
        positive("blog.timeoutMs", f64::from(self.blog.timeout_ms))?;
        if self.blog.page_size == 0 {
            return Err(ConfigError::Invalid("blog.pageSize must be at least 1".into()));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Animated background parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundConfig {
    /// Frame-rate ceiling (default: 30).
    pub max_fps: u32,
    /// Quiet period before a resize burst is applied (default: 250).
    pub resize_debounce_ms: f64,
    /// Viewport width below which the small node count applies (default: 768).
    pub small_breakpoint: f64,
    /// Viewport width below which the medium node count applies (default: 1200).
    pub medium_breakpoint: f64,
    pub small_node_count: usize,
    pub medium_node_count: usize,
    pub large_node_count: usize,
    /// Per-axis velocity bound in units per tick (default: 0.25).
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Nodes closer than this are connected (default: 150).
    pub connection_distance: f64,
    /// Edge alpha at distance zero (default: 0.2).
    pub max_edge_alpha: f64,
    pub line_width: f64,
    pub node_color: Rgba,
    /// Edge color; its alpha is replaced by the distance falloff.
    pub edge_color: Rgba,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            max_fps: 30,
            resize_debounce_ms: 250.0,
            small_breakpoint: 768.0,
            medium_breakpoint: 1200.0,
            small_node_count: 30,
            medium_node_count: 50,
            large_node_count: 80,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            connection_distance: 150.0,
            max_edge_alpha: 0.2,
            line_width: 0.5,
            node_color: Rgba::new(100, 255, 218, 0.5),
            edge_color: Rgba::new(100, 255, 218, 1.0),
        }
    }
}

impl BackgroundConfig {
    /// Number of nodes to simulate for a viewport of the given width.
    pub fn node_count_for_width(&self, width: f64) -> usize {
        if width < self.small_breakpoint {
            self.small_node_count
        } else if width < self.medium_breakpoint {
            self.medium_node_count
        } else {
            self.large_node_count
        }
    }

    /// Minimum interval between rendered frames.
    pub fn frame_budget_ms(&self) -> f64 {
        1000.0 / f64::from(self.max_fps.max(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_fps == 0 {
            return Err(ConfigError::NotPositive {
                field: "background.maxFps",
                value: 0.0,
            });
        }
        positive("background.resizeDebounceMs", self.resize_debounce_ms)?;
        positive("background.connectionDistance", self.connection_distance)?;
        positive("background.maxSpeed", self.max_speed)?;
        positive("background.minRadius", self.min_radius)?;
        if self.small_breakpoint >= self.medium_breakpoint {
            return Err(ConfigError::Thresholds {
                small: self.small_breakpoint,
                medium: self.medium_breakpoint,
            });
        }
        if self.min_radius >= self.max_radius {
            return Err(ConfigError::Invalid(format!(
                "background.minRadius ({}) must be below background.maxRadius ({})",
                self.min_radius, self.max_radius
            )));
        }
        Ok(())
    }
}

/// Typewriter effect timings, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypewriterConfig {
    pub type_delay_ms: f64,
    pub delete_delay_ms: f64,
    /// How long a fully typed phrase stays on screen.
    pub hold_ms: f64,
    /// Pause on the empty line before the next phrase starts.
    pub next_phrase_delay_ms: f64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_delay_ms: 100.0,
            delete_delay_ms: 50.0,
            hold_ms: 2000.0,
            next_phrase_delay_ms: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    /// Height of the fixed navigation bar.
    pub nav_offset_px: f64,
    pub throttle_ms: f64,
    /// Fraction of the viewport an element must clear before it reveals.
    pub reveal_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            nav_offset_px: 80.0,
            throttle_ms: 100.0,
            reveal_threshold: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogConfig {
    pub endpoint: String,
    /// Publication host queried for posts, e.g. `me.hashnode.dev`.
    pub host: String,
    /// Link target of the fallback panel.
    pub home_url: String,
    pub page_size: u32,
    pub timeout_ms: u32,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://gql.hashnode.com".into(),
            host: String::new(),
            home_url: String::new(),
            page_size: 3,
            timeout_ms: 10_000,
        }
    }
}
