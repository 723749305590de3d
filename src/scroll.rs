//! Scroll spy, smooth-scroll targets and reveal checks.
//!
//! The page reports section geometry once (and again after layout changes);
//! scroll events then map to the navigation link that should be highlighted.

use serde::{Deserialize, Serialize};

use crate::config::ScrollConfig;
use crate::timing::Throttle;

/// A page section as laid out in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<Section>,
    nav_offset: f64,
    reveal_threshold: f64,
    throttle: Throttle<f64>,
    active: Option<String>,
}

impl ScrollSpy {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            sections: Vec::new(),
            nav_offset: config.nav_offset_px,
            reveal_threshold: config.reveal_threshold,
            throttle: Throttle::new(config.throttle_ms),
            active: None,
        }
    }

    /// Replace the known sections. They are kept sorted by `top`.
    pub fn set_sections(&mut self, mut sections: Vec<Section>) {
        sections.sort_by(|a, b| a.top.total_cmp(&b.top));
        self.sections = sections;
        self.active = None;
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The section whose top has scrolled under the navigation bar most
    /// recently, or the first section when the page is scrolled above all of
    /// them.
    pub fn active_section(&self, scroll_y: f64) -> Option<&Section> {
        self.sections
            .iter()
            .rev()
            .find(|s| s.top - self.nav_offset <= scroll_y)
            .or_else(|| self.sections.first())
    }

    /// Throttled scroll handler. Returns the new active section id only when
    /// the highlight has to change.
    ///
    /// A position that arrives inside the throttle interval is kept and
    /// applied by [`ScrollSpy::flush`].
    pub fn on_scroll(&mut self, scroll_y: f64, now: f64) -> Option<String> {
        let scroll_y = self.throttle.call(scroll_y, now)?;
        self.highlight(scroll_y)
    }

    /// Apply the last throttled scroll position once the interval has
    /// passed. Poll this after scrolling stops so the highlight settles on
    /// where the page actually came to rest.
    pub fn flush(&mut self, now: f64) -> Option<String> {
        let scroll_y = self.throttle.maybe_invoke(now)?;
        self.highlight(scroll_y)
    }

    /// Id of the currently highlighted section.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether an element `element_top` pixels below the viewport top has
    /// cleared the configured reveal threshold.
    pub fn is_revealed(&self, element_top: f64, viewport_height: f64) -> bool {
        is_revealed(element_top, viewport_height, self.reveal_threshold)
    }

    fn highlight(&mut self, scroll_y: f64) -> Option<String> {
        let id = self.active_section(scroll_y)?.id.clone();
        if self.active.as_deref() == Some(id.as_str()) {
            return None;
        }
        self.active = Some(id.clone());
        Some(id)
    }

    /// Scroll position that puts `section_id` just below the navigation bar.
    pub fn scroll_target(&self, section_id: &str) -> Option<f64> {
        let id = section_id.strip_prefix('#').unwrap_or(section_id);
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| (s.top - self.nav_offset).max(0.0))
    }
}

/// Whether an element whose top sits `element_top` pixels below the
/// viewport's top edge should play its reveal animation.
pub fn is_revealed(element_top: f64, viewport_height: f64, threshold: f64) -> bool {
    element_top < viewport_height * (1.0 - threshold)
}
