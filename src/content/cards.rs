//! Card markup generation.
//!
//! Each record becomes one `<article>` in input order. Every card carries a
//! staggered reveal delay (`index * 100` ms) picked up by the page's
//! scroll-reveal CSS transition.

use std::fmt::Write;
use std::str::FromStr;

use super::records::Record;
use crate::error::ContentError;
use crate::html::{escape, safe_href};

/// Delay between consecutive cards' reveal animations.
pub const REVEAL_STAGGER_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Project,
    Research,
}

impl FromStr for CardKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" | "projects" => Ok(CardKind::Project),
            "research" => Ok(CardKind::Research),
            other => Err(ContentError::UnknownKind(other.to_string())),
        }
    }
}

impl CardKind {
    fn class(self) -> &'static str {
        match self {
            CardKind::Project => "project-card",
            CardKind::Research => "research-card",
        }
    }

    fn link_label(self) -> &'static str {
        match self {
            CardKind::Project => "View Project",
            CardKind::Research => "Read Paper",
        }
    }
}

/// One rendered card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub index: usize,
    pub reveal_delay_ms: u32,
    pub markup: String,
}

/// Render one card per record, preserving order.
pub fn render_cards(records: &[Record], kind: CardKind) -> Vec<Card> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let reveal_delay_ms = index as u32 * REVEAL_STAGGER_MS;
            Card {
                index,
                reveal_delay_ms,
                markup: card_markup(record, kind, reveal_delay_ms),
            }
        })
        .collect()
}

/// Concatenated markup, ready for `innerHTML`.
pub fn render_cards_html(records: &[Record], kind: CardKind) -> String {
    render_cards(records, kind)
        .into_iter()
        .map(|card| card.markup)
        .collect()
}

fn card_markup(record: &Record, kind: CardKind, delay_ms: u32) -> String {
    let mut html = String::with_capacity(512);

    // Writing into a String cannot fail
    let _ = write!(
        html,
        r#"<article class="card {} reveal" style="transition-delay: {}ms">"#,
        kind.class(),
        delay_ms
    );
    let _ = write!(
        html,
        r#"<div class="card-icon"><i class="{}"></i></div>"#,
        escape(&record.icon)
    );
    let _ = write!(html, r#"<h3 class="card-title">{}</h3>"#, escape(&record.title));
    if let Some(subtitle) = &record.subtitle {
        let _ = write!(html, r#"<p class="card-subtitle">{}</p>"#, escape(subtitle));
    }
    let _ = write!(
        html,
        r#"<p class="card-description">{}</p>"#,
        escape(&record.description)
    );
    if let Some(metric) = &record.metric {
        let _ = write!(html, r#"<div class="card-metric">{}</div>"#, escape(metric));
    }
    if let Some(supervisor) = &record.supervisor {
        let _ = write!(
            html,
            r#"<p class="card-supervisor">Supervisor: {}</p>"#,
            escape(supervisor)
        );
    }
    if !record.tags.is_empty() {
        html.push_str(r#"<ul class="card-tags">"#);
        for tag in &record.tags {
            let _ = write!(html, r#"<li class="tag">{}</li>"#, escape(tag));
        }
        html.push_str("</ul>");
    }
    if let Some(href) = record.link.as_deref().and_then(safe_href) {
        let _ = write!(
            html,
            r#"<a class="card-link" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape(href),
            kind.link_label()
        );
    }
    html.push_str("</article>");
    html
}
