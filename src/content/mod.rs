//! Project and research content.
//!
//! Records are loaded once from JSON into a [`ContentStore`] and rendered
//! into card markup for the page.

mod cards;
mod records;

pub use cards::{render_cards, render_cards_html, Card, CardKind, REVEAL_STAGGER_MS};
pub use records::{ContentStore, Record};
