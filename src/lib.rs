//! Portfolio Site - WASM Module
//!
//! This module drives the interactive parts of a single-page portfolio site.
//! It is compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen. JavaScript owns the DOM and the network; Rust owns the
//! state, the simulation and the markup.
//!
//! # Architecture
//!
//! - `background`: Drifting-node simulation with proximity edges, generic over
//!   its drawing surface and frame scheduler
//! - `web`: `<canvas>` surface and `requestAnimationFrame` loop
//! - `timing`: Frame-rate gate, debouncer and throttle driven by timestamps
//! - `typewriter`: Type/hold/delete text cycling
//! - `scroll`: Scroll spy, smooth-scroll targets and reveal checks
//! - `content`: Project/research records rendered into cards
//! - `blog`: GraphQL request building and fallback-on-failure classification
//! - `contact`: Contact form validation and submission messages

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod background;
pub mod blog;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod html;
pub mod scroll;
pub mod timing;
pub mod typewriter;
pub mod web;

pub use config::SiteConfig;

use blog::{BlogRequest, FetchOutcome};
use contact::{ContactForm, SubmissionStatus};
use content::{CardKind, ContentStore, Record};
use scroll::Section;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) keeps the existing logger
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Read an optional JS config object. `undefined`/`null` means defaults.
fn site_config(value: JsValue) -> Result<SiteConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SiteConfig::default());
    }
    let config: SiteConfig = serde_wasm_bindgen::from_value(value)?;
    config.validate().map_err(to_js_error)?;
    Ok(config)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// =========================================================================
// Background
// =========================================================================

/// Start the animated background on `<canvas id={canvasId}>`.
///
/// Silently does nothing if the canvas or its 2D context is missing.
#[wasm_bindgen(js_name = startBackground)]
pub fn start_background(canvas_id: &str, config: JsValue) -> Result<(), JsValue> {
    let config = site_config(config)?;
    web::start_background(canvas_id, &config.background)
}

// =========================================================================
// Typewriter
// =========================================================================

/// Typewriter effect. Call `tick(performance.now())` every frame and write
/// the returned text into the element.
#[wasm_bindgen(js_name = Typewriter)]
pub struct TypewriterWasm {
    inner: typewriter::Typewriter,
}

#[wasm_bindgen(js_class = Typewriter)]
impl TypewriterWasm {
    #[wasm_bindgen(constructor)]
    pub fn new(phrases: Vec<String>, config: JsValue) -> Result<TypewriterWasm, JsValue> {
        let config = site_config(config)?;
        Ok(Self {
            inner: typewriter::Typewriter::new(phrases, &config.typewriter),
        })
    }

    /// Advance to `now` (milliseconds) and return the visible text.
    pub fn tick(&mut self, now: f64) -> String {
        self.inner.tick(now).to_string()
    }

    /// Text currently on screen, as of the last `tick`.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.text().to_string()
    }

    /// Index of the phrase being typed or deleted.
    #[wasm_bindgen(getter, js_name = phraseIndex)]
    pub fn phrase_index(&self) -> usize {
        self.inner.phrase_index()
    }
}

// =========================================================================
// Scroll Spy
// =========================================================================

/// Navigation highlighting driven by scroll position.
#[wasm_bindgen(js_name = ScrollSpy)]
pub struct ScrollSpyWasm {
    inner: scroll::ScrollSpy,
}

#[wasm_bindgen(js_class = ScrollSpy)]
impl ScrollSpyWasm {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ScrollSpyWasm, JsValue> {
        let config = site_config(config)?;
        Ok(Self {
            inner: scroll::ScrollSpy::new(&config.scroll),
        })
    }

    /// Replace the section geometry.
    ///
    /// Takes an array of `{ id, top, height }` in document coordinates.
    #[wasm_bindgen(js_name = setSections)]
    pub fn set_sections(&mut self, sections: JsValue) -> Result<(), JsValue> {
        let sections: Vec<Section> = serde_wasm_bindgen::from_value(sections)?;
        self.inner.set_sections(sections);
        Ok(())
    }

    /// Throttled scroll handler.
    ///
    /// Returns the id of the section to highlight, or `undefined` if the
    /// highlight should stay as it is.
    #[wasm_bindgen(js_name = onScroll)]
    pub fn on_scroll(&mut self, scroll_y: f64, now: f64) -> Option<String> {
        self.inner.on_scroll(scroll_y, now)
    }

    /// Apply a scroll position held back by the throttle.
    ///
    /// Poll this (e.g. from a timer armed on every scroll event) so the
    /// highlight settles once scrolling stops. Same return contract as
    /// `onScroll`.
    pub fn flush(&mut self, now: f64) -> Option<String> {
        self.inner.flush(now)
    }

    /// Id of the highlighted section, if any.
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> Option<String> {
        self.inner.active().map(str::to_string)
    }

    /// Unthrottled lookup of the section at `scrollY`.
    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self, scroll_y: f64) -> Option<String> {
        self.inner.active_section(scroll_y).map(|s| s.id.clone())
    }

    /// Smooth-scroll destination for a `#section` link.
    #[wasm_bindgen(js_name = scrollTarget)]
    pub fn scroll_target(&self, section_id: &str) -> Option<f64> {
        self.inner.scroll_target(section_id)
    }

    /// Whether an element `elementTop` pixels below the viewport top should
    /// reveal, using the configured `revealThreshold`.
    #[wasm_bindgen(js_name = isRevealed)]
    pub fn is_revealed(&self, element_top: f64, viewport_height: f64) -> bool {
        self.inner.is_revealed(element_top, viewport_height)
    }
}

// =========================================================================
// Content Cards
// =========================================================================

#[derive(Serialize)]
struct RenderedContent {
    projects: String,
    research: String,
}

/// Render an array of records into card markup.
///
/// `kind` is `"project"` or `"research"`. Cards keep the input order and
/// carry a `index * 100` ms reveal delay.
#[wasm_bindgen(js_name = renderCards)]
pub fn render_cards(records: JsValue, kind: &str) -> Result<String, JsValue> {
    let kind: CardKind = kind.parse().map_err(to_js_error)?;
    let records: Vec<Record> = serde_wasm_bindgen::from_value(records)?;
    Ok(content::render_cards_html(&records, kind))
}

/// Parse the whole content store from JSON and render both sections.
///
/// Returns `{ projects, research }` markup strings.
#[wasm_bindgen(js_name = renderContent)]
pub fn render_content(json: &str) -> Result<JsValue, JsValue> {
    let store = ContentStore::from_json(json).map_err(to_js_error)?;
    let rendered = RenderedContent {
        projects: content::render_cards_html(&store.projects, CardKind::Project),
        research: content::render_cards_html(&store.research, CardKind::Research),
    };
    Ok(serde_wasm_bindgen::to_value(&rendered)?)
}

// =========================================================================
// Blog Feed
// =========================================================================

/// Build the blog request: `{ endpoint, body, timeoutMs }`.
#[wasm_bindgen(js_name = blogRequest)]
pub fn blog_request(config: JsValue) -> Result<JsValue, JsValue> {
    let config = site_config(config)?;
    Ok(serde_wasm_bindgen::to_value(&BlogRequest::graphql(&config.blog))?)
}

/// Turn the fetch outcome into blog markup.
///
/// `outcome` is one of `{ kind: "response", status, body }`,
/// `{ kind: "networkError", message }` or `{ kind: "timedOut" }`. Any
/// failure (including an unreadable outcome) renders the fallback panel.
#[wasm_bindgen(js_name = resolveBlogFeed)]
pub fn resolve_blog_feed(outcome: JsValue, config: JsValue) -> Result<String, JsValue> {
    let config = site_config(config)?;
    let feed = match serde_wasm_bindgen::from_value::<FetchOutcome>(outcome) {
        Ok(outcome) => blog::resolve(outcome, &config.blog),
        Err(err) => {
            log::warn!("unreadable blog fetch outcome, showing fallback: {err}");
            blog::BlogFeed::Fallback
        }
    };
    Ok(blog::render_feed_html(&feed, &config.blog))
}

// =========================================================================
// Contact Form
// =========================================================================

/// Validate `{ name, email, subject, message }`.
///
/// Returns every `{ field, message }` failure at once; an empty array means
/// the form may be submitted.
#[wasm_bindgen(js_name = validateContactForm)]
pub fn validate_contact_form(form: JsValue) -> Result<JsValue, JsValue> {
    let form: ContactForm = serde_wasm_bindgen::from_value(form)?;
    let errors = form.validate().err().unwrap_or_default();
    Ok(serde_wasm_bindgen::to_value(&errors)?)
}

/// JSON body to POST once validation has passed.
#[wasm_bindgen(js_name = contactPayload)]
pub fn contact_payload(form: JsValue) -> Result<String, JsValue> {
    let form: ContactForm = serde_wasm_bindgen::from_value(form)?;
    Ok(form.to_payload())
}

/// User-facing message for a submission result.
#[wasm_bindgen(js_name = submissionMessage)]
pub fn submission_message(sent: bool) -> String {
    let status = if sent {
        SubmissionStatus::Sent
    } else {
        SubmissionStatus::Failed
    };
    status.message().to_string()
}
