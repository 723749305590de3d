//! Best-effort blog feed.
//!
//! JavaScript performs the single GraphQL request (with an `AbortController`
//! enforcing the timeout) and hands the outcome back. Everything that can go
//! wrong collapses into one recovery: render the static fallback panel. The
//! reason is only logged.

use std::fmt::Write;

use chrono::DateTime;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::BlogConfig;
use crate::error::BlogError;
use crate::html::{escape, safe_href};

pub type Result<T> = std::result::Result<T, BlogError>;

const POSTS_QUERY: &str = "query Posts($host: String!, $first: Int!) { \
publication(host: $host) { posts(first: $first) { edges { node { \
title brief url publishedAt readTimeInMinutes } } } } }";

/// Everything JavaScript needs to issue the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    pub endpoint: String,
    /// JSON-encoded GraphQL POST body.
    pub body: String,
    pub timeout_ms: u32,
}

impl BlogRequest {
    pub fn graphql(config: &BlogConfig) -> Self {
        let body = json!({
            "query": POSTS_QUERY,
            "variables": { "host": config.host, "first": config.page_size },
        });
        Self {
            endpoint: config.endpoint.clone(),
            body: body.to_string(),
            timeout_ms: config.timeout_ms,
        }
    }
}

/// How the request ended, as reported by the JavaScript side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FetchOutcome {
    Response { status: u16, body: String },
    NetworkError { message: String },
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    #[serde(default)]
    pub brief: String,
    pub url: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default, rename = "readTimeInMinutes")]
    pub read_time_minutes: Option<u32>,
}

/// What the blog section shows.
#[derive(Debug, Clone, PartialEq)]
pub enum BlogFeed {
    Posts(Vec<BlogPost>),
    Fallback,
}

// GraphQL response envelope

#[derive(Deserialize)]
struct Envelope {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct Data {
    publication: Option<Publication>,
}

#[derive(Deserialize)]
struct Publication {
    posts: Connection,
}

#[derive(Deserialize)]
struct Connection {
    edges: Vec<Edge>,
}

#[derive(Deserialize)]
struct Edge {
    node: BlogPost,
}

/// Turn a fetch outcome into posts, or the reason there are none.
pub fn classify(outcome: FetchOutcome, timeout_ms: u32) -> Result<Vec<BlogPost>> {
    let (status, body) = match outcome {
        FetchOutcome::Response { status, body } => (status, body),
        FetchOutcome::NetworkError { message } => return Err(BlogError::Network(message)),
        FetchOutcome::TimedOut => return Err(BlogError::Timeout(timeout_ms)),
    };

    if !(200..300).contains(&status) {
        return Err(BlogError::Status(status));
    }

    let envelope: Envelope = serde_json::from_str(&body)?;
    if !envelope.errors.is_empty() {
        let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(BlogError::Graphql(messages.join("; ")));
    }

    let posts: Vec<BlogPost> = envelope
        .data
        .and_then(|d| d.publication)
        .map(|p| p.posts.edges.into_iter().map(|e| e.node).collect())
        .unwrap_or_default();

    if posts.is_empty() {
        return Err(BlogError::Empty);
    }
    Ok(posts)
}

/// Classify the outcome and fall back on any failure.
pub fn resolve(outcome: FetchOutcome, config: &BlogConfig) -> BlogFeed {
    match classify(outcome, config.timeout_ms) {
        Ok(posts) => {
            info!("loaded {} blog posts", posts.len());
            BlogFeed::Posts(posts)
        }
        Err(err) => {
            warn!("blog feed unavailable, showing fallback: {err}");
            BlogFeed::Fallback
        }
    }
}

pub fn render_feed_html(feed: &BlogFeed, config: &BlogConfig) -> String {
    match feed {
        BlogFeed::Posts(posts) => posts
            .iter()
            .enumerate()
            .map(|(i, post)| post_markup(post, i))
            .collect(),
        BlogFeed::Fallback => fallback_markup(config),
    }
}

fn post_markup(post: &BlogPost, index: usize) -> String {
    let mut html = String::with_capacity(384);
    let _ = write!(
        html,
        r#"<article class="blog-card reveal" style="transition-delay: {}ms">"#,
        index * 100
    );
    match safe_href(&post.url) {
        Some(href) => {
            let _ = write!(
                html,
                r#"<h3 class="blog-title"><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></h3>"#,
                escape(href),
                escape(&post.title)
            );
        }
        None => {
            let _ = write!(html, r#"<h3 class="blog-title">{}</h3>"#, escape(&post.title));
        }
    }
    if !post.brief.is_empty() {
        let _ = write!(html, r#"<p class="blog-brief">{}</p>"#, escape(&post.brief));
    }

    html.push_str(r#"<div class="blog-meta">"#);
    if let Some(date) = format_date(&post.published_at) {
        let _ = write!(html, "<span>{date}</span>");
    }
    if let Some(minutes) = post.read_time_minutes {
        let _ = write!(html, "<span>{minutes} min read</span>");
    }
    html.push_str("</div></article>");
    html
}

fn fallback_markup(config: &BlogConfig) -> String {
    let mut html = String::from(
        r#"<div class="blog-fallback"><p>Latest posts can't be loaded right now.</p>"#,
    );
    if let Some(href) = safe_href(&config.home_url) {
        let _ = write!(
            html,
            r#"<a class="btn" href="{}" target="_blank" rel="noopener noreferrer">Visit the blog</a>"#,
            escape(href)
        );
    }
    html.push_str("</div>");
    html
}

/// `2024-03-05T10:00:00.000Z` -> `Mar 5, 2024`. Anything that is not a
/// valid RFC 3339 timestamp yields `None` and the date is left out.
fn format_date(published_at: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(published_at)
        .ok()
        .map(|date| date.format("%b %-d, %Y").to_string())
}
