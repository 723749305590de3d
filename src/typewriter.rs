//! Typewriter text effect.
//!
//! Cycles through a list of phrases: type one character at a time, hold the
//! full phrase, delete it, pause on the empty line, then move to the next
//! phrase. Driven by [`Typewriter::tick`] with a monotonic timestamp, so the
//! caller decides how often to poll (usually every animation frame).

use crate::config::TypewriterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Holding,
    Deleting,
    Waiting,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    config: TypewriterConfig,
    phrase: usize,
    /// Number of visible characters of the current phrase.
    visible: usize,
    phase: Phase,
    /// Timestamp of the last transition; `None` until the first tick.
    last_change: Option<f64>,
    text: String,
}

impl Typewriter {
    pub fn new<I, S>(phrases: I, config: &TypewriterConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().chars().collect())
                .collect(),
            config: config.clone(),
            phrase: 0,
            visible: 0,
            phase: Phase::Typing,
            last_change: None,
            text: String::new(),
        }
    }

    /// Advance the effect to `now` and return the visible text.
    ///
    /// Each elapsed delay moves the effect by one step, so a long gap between
    /// ticks catches up instead of jumping straight to the end.
    pub fn tick(&mut self, now: f64) -> &str {
        if self.phrases.is_empty() {
            return "";
        }

        let Some(mut last) = self.last_change else {
            self.last_change = Some(now);
            return &self.text;
        };

        while now - last >= self.current_delay() {
            last += self.current_delay();
            self.advance();
        }
        self.last_change = Some(last);

        self.text = self.phrases[self.phrase][..self.visible].iter().collect();
        &self.text
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the phrase currently being typed or deleted.
    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn current_delay(&self) -> f64 {
        match self.phase {
            Phase::Typing => self.config.type_delay_ms,
            Phase::Holding => self.config.hold_ms,
            Phase::Deleting => self.config.delete_delay_ms,
            Phase::Waiting => self.config.next_phrase_delay_ms,
        }
        .max(1.0)
    }

    fn advance(&mut self) {
        let len = self.phrases[self.phrase].len();
        match self.phase {
            Phase::Typing => {
                if self.visible < len {
                    self.visible += 1;
                }
                if self.visible == len {
                    self.phase = Phase::Holding;
                }
            }
            Phase::Holding => self.phase = Phase::Deleting,
            Phase::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible == 0 {
                    self.phase = Phase::Waiting;
                }
            }
            Phase::Waiting => {
                self.phrase = (self.phrase + 1) % self.phrases.len();
                self.phase = Phase::Typing;
            }
        }
    }
}
