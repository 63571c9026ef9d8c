//! Transient status message.
//!
//! The message is bounded to `MAX_MESSAGE_LEN` bytes (cut on a char boundary)
//! and is hidden once it is older than the timeout. Expiry is evaluated at
//! render time against a caller-supplied `Instant`; nothing clears it actively.

use std::time::{Duration, Instant};

pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);
pub const MAX_MESSAGE_LEN: usize = 80;

#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Option<Instant>,
    timeout: Duration,
}

impl StatusMessage {
    pub fn new(timeout: Duration) -> Self {
        Self {
            text: String::new(),
            set_at: None,
            timeout,
        }
    }

    pub fn set<S: Into<String>>(&mut self, text: S, now: Instant) {
        let mut text = text.into();
        if text.len() > MAX_MESSAGE_LEN {
            let mut cut = MAX_MESSAGE_LEN;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }
        self.text = text;
        self.set_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.set_at = None;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Raw text regardless of age.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Message text if it is non-empty and younger than the timeout at `now`.
    pub fn visible(&self, now: Instant) -> Option<&str> {
        let set_at = self.set_at?;
        if self.text.is_empty() || now.saturating_duration_since(set_at) >= self.timeout {
            return None;
        }
        Some(&self.text)
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TIMEOUT)
    }
}
