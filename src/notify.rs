//! Outbound user-facing messages. The engine reports outcomes here and never
//! reads anything back.

use serde::{Deserialize, Serialize};

/// Sink for messages produced while applying player actions.
pub trait Notifier {
    fn error(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn success(&mut self, message: &str);
}

/// Forwards notices to the `log` facade, tagged with the room they belong to.
pub struct LogNotifier {
    room: String,
}

impl LogNotifier {
    pub fn new(room: impl Into<String>) -> Self {
        Self { room: room.into() }
    }
}

impl Notifier for LogNotifier {
    fn error(&mut self, message: &str) {
        log::error!("[{}] {}", self.room, message);
    }

    fn warn(&mut self, message: &str) {
        log::warn!("[{}] {}", self.room, message);
    }

    fn success(&mut self, message: &str) {
        log::info!("[{}] {}", self.room, message);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Success,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

/// Keeps every notice in order so callers can relay them after an action.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    fn push(&mut self, level: Level, message: &str) {
        self.notices.push(Notice {
            level,
            message: message.to_string(),
        });
    }
}

impl Notifier for RecordingNotifier {
    fn error(&mut self, message: &str) {
        self.push(Level::Error, message);
    }

    fn warn(&mut self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn success(&mut self, message: &str) {
        self.push(Level::Success, message);
    }
}
