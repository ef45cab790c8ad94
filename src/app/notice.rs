//! User-facing notices.
//!
//! Operations never abort on an I/O failure. They record a notice and carry
//! on with whatever data they have; the shell prints the notices after the
//! report.

use serde::Serialize;
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub const FILE_READ_ERROR: &'static str = "File Read Error";
    pub const FILE_WRITE_ERROR: &'static str = "File Write Error";
    pub const ALLOWLIST_ERROR: &'static str = "Allowlist Error";
    pub const NO_SELECTION: &'static str = "No Selection";
    pub const ALLOWLIST_UPDATED: &'static str = "Allowlist Updated";

    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level.as_str(), self.title, self.message)
    }
}

/// Ordered collection of the notices raised during one command.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Warning => warn!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Error => error!(title = %notice.title, "{}", notice.message),
        }
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn highest_level(&self) -> Option<NoticeLevel> {
        self.notices.iter().map(|notice| notice.level).max()
    }

    /// True when a warning or error was raised.
    pub fn has_problems(&self) -> bool {
        self.highest_level()
            .is_some_and(|level| level >= NoticeLevel::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let notice = Notice::error(Notice::FILE_READ_ERROR, "permission denied");
        assert_eq!(notice.to_string(), "[error] File Read Error: permission denied");
    }

    #[test]
    fn test_board_tracks_highest_level() {
        let mut board = NoticeBoard::new();
        assert_eq!(board.highest_level(), None);
        assert!(!board.has_problems());

        board.push(Notice::info(Notice::ALLOWLIST_UPDATED, "added"));
        assert!(!board.has_problems());

        board.push(Notice::warning(Notice::NO_SELECTION, "nothing matched"));
        assert!(board.has_problems());
        assert_eq!(board.highest_level(), Some(NoticeLevel::Warning));

        let taken = board.take();
        assert_eq!(taken.len(), 2);
        assert!(board.notices().is_empty());
    }
}
