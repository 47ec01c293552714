//! Message log
//!
//! Short, categorised lines describing what happened each turn.

/// Oldest entries are dropped past this
pub const MAX_MESSAGES: usize = 100;

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMessage {
    pub text: String,
    /// Turn the message was logged on
    pub turn: u32,
    pub category: MessageCategory,
}

/// Categories for message filtering/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Combat,
    Item,
    Progression,
    System,
}

impl MessageCategory {
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            MessageCategory::Combat => (220, 90, 90),
            MessageCategory::Item => (120, 200, 240),
            MessageCategory::Progression => (240, 210, 90),
            MessageCategory::System => (180, 180, 180),
        }
    }
}

/// Bounded log, oldest first
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<GameMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the log
    pub fn push(&mut self, text: impl Into<String>, category: MessageCategory, turn: u32) {
        self.entries.push(GameMessage {
            text: text.into(),
            turn,
            category,
        });

        if self.entries.len() > MAX_MESSAGES {
            let excess = self.entries.len() - MAX_MESSAGES;
            self.entries.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[GameMessage] {
        &self.entries
    }

    /// The last `count` messages
    pub fn recent(&self, count: usize) -> &[GameMessage] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = MessageLog::new();
        for i in 0..150 {
            log.push(format!("line {}", i), MessageCategory::System, i);
        }
        assert_eq!(log.entries().len(), MAX_MESSAGES);
        assert_eq!(log.entries()[0].text, "line 50");
        assert_eq!(log.recent(1)[0].text, "line 149");
    }

    #[test]
    fn test_recent_with_few_entries() {
        let mut log = MessageLog::new();
        log.push("hello", MessageCategory::Item, 0);
        assert_eq!(log.recent(5).len(), 1);
    }
}
