//! The chat log: rendered messages plus the transient typing indicator.

use crate::message::{build_view, Message, MessageView, Role, BOT_NAME};
use crate::time::current_time;

/// Handle to an entry in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// Id reserved for the typing indicator. There is never more than one.
pub const TYPING_INDICATOR_ID: EntryId = EntryId(0);

/// Placeholder shown while a reply is pending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingIndicator {
    pub avatar: &'static str,
    pub author: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Message { id: EntryId, view: MessageView },
    Typing(TypingIndicator),
}

impl LogEntry {
    pub fn id(&self) -> EntryId {
        match self {
            LogEntry::Message { id, .. } => *id,
            LogEntry::Typing(_) => TYPING_INDICATOR_ID,
        }
    }
}

#[derive(Debug, Default)]
pub struct ChatLog {
    entries: Vec<LogEntry>,
    next_id: u64,
    /// Lines scrolled up from the bottom; 0 means pinned to the bottom
    scroll_back: u16,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and pin the view to the bottom.
    pub fn push(&mut self, message: &Message) -> EntryId {
        self.next_id += 1;
        let id = EntryId(self.next_id);
        self.entries.push(LogEntry::Message {
            id,
            view: build_view(message),
        });
        self.scroll_to_bottom();
        id
    }

    /// Show the typing indicator at the end of the log.
    ///
    /// An existing indicator is moved to the end instead of duplicated.
    pub fn show_typing(&mut self) {
        self.remove_typing();
        self.entries.push(LogEntry::Typing(TypingIndicator {
            avatar: Role::Bot.avatar(),
            author: BOT_NAME,
            timestamp: current_time(),
        }));
        self.scroll_to_bottom();
    }

    /// Remove the typing indicator. Returns whether one was present.
    pub fn remove_typing(&mut self) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !matches!(entry, LogEntry::Typing(_)));
        self.entries.len() != before
    }

    pub fn has_typing(&self) -> bool {
        self.typing_count() > 0
    }

    pub fn typing_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, LogEntry::Typing(_)))
            .count()
    }

    /// Append a character to a message body. Returns false if the entry is gone.
    pub fn append_char(&mut self, id: EntryId, ch: char) -> bool {
        match self.view_mut(id) {
            Some(view) => {
                view.push_char(ch);
                self.scroll_to_bottom();
                true
            }
            None => false,
        }
    }

    pub fn text_of(&self, id: EntryId) -> Option<&str> {
        self.messages()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, view)| view.body.as_str())
    }

    fn view_mut(&mut self, id: EntryId) -> Option<&mut MessageView> {
        self.entries.iter_mut().find_map(|entry| match entry {
            LogEntry::Message { id: entry_id, view } if *entry_id == id => Some(view),
            _ => None,
        })
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = (EntryId, &MessageView)> {
        self.entries.iter().filter_map(|entry| match entry {
            LogEntry::Message { id, view } => Some((*id, view)),
            LogEntry::Typing(_) => None,
        })
    }

    pub fn message_count(&self) -> usize {
        self.messages().count()
    }

    pub fn last_message(&self) -> Option<&MessageView> {
        self.messages().last().map(|(_, view)| view)
    }

    /// Remove every entry, including the typing indicator.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll_to_bottom();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_appends_in_order() {
        let mut log = ChatLog::new();
        let a = log.push(&Message::user("one"));
        let b = log.push(&Message::bot("two"));
        assert_ne!(a, b);
        assert_eq!(log.message_count(), 2);
        assert_eq!(log.text_of(a), Some("one"));
        assert_eq!(log.last_message().unwrap().body, "two");
    }

    #[test]
    fn test_push_scrolls_to_bottom() {
        let mut log = ChatLog::new();
        log.scroll_up(10);
        assert_eq!(log.scroll_back(), 10);
        log.push(&Message::user("hi"));
        assert_eq!(log.scroll_back(), 0);
    }

    #[test]
    fn test_typing_indicator_is_unique() {
        let mut log = ChatLog::new();
        log.show_typing();
        log.push(&Message::user("between"));
        log.show_typing();
        assert_eq!(log.typing_count(), 1);
        assert_eq!(log.entries().last().unwrap().id(), TYPING_INDICATOR_ID);
    }

    #[test]
    fn test_remove_typing_is_idempotent() {
        let mut log = ChatLog::new();
        assert!(!log.remove_typing());
        log.show_typing();
        assert!(log.remove_typing());
        assert!(!log.remove_typing());
        assert!(!log.has_typing());
    }

    #[test]
    fn test_append_char_to_missing_entry() {
        let mut log = ChatLog::new();
        let id = log.push(&Message::bot(""));
        log.clear();
        assert!(!log.append_char(id, 'x'));
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut log = ChatLog::new();
        log.push(&Message::user("a"));
        log.show_typing();
        log.clear();
        assert!(log.entries().is_empty());
    }
}
