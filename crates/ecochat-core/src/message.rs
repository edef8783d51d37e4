//! Message records and the view-model built from them.
//!
//! Nothing here depends on a UI framework. The TUI (or any other front end)
//! consumes [`MessageView`]s and decides how to draw them.

use serde::{Deserialize, Serialize};

use crate::time::current_time;

pub const BOT_NAME: &str = "EcoChat";
pub const USER_NAME: &str = "You";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn avatar(&self) -> &'static str {
        match self {
            Role::User => "🙂",
            Role::Bot => "🌿",
        }
    }
}

/// A chat message as produced by a send or receive event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub author: String,
    pub role: Role,
    pub text: String,
    pub timestamp: String,
}

impl Message {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            author: BOT_NAME.to_string(),
            role: Role::Bot,
            text: text.into(),
            timestamp: current_time(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: USER_NAME.to_string(),
            role: Role::User,
            text: text.into(),
            timestamp: current_time(),
        }
    }
}

/// Display-ready form of a [`Message`]. All text fields are neutralized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub avatar: &'static str,
    pub author: String,
    pub role: Role,
    pub timestamp: String,
    pub body: String,
}

impl MessageView {
    /// Append one character of revealed text to the body.
    pub fn push_char(&mut self, ch: char) {
        push_neutralized(&mut self.body, ch);
    }
}

/// Build the view-model for a message.
pub fn build_view(message: &Message) -> MessageView {
    let timestamp = if message.timestamp.is_empty() {
        current_time()
    } else {
        neutralize(&message.timestamp)
    };

    MessageView {
        avatar: message.role.avatar(),
        author: neutralize(&message.author),
        role: message.role,
        timestamp,
        body: neutralize(&message.text),
    }
}

/// Make text safe to print on a terminal.
///
/// Escape sequences and other control characters are dropped so message text
/// can never drive the terminal. Newlines survive, tabs become spaces.
pub fn neutralize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_neutralized(&mut out, ch);
    }
    out
}

fn push_neutralized(out: &mut String, ch: char) {
    match ch {
        '\n' => out.push('\n'),
        '\t' => out.push_str("    "),
        c if c.is_control() => {}
        // Bidi overrides can reorder what the user sees
        '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' => {}
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_view_bot() {
        let msg = Message {
            author: BOT_NAME.to_string(),
            role: Role::Bot,
            text: "Hello".to_string(),
            timestamp: "09:30".to_string(),
        };
        let view = build_view(&msg);
        assert_eq!(view.avatar, "🌿");
        assert_eq!(view.author, "EcoChat");
        assert_eq!(view.timestamp, "09:30");
        assert_eq!(view.body, "Hello");
    }

    #[test]
    fn test_build_view_fills_missing_timestamp() {
        let mut msg = Message::user("hi");
        msg.timestamp.clear();
        let view = build_view(&msg);
        assert_eq!(view.avatar, "🙂");
        assert_eq!(view.timestamp.len(), 5);
    }

    #[test]
    fn test_neutralize_strips_escape_sequences() {
        let text = "\x1b[2J\x1b[31mred\x07 text";
        assert_eq!(neutralize(text), "[2J[31mred text");
    }

    #[test]
    fn test_neutralize_keeps_markup_as_plain_text() {
        let text = "<b>bold</b> & <script>x</script>";
        assert_eq!(neutralize(text), text);
    }

    #[test]
    fn test_neutralize_newlines_and_tabs() {
        assert_eq!(neutralize("a\r\n\tb"), "a\n    b");
    }

    #[test]
    fn test_push_char_neutralizes() {
        let mut view = build_view(&Message::bot(""));
        for ch in "ok\x1b!".chars() {
            view.push_char(ch);
        }
        assert_eq!(view.body, "ok!");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Bot).unwrap(), "\"bot\"");
    }
}
