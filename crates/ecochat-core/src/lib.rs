pub mod chips;
pub mod client;
pub mod config;
pub mod input;
pub mod log;
pub mod message;
pub mod session;
pub mod time;
pub mod typewriter;

// Re-export main types for convenience
pub use chips::{chips_for_topic, Channel, Chip, DEFAULT_CHIPS};
pub use client::{ChatClient, ChatError, ChatReply};
pub use config::Config;
pub use input::InputLine;
pub use log::{ChatLog, EntryId, LogEntry, TypingIndicator};
pub use message::{build_view, Message, MessageView, Role};
pub use session::{Animation, ChatSession, Outgoing, Phase, StatusMode, UiState};
pub use time::current_time;
pub use typewriter::{animate, TypewriterOptions};
