//! Chat session: the send lifecycle and the channel switcher.
//!
//! A [`ChatSession`] owns all UI state. Front ends feed it events and act on
//! what it returns: [`ChatSession::begin_send`] yields the request to issue,
//! [`ChatSession::complete_send`] yields the reply animation to run. Every
//! send and every clear starts a new generation; results tagged with an older
//! generation are ignored.

use crate::chips::{chips_for_topic, Channel, Chip, DEFAULT_CHIPS};
use crate::client::{ChatError, ChatReply};
use crate::input::InputLine;
use crate::log::{ChatLog, EntryId};
use crate::message::Message;

pub const WELCOME_TEXT: &str = "Hey! Welcome to #general. Ask me anything about climate change, pollution, recycling, or sustainable living.";
pub const FRESH_START_TEXT: &str = "Fresh start! Ask me anything eco-related 🙂";
pub const APOLOGY_TEXT: &str = "Sorry — I hit an error. Try again?";
pub const CONNECTIVITY_TEXT: &str =
    "I’m having trouble connecting right now. Can you try again in a sec?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMode {
    #[default]
    Online,
    Typing,
}

impl StatusMode {
    pub fn label(&self) -> &'static str {
        match self {
            StatusMode::Online => "Online",
            StatusMode::Typing => "Typing…",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingReply,
    Animating(EntryId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub input: InputLine,
    pub input_enabled: bool,
    pub send_enabled: bool,
    pub status: StatusMode,
    pub active_topic: String,
    pub title: String,
    pub placeholder: String,
}

impl Default for UiState {
    fn default() -> Self {
        let name = Channel::General.display_name();
        Self {
            input: InputLine::new(),
            input_enabled: true,
            send_enabled: false,
            status: StatusMode::Online,
            active_topic: Channel::General.as_str().to_string(),
            title: name.to_string(),
            placeholder: format!("Message #{}", name),
        }
    }
}

/// A message that should be posted to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub generation: u64,
    pub message: String,
}

/// A reply waiting to be revealed into its log slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub generation: u64,
    pub slot: EntryId,
    pub text: String,
}

#[derive(Debug)]
pub struct ChatSession {
    pub ui: UiState,
    log: ChatLog,
    chips: &'static [Chip],
    generation: u64,
    phase: Phase,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Fresh session on `#general` with the welcome message.
    pub fn new() -> Self {
        let mut log = ChatLog::new();
        log.push(&Message::bot(WELCOME_TEXT));

        Self {
            ui: UiState::default(),
            log,
            chips: DEFAULT_CHIPS,
            generation: 0,
            phase: Phase::Idle,
        }
    }

    /// Fresh session that starts on `topic`.
    pub fn with_topic(topic: &str) -> Self {
        let mut session = Self::new();
        if Channel::from_key(topic) != Some(Channel::General) {
            session.switch_topic(topic);
        }
        session
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ChatLog {
        &mut self.log
    }

    pub fn chips(&self) -> &'static [Chip] {
        self.chips
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Apply an edit to the input line if it is enabled.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut InputLine)) {
        if !self.ui.input_enabled {
            return;
        }
        edit(&mut self.ui.input);
        self.refresh_send_enabled();
    }

    fn refresh_send_enabled(&mut self) {
        self.ui.send_enabled = self.ui.input_enabled && !self.ui.input.is_blank();
    }

    /// Start sending whatever is in the input.
    ///
    /// Returns `None` (and changes nothing) when the input is blank or a send
    /// is already in progress.
    pub fn begin_send(&mut self) -> Option<Outgoing> {
        if !self.is_idle() || !self.ui.input_enabled {
            return None;
        }
        let message = self.ui.input.as_str().trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.generation += 1;
        self.phase = Phase::AwaitingReply;
        self.ui.input_enabled = false;
        self.ui.send_enabled = false;

        self.log.push(&Message::user(message.clone()));
        self.ui.input.clear();

        self.ui.status = StatusMode::Typing;
        self.log.show_typing();

        tracing::info!(generation = self.generation, "sending chat message");
        Some(Outgoing {
            generation: self.generation,
            message,
        })
    }

    /// Put a chip's prompt in the input and send it.
    pub fn send_chip(&mut self, index: usize) -> Option<Outgoing> {
        if !self.is_idle() || !self.ui.input_enabled {
            return None;
        }
        let text = self.chips.get(index)?.text;
        self.edit_input(|input| input.set(text));
        self.begin_send()
    }

    /// Handle the backend result for a send.
    ///
    /// Returns the animation to run when the reply has text to reveal.
    /// Otherwise the session is already back to idle.
    pub fn complete_send(
        &mut self,
        generation: u64,
        result: Result<ChatReply, ChatError>,
    ) -> Option<Animation> {
        if generation != self.generation || self.phase != Phase::AwaitingReply {
            tracing::debug!(generation, current = self.generation, "dropping stale reply");
            return None;
        }

        self.log.remove_typing();

        match result {
            Ok(reply) if reply.success => {
                let text = reply.response.unwrap_or_default();
                let slot = self.log.push(&Message::bot(""));
                if text.is_empty() {
                    self.finish();
                    return None;
                }
                self.phase = Phase::Animating(slot);
                Some(Animation {
                    generation,
                    slot,
                    text,
                })
            }
            Ok(reply) => {
                self.log.push(&Message::bot(APOLOGY_TEXT));
                tracing::error!(
                    error = reply.error.as_deref().unwrap_or("unknown"),
                    "chat backend reported failure"
                );
                self.finish();
                None
            }
            Err(err) => {
                self.log.push(&Message::bot(CONNECTIVITY_TEXT));
                tracing::error!(error = %err, "network error");
                self.finish();
                None
            }
        }
    }

    /// Reveal one character of the current reply. Returns false once the
    /// animation has been superseded.
    pub fn reveal(&mut self, generation: u64, ch: char) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.phase {
            Phase::Animating(slot) => self.log.append_char(slot, ch),
            _ => false,
        }
    }

    pub fn finish_animation(&mut self, generation: u64) {
        if generation == self.generation && matches!(self.phase, Phase::Animating(_)) {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Idle;
        self.ui.status = StatusMode::Online;
        self.ui.input_enabled = true;
        self.refresh_send_enabled();
    }

    /// Switch the active channel.
    pub fn switch_topic(&mut self, topic: &str) {
        let channel = Channel::from_key(topic);
        let name = channel
            .map(|c| c.display_name().to_string())
            .unwrap_or_else(|| topic.to_string());

        self.ui.active_topic = channel
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| topic.to_string());
        self.ui.title = name.clone();
        self.ui.placeholder = format!("Message #{}", name);

        self.log.push(&Message::bot(format!(
            "Switched to #{}. What do you want to talk about here?",
            name
        )));
        self.chips = chips_for_topic(topic);
        tracing::debug!(topic = %self.ui.active_topic, "switched channel");
    }

    /// Wipe the log, cancel anything in flight and start over.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.log.clear();
        self.log.push(&Message::bot(FRESH_START_TEXT));
        self.chips = DEFAULT_CHIPS;
        self.finish();
    }
}
