use ecochat_core::session::Animation;
use ecochat_core::{
    animate, ChatClient, ChatError, ChatReply, ChatSession, Channel, Outgoing, TypewriterOptions,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    Chips,
    Channels,
}

pub struct App {
    pub should_quit: bool,
    pub focus: FocusPane,

    pub session: ChatSession,
    pub client: ChatClient,
    pub typewriter: TypewriterOptions,

    // Sidebar and chip selection
    pub channels: Vec<Channel>,
    pub channel_state: ListState,
    pub chip_idx: usize,

    pub animation_frame: u8, // 0-2 for the typing dots
    pub log_height: u16,

    pub request_task: Option<JoinHandle<()>>,
    pub animation_task: Option<JoinHandle<()>>,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        session: ChatSession,
        client: ChatClient,
        typewriter: TypewriterOptions,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        let channels = Channel::all();
        let mut channel_state = ListState::default();
        let active = channels
            .iter()
            .position(|c| c.as_str() == session.ui.active_topic)
            .unwrap_or(0);
        channel_state.select(Some(active));

        Self {
            should_quit: false,
            focus: FocusPane::Input,
            session,
            client,
            typewriter,
            channels,
            channel_state,
            chip_idx: 0,
            animation_frame: 0,
            log_height: 0,
            request_task: None,
            animation_task: None,
            events,
        }
    }

    /// Send the current input
    pub fn send(&mut self) {
        if let Some(outgoing) = self.session.begin_send() {
            self.dispatch(outgoing);
        }
    }

    /// Send the highlighted chip
    pub fn send_chip(&mut self) {
        if let Some(outgoing) = self.session.send_chip(self.chip_idx) {
            self.focus = FocusPane::Input;
            self.dispatch(outgoing);
        }
    }

    fn dispatch(&mut self, outgoing: Outgoing) {
        self.abort_animation();

        let client = self.client.clone();
        let tx = self.events.clone();
        let Outgoing { generation, message } = outgoing;
        self.request_task = Some(tokio::spawn(async move {
            let result = client.send(&message).await;
            let _ = tx.send(AppEvent::Reply { generation, result });
        }));
    }

    pub fn on_reply(&mut self, generation: u64, result: Result<ChatReply, ChatError>) {
        self.request_task = None;
        if let Some(animation) = self.session.complete_send(generation, result) {
            self.start_animation(animation);
        }
        self.refocus_when_idle();
    }

    fn start_animation(&mut self, animation: Animation) {
        self.abort_animation();

        let tx = self.events.clone();
        let options = self.typewriter;
        let Animation { generation, text, .. } = animation;
        self.animation_task = Some(tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let reveal_tx = tx.clone();
            let finished = animate(&text, options, &mut rng, |ch| {
                reveal_tx.send(AppEvent::Reveal { generation, ch }).is_ok()
            })
            .await;
            if finished {
                let _ = tx.send(AppEvent::RevealDone { generation });
            }
        }));
    }

    pub fn on_reveal(&mut self, generation: u64, ch: char) {
        if !self.session.reveal(generation, ch) {
            tracing::debug!(generation, "ignoring reveal from superseded animation");
        }
    }

    pub fn on_reveal_done(&mut self, generation: u64) {
        self.animation_task = None;
        self.session.finish_animation(generation);
        self.refocus_when_idle();
    }

    /// Hand the keyboard back to the input once a send has fully finished
    fn refocus_when_idle(&mut self) {
        if self.session.is_idle() {
            self.focus = FocusPane::Input;
        }
    }

    fn abort_animation(&mut self) {
        if let Some(task) = self.animation_task.take() {
            task.abort();
        }
    }

    /// Clear the log and drop anything in flight
    pub fn clear(&mut self) {
        self.abort_animation();
        if let Some(task) = self.request_task.take() {
            task.abort();
        }
        self.session.clear();
        self.chip_idx = 0;
    }

    /// Switch to the channel highlighted in the sidebar
    pub fn switch_to_selected_channel(&mut self) {
        if let Some(channel) = self
            .channel_state
            .selected()
            .and_then(|i| self.channels.get(i))
            .copied()
        {
            self.session.switch_topic(channel.as_str());
            self.chip_idx = 0;
            self.focus = FocusPane::Input;
        }
    }

    pub fn active_channel_idx(&self) -> Option<usize> {
        self.channels
            .iter()
            .position(|c| c.as_str() == self.session.ui.active_topic)
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.session.log().has_typing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Input => FocusPane::Chips,
            FocusPane::Chips => FocusPane::Channels,
            FocusPane::Channels => FocusPane::Input,
        };
    }

    pub fn cycle_focus_back(&mut self) {
        self.focus = match self.focus {
            FocusPane::Input => FocusPane::Channels,
            FocusPane::Chips => FocusPane::Input,
            FocusPane::Channels => FocusPane::Chips,
        };
    }

    pub fn chip_next(&mut self) {
        let len = self.session.chips().len();
        if len > 0 {
            self.chip_idx = (self.chip_idx + 1) % len;
        }
    }

    pub fn chip_prev(&mut self) {
        let len = self.session.chips().len();
        if len > 0 {
            self.chip_idx = (self.chip_idx + len - 1) % len;
        }
    }

    pub fn channel_nav_down(&mut self) {
        let len = self.channels.len();
        if len > 0 {
            let i = self.channel_state.selected().map_or(0, |i| (i + 1) % len);
            self.channel_state.select(Some(i));
        }
    }

    pub fn channel_nav_up(&mut self) {
        let len = self.channels.len();
        if len > 0 {
            let i = self
                .channel_state
                .selected()
                .map_or(0, |i| (i + len - 1) % len);
            self.channel_state.select(Some(i));
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.session.log_mut().scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.session.log_mut().scroll_down(lines);
    }

    pub fn half_page(&self) -> u16 {
        (self.log_height / 2).max(1)
    }
}
