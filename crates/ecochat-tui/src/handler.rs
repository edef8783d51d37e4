use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use crate::app::{App, FocusPane};
use crate::tui::AppEvent;

const MOUSE_SCROLL_LINES: u16 = 3;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Reply { generation, result } => app.on_reply(generation, result),
        AppEvent::Reveal { generation, ch } => app.on_reveal(generation, ch),
        AppEvent::RevealDone { generation } => app.on_reveal_done(generation),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any pane
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('l') => {
                app.clear();
                return;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Tab => {
            app.cycle_focus();
            return;
        }
        KeyCode::BackTab => {
            app.cycle_focus_back();
            return;
        }
        KeyCode::PageUp => {
            app.scroll_up(app.half_page());
            return;
        }
        KeyCode::PageDown => {
            app.scroll_down(app.half_page());
            return;
        }
        _ => {}
    }

    match app.focus {
        FocusPane::Input => handle_input(app, key),
        FocusPane::Chips => handle_chips(app, key),
        FocusPane::Channels => handle_channels(app, key),
    }
}

fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if app.session.ui.input.as_str().is_empty() {
                app.should_quit = true;
            } else {
                app.session.edit_input(|input| input.clear());
            }
        }
        // Shift+Enter never sends
        KeyCode::Enter if !key.modifiers.contains(KeyModifiers::SHIFT) => app.send(),
        KeyCode::Backspace => app.session.edit_input(|input| input.backspace()),
        KeyCode::Delete => app.session.edit_input(|input| input.delete()),
        KeyCode::Left => app.session.edit_input(|input| input.move_left()),
        KeyCode::Right => app.session.edit_input(|input| input.move_right()),
        KeyCode::Home => app.session.edit_input(|input| input.move_home()),
        KeyCode::End => app.session.edit_input(|input| input.move_end()),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::Char(c) => app.session.edit_input(|input| input.insert(c)),
        _ => {}
    }
}

fn handle_chips(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.focus = FocusPane::Input,
        KeyCode::Char('l') | KeyCode::Right => app.chip_next(),
        KeyCode::Char('h') | KeyCode::Left => app.chip_prev(),
        KeyCode::Enter => app.send_chip(),
        _ => {}
    }
}

fn handle_channels(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.focus = FocusPane::Input,
        KeyCode::Char('j') | KeyCode::Down => app.channel_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.channel_nav_up(),
        KeyCode::Enter => app.switch_to_selected_channel(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => app.scroll_down(MOUSE_SCROLL_LINES),
        _ => {}
    }
}
