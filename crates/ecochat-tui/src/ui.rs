use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use ecochat_core::{LogEntry, MessageView, Role, StatusMode, TypingIndicator};
use crate::app::{App, FocusPane};

const SIDEBAR_WIDTH: u16 = 18;

/// Wrap text to fit within a given width, returning multiple lines.
/// Explicit newlines are kept; long words are split.
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Hard-split words longer than a full line
            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current_line));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let word_len = word.len();
            if word_len == 0 {
                continue;
            }
            let word: String = word.into_iter().collect();

            if current_len == 0 {
                current_line = word;
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current_line.push(' ');
                current_line.push_str(&word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::replace(&mut current_line, word));
                current_len = word_len;
            }
        }

        lines.push(current_line);
    }

    lines
}

fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Cyan,
        Role::Bot => Color::Green,
    }
}

fn header_line<'a>(avatar: &'a str, author: &'a str, role: Role, timestamp: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(avatar),
        Span::raw(" "),
        Span::styled(
            author,
            Style::default().fg(role_color(role)).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(timestamp, Style::default().fg(Color::DarkGray)),
    ])
}

fn message_lines(view: &MessageView, width: usize) -> Vec<Line<'_>> {
    let mut lines = vec![header_line(view.avatar, &view.author, view.role, &view.timestamp)];
    // Body is indented under the avatar
    let body_width = width.saturating_sub(3);
    for line in wrap_text_to_width(&view.body, body_width) {
        lines.push(Line::from(format!("   {}", line)));
    }
    lines.push(Line::default());
    lines
}

fn typing_lines(indicator: &TypingIndicator, frame: u8) -> Vec<Line<'_>> {
    let dots: Vec<Span> = (0..3u8)
        .map(|i| {
            let style = if i == frame {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(if i == frame { "● " } else { "• " }, style)
        })
        .collect();

    let mut body = vec![Span::raw("   ")];
    body.extend(dots);

    vec![
        header_line(indicator.avatar, indicator.author, Role::Bot, &indicator.timestamp),
        Line::from(body),
        Line::default(),
    ]
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [sidebar_area, main_area] = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    let [header_area, log_area, chips_area, input_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(main_area);

    render_channels(app, frame, sidebar_area);
    render_header(app, frame, header_area);
    render_log(app, frame, log_area);
    render_chips(app, frame, chips_area);
    render_input(app, frame, input_area);
    render_help(app, frame, help_area);
}

fn render_channels(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Channels;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let active_idx = app.active_channel_idx();

    let items: Vec<ListItem> = app
        .channels
        .iter()
        .enumerate()
        .map(|(i, channel)| {
            let style = if Some(i) == active_idx {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!("# {}", channel.display_name()), style))
        })
        .collect();

    let mut list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Channels "),
    );
    if focused {
        list = list
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
    }

    frame.render_stateful_widget(list, area, &mut app.channel_state);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let ui = &app.session.ui;
    let dot_color = match ui.status {
        StatusMode::Online => Color::Green,
        StatusMode::Typing => Color::Yellow,
    };

    let line = Line::from(vec![
        Span::styled(
            format!("# {}", ui.title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::styled(ui.status.label(), Style::default().fg(Color::Gray)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" EcoChat "),
    );
    frame.render_widget(header, area);
}

fn render_log(app: &mut App, frame: &mut Frame, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2);
    app.log_height = inner_height;

    let mut lines: Vec<Line> = Vec::new();
    for entry in app.session.log().entries() {
        match entry {
            LogEntry::Message { view, .. } => lines.extend(message_lines(view, inner_width)),
            LogEntry::Typing(indicator) => lines.extend(typing_lines(indicator, app.animation_frame)),
        }
    }

    let (offset, max_back) =
        scroll_window(lines.len(), inner_height, app.session.log().scroll_back());
    let scroll_back = max_back - offset;

    let title = if scroll_back > 0 {
        format!(" Messages (↑{} lines, PgDn to follow) ", scroll_back)
    } else {
        " Messages ".to_string()
    };

    let log = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        )
        .scroll((offset, 0));
    frame.render_widget(log, area);

    if app.session.log().scroll_back() > max_back {
        let excess = app.session.log().scroll_back() - max_back;
        app.scroll_down(excess);
    }
}

/// Top offset into the log and the furthest the view can scroll back.
///
/// Scrolling is bottom-anchored: `scroll_back` counts lines up from the end.
/// Line counts past `u16::MAX` saturate.
fn scroll_window(total_lines: usize, height: u16, scroll_back: u16) -> (u16, u16) {
    let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
    let max_back = total.saturating_sub(height);
    let offset = max_back - scroll_back.min(max_back);
    (offset, max_back)
}

fn render_chips(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Chips;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let mut spans = Vec::new();
    for (i, chip) in app.session.chips().iter().enumerate() {
        let style = if focused && i == app.chip_idx {
            Style::default().bg(Color::Green).fg(Color::Black).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        spans.push(Span::styled(format!("[ {} ]", chip.label), style));
        spans.push(Span::raw(" "));
    }

    let chips = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Suggestions (Tab to focus) "),
    );
    frame.render_widget(chips, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let ui = &app.session.ui;
    let focused = app.focus == FocusPane::Input;
    let border_color = if !ui.input_enabled {
        Color::DarkGray
    } else if focused {
        Color::Yellow
    } else {
        Color::Gray
    };

    let title = if ui.input_enabled {
        " Message "
    } else {
        " Waiting for reply… "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    // Calculate visible portion of input with horizontal scrolling
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = ui.input.cursor();
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let paragraph = if ui.input.as_str().is_empty() {
        Paragraph::new(Span::styled(
            ui.placeholder.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let visible_text: String = ui
            .input
            .as_str()
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        let style = if ui.input_enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Paragraph::new(visible_text).style(style)
    };

    frame.render_widget(paragraph.block(block), area);

    if focused && ui.input_enabled {
        let x = area.x + 1 + (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_help(app: &App, frame: &mut Frame, area: Rect) {
    let send_style = if app.session.ui.send_enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(" Enter send ", send_style),
        Span::styled(
            "│ Tab focus │ PgUp/PgDn scroll │ Ctrl+L clear │ Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_newlines() {
        assert_eq!(wrap_text_to_width("a b\nc", 10), vec!["a b", "c"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text_to_width("reduce reuse recycle", 12),
            vec!["reduce reuse", "recycle"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_text_to_width("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_empty_body_is_one_line() {
        assert_eq!(wrap_text_to_width("", 10), vec![String::new()]);
    }

    #[test]
    fn test_scroll_window_follows_bottom() {
        assert_eq!(scroll_window(30, 10, 0), (20, 20));
        assert_eq!(scroll_window(30, 10, 5), (15, 20));
        assert_eq!(scroll_window(30, 10, 99), (0, 20));
        assert_eq!(scroll_window(4, 10, 3), (0, 0));
    }

    #[test]
    fn test_scroll_window_saturates_huge_logs() {
        // 70_000 as u16 would wrap to 4_464
        assert_eq!(scroll_window(70_000, 10, 0), (u16::MAX - 10, u16::MAX - 10));
        assert_eq!(scroll_window(70_000, 10, 100), (u16::MAX - 110, u16::MAX - 10));
    }
}
