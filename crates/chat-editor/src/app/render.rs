//! UI rendering methods.
//!
//! Layout: session bar | transcript | separator | status | editor | help.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::editor::{render_editor, SessionActivity};
use crate::keymap::{FocusMode, HelpEntry};
use crate::ui::{chat_layout, inset_horizontal, render_help, render_separator, ChatLayout};

use super::state::{App, StatusLevel, BOTTOM_HORIZONTAL_PADDING, EDITOR_HEIGHT};

pub(super) fn screen_layout(app: &App, area: Rect) -> ChatLayout {
    let status_height = u16::from(app.output.is_some());
    chat_layout(area, status_height, EDITOR_HEIGHT)
}

/// Region handed to the editor for a screen of the given size.
pub(super) fn editor_area(app: &App, area: Rect) -> Rect {
    inset_horizontal(screen_layout(app, area).editor, BOTTOM_HORIZONTAL_PADDING)
}

/// Main render entry point. Called each frame by the event loop.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let layout = screen_layout(app, area);
    let pad = |rect| inset_horizontal(rect, BOTTOM_HORIZONTAL_PADDING);

    render_session_bar(app, frame, pad(layout.sessions));
    render_transcript(app, frame, pad(layout.transcript));
    render_separator(frame, layout.separator);

    if let Some(status) = &app.output {
        let style = match status.level {
            StatusLevel::Info => Style::default().fg(Color::Gray),
            StatusLevel::Warning => Style::default().fg(Color::Yellow),
            StatusLevel::Error => Style::default().fg(Color::Red),
        };
        let line = Paragraph::new(Line::raw(status.text.clone())).style(style);
        frame.render_widget(line, pad(layout.status));
    }

    // Size the editor from this frame's geometry before drawing it.
    let editor = pad(layout.editor);
    app.editor.set_size(editor.width, editor.height);
    render_editor(frame, editor, app.editor.buffer());

    render_help(frame, pad(layout.help), &help_entries(app));
}

fn render_session_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (idx, session) in app.sessions.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if session == app.editor.session() {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {session} "), style));
        if app.agent.is_session_busy(session) {
            spans.push(Span::styled(
                "working...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_transcript(app: &App, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let transcript = app.transcript(app.active_session());
    if transcript.is_empty() {
        let empty = Paragraph::new(Line::raw("No messages yet.")).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        );
        frame.render_widget(empty, area);
        return;
    }
    let skip = transcript.len().saturating_sub(area.height as usize);
    let lines: Vec<Line> = transcript[skip..]
        .iter()
        .map(|line| Line::raw(line.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn help_entries(app: &App) -> Vec<HelpEntry> {
    let mut entries = app.editor.binding_help();
    if app.editor.focus_mode() == FocusMode::Blurred {
        entries.push(HelpEntry {
            keys: "tab".to_string(),
            description: "next session",
        });
        entries.push(HelpEntry {
            keys: "q".to_string(),
            description: "quit",
        });
    }
    entries
}
