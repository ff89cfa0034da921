//! Reusable widget rendering functions.
//!
//! Pure functions that produce ratatui widgets from data.
//! No state mutation happens here.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::keymap::HelpEntry;

fn dim_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM)
}

/// Render a dashed separator line.
pub fn render_separator(frame: &mut Frame, area: Rect) {
    let separator = Paragraph::new(Line::raw(dashed_line(area.width as usize))).style(dim_style());
    frame.render_widget(separator, area);
}

fn dashed_line(width: usize) -> String {
    "- ".chars().cycle().take(width).collect()
}

/// Build a `keys description • keys description` help line.
pub fn help_line(entries: &[HelpEntry]) -> Line<'static> {
    let key_style = Style::default().fg(Color::Gray);
    let mut spans = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" • ", dim_style()));
        }
        spans.push(Span::styled(entry.keys.clone(), key_style));
        spans.push(Span::styled(format!(" {}", entry.description), dim_style()));
    }
    Line::from(spans)
}

/// Render the help line.
pub fn render_help(frame: &mut Frame, area: Rect, entries: &[HelpEntry]) {
    frame.render_widget(Paragraph::new(help_line(entries)), area);
}
