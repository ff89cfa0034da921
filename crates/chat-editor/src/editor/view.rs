//! Draws the prompt glyph next to the text buffer.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::buffer::TextBuffer;

pub const PROMPT_GLYPH: &str = ">";
/// Left padding plus the glyph.
const PROMPT_WIDTH: u16 = 2;

pub fn render_editor(frame: &mut Frame, area: Rect, buffer: &TextBuffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let prompt = Line::from(vec![
        Span::raw(" "),
        Span::styled(PROMPT_GLYPH, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    let prompt_area = Rect {
        width: PROMPT_WIDTH.min(area.width),
        height: 1,
        ..area
    };
    frame.render_widget(Paragraph::new(prompt), prompt_area);

    if area.width <= PROMPT_WIDTH {
        return;
    }
    let (width, height) = buffer.size();
    let text_area = Rect {
        x: area.x + PROMPT_WIDTH,
        y: area.y,
        width: width.min(area.width - PROMPT_WIDTH),
        height: height.min(area.height),
    };
    frame.render_widget(buffer.textarea(), text_area);
}
