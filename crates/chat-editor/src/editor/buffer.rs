//! Multi-line text buffer owned by the chat editor.
//!
//! Wraps `tui_textarea::TextArea` for editing and cursor handling and
//! tracks the viewport geometry and focus styling the editor assigns.

use crossterm::event::KeyEvent;
use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

pub struct TextBuffer {
    textarea: TextArea<'static>,
    focused: bool,
    width: u16,
    height: u16,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            textarea: new_textarea(),
            focused: false,
            width: 0,
            height: 0,
        }
    }

    /// Content with lines joined by `\n`.
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Drops content and cursor position; focus and geometry are kept.
    pub fn reset(&mut self) {
        self.textarea = new_textarea();
        self.apply_cursor_style();
    }

    pub fn set_value(&mut self, text: &str) {
        self.reset();
        self.textarea.insert_str(text);
    }

    pub fn insert_str(&mut self, text: &str) -> bool {
        if !self.focused {
            return false;
        }
        self.textarea.insert_str(text)
    }

    /// Applies the text area's own editing keys. Ignored while blurred.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        self.textarea.input(key)
    }

    /// Shows the blinking cursor.
    pub fn focus(&mut self) {
        self.focused = true;
        self.apply_cursor_style();
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.apply_cursor_style();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    fn apply_cursor_style(&mut self) {
        let style = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::SLOW_BLINK)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(style);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn new_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    // No undo history.
    textarea.set_max_histories(0);
    textarea.set_cursor_line_style(Style::default());
    textarea
}
