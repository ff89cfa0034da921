//! Layout utilities for rect manipulation.
//!
//! Pure functions for computing layout areas. No state mutation.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Inset a rect horizontally by padding on both sides.
pub fn inset_horizontal(area: Rect, padding: u16) -> Rect {
    if area.width <= padding * 2 {
        return area;
    }
    Rect {
        x: area.x + padding,
        width: area.width - padding * 2,
        ..area
    }
}

/// Areas of the chat screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub sessions: Rect,
    pub transcript: Rect,
    pub separator: Rect,
    pub status: Rect,
    pub editor: Rect,
    pub help: Rect,
}

/// Split the screen: session bar | transcript | separator | status | editor | help.
///
/// The transcript absorbs any shortfall, so the editor keeps its height
/// until the whole screen is smaller than the fixed rows.
pub fn chat_layout(area: Rect, status_height: u16, editor_height: u16) -> ChatLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(status_height),
            Constraint::Length(editor_height),
            Constraint::Length(1),
        ])
        .split(area);
    ChatLayout {
        sessions: chunks[0],
        transcript: chunks[1],
        separator: chunks[2],
        status: chunks[3],
        editor: chunks[4],
        help: chunks[5],
    }
}
