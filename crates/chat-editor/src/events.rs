//! Application event types.
//!
//! Sent from the terminal input thread to the main loop over an mpsc
//! channel and processed sequentially.

use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum AppEvent {
    Input(KeyEvent),
    Paste(String),
    Resize(u16, u16),
}
