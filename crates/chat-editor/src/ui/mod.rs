//! UI rendering and layout utilities.
//!
//! This module contains pure rendering logic separated from state.
//! All functions here take data and produce ratatui widgets without
//! side effects.
//!
//! Submodules:
//! - layout: rect helpers and the chat screen split
//! - widgets: separator and help line builders

mod layout;
mod widgets;

pub use layout::{chat_layout, inset_horizontal, ChatLayout};
pub use widgets::{render_help, render_separator};
