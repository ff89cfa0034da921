//! Demo host for the chat editor.
//!
//! Owns the terminal and a handful of fixed chat sessions backed by a
//! simulated agent. The editor sits at the bottom of the screen and the
//! host applies its events to the transcript and status line.
//!
//! Submodules:
//! - state: App struct and status types
//! - runner: main loop, terminal setup and hand-off to external programs
//! - input: keyboard, paste and resize handling
//! - render: UI rendering

mod input;
mod render;
mod runner;
mod state;

pub use runner::run;
