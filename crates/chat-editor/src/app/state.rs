//! Application state types and core data structures.
//!
//! Defines the App struct which holds all mutable host state: the
//! sessions, their transcripts, the simulated agent and the chat editor.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::info;

use crate::agent::SimulatedAgent;
use crate::config::Config;
use crate::editor::{ChatEditor, ExternalEditorLauncher, SessionActivity, SessionId};
use crate::keymap::KeyBindingSet;

pub const SESSION_NAMES: [&str; 3] = ["general", "research", "scratch"];
pub const EDITOR_HEIGHT: u16 = 5;
pub const BOTTOM_HORIZONTAL_PADDING: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// One-line message shown above the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Main application state container.
///
/// Methods are split across input.rs (event handling) and render.rs
/// (UI drawing).
pub struct App {
    pub editor: ChatEditor,
    pub agent: Rc<SimulatedAgent>,
    pub sessions: Vec<SessionId>,
    pub active_session: usize,
    pub transcripts: HashMap<SessionId, Vec<String>>,
    /// Sessions with a task in flight that has not replied yet.
    pub pending_replies: Vec<SessionId>,
    pub output: Option<StatusMessage>,
    pub should_quit: bool,
    pub refresh_requested: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let agent = Rc::new(SimulatedAgent::new(Duration::from_millis(
            config.agent.busy_ms,
        )));
        let activity: Rc<dyn SessionActivity> = agent.clone();
        let launcher = ExternalEditorLauncher::new(&config.editor);
        let bindings = KeyBindingSet::from_config(&config.keymap);
        let sessions: Vec<SessionId> = SESSION_NAMES
            .iter()
            .map(|name| SessionId::new(*name))
            .collect();

        let mut editor = ChatEditor::new(activity, bindings, launcher);
        editor.select_session(sessions[0].clone());

        Self {
            editor,
            agent,
            sessions,
            active_session: 0,
            transcripts: HashMap::new(),
            pending_replies: Vec::new(),
            output: None,
            should_quit: false,
            refresh_requested: false,
        }
    }

    pub fn active_session(&self) -> &SessionId {
        &self.sessions[self.active_session]
    }

    pub fn transcript(&self, session: &SessionId) -> &[String] {
        self.transcripts
            .get(session)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Moves to the next session, wrapping around. The caller forwards the
    /// returned id to the editor.
    pub fn select_next_session(&mut self) -> SessionId {
        self.active_session = (self.active_session + 1) % self.sessions.len();
        self.active_session().clone()
    }

    /// Records a submitted message and starts the agent on it.
    pub fn submit(&mut self, text: String) {
        let session = self.active_session().clone();
        info!(%session, "starting agent task");
        self.transcripts
            .entry(session.clone())
            .or_default()
            .extend(text.lines().enumerate().map(|(idx, line)| {
                if idx == 0 {
                    format!("you: {line}")
                } else {
                    format!("     {line}")
                }
            }));
        self.agent.start_task(&session);
        if !self.pending_replies.contains(&session) {
            self.pending_replies.push(session);
        }
        self.set_status(StatusLevel::Info, "Message sent.");
    }

    /// Posts a reply for every session whose task has finished.
    pub fn tick(&mut self) {
        let agent = Rc::clone(&self.agent);
        let (done, still_busy): (Vec<_>, Vec<_>) = self
            .pending_replies
            .drain(..)
            .partition(|session| !agent.is_session_busy(session));
        self.pending_replies = still_busy;
        for session in done {
            self.transcripts
                .entry(session)
                .or_default()
                .push("agent: done.".to_string());
        }
    }

    /// Set the status message; blank text clears it.
    pub fn set_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        let message = message.into();
        let trimmed = message.trim();
        if trimmed.is_empty() {
            self.output = None;
        } else {
            self.output = Some(StatusMessage {
                level,
                text: trimmed.to_string(),
            });
        }
    }
}
