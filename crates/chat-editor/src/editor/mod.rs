//! Chat input control.
//!
//! `ChatEditor` is a two-state machine (focused / blurred) around a
//! multi-line text buffer. The host feeds it `EditorMsg`s and gets back
//! `EditorEvent`s; sending and opening the external editor are both
//! refused while the current session is busy.
//!
//! Submodules:
//! - buffer: the text area and its geometry
//! - launcher: external editor hand-off through a scratch file
//! - size: region size to buffer geometry
//! - view: prompt glyph plus buffer rendering
//! - host: traits the host implements

mod buffer;
mod error;
mod host;
mod launcher;
mod size;
#[cfg(test)]
pub(crate) mod testing;
mod view;

use std::rc::Rc;

use crossterm::event::KeyEvent;
use tracing::{debug, info, warn};

use crate::keymap::{EditorAction, FocusMode, HelpEntry, KeyBindingSet};

pub use buffer::TextBuffer;
pub use error::EditorError;
pub use host::{SessionActivity, SessionId, TerminalHandoff};
pub use launcher::ExternalEditorLauncher;
pub use size::negotiate;
pub use view::render_editor;

pub const BUSY_WARNING: &str = "Agent is working, please wait...";

/// Inbound messages from the host.
#[derive(Debug, Clone)]
pub enum EditorMsg {
    Key(KeyEvent),
    Paste(String),
    Resize { width: u16, height: u16 },
    SessionSelected(SessionId),
    FocusRequest,
}

/// Outbound notifications for the host.
#[derive(Debug)]
pub enum EditorEvent {
    Submit(String),
    FocusChanged(bool),
    Warning(String),
    Error(EditorError),
}

pub struct ChatEditor {
    session: SessionId,
    buffer: TextBuffer,
    bindings: KeyBindingSet,
    launcher: ExternalEditorLauncher,
    activity: Rc<dyn SessionActivity>,
}

impl ChatEditor {
    /// Starts focused, with no session selected.
    pub fn new(
        activity: Rc<dyn SessionActivity>,
        bindings: KeyBindingSet,
        launcher: ExternalEditorLauncher,
    ) -> Self {
        let mut buffer = TextBuffer::new();
        buffer.focus();
        Self {
            session: SessionId::default(),
            buffer,
            bindings,
            launcher,
            activity,
        }
    }

    pub fn update(
        &mut self,
        msg: EditorMsg,
        terminal: &mut dyn TerminalHandoff,
    ) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        match msg {
            EditorMsg::Key(key) => self.handle_key(key, terminal, &mut events),
            EditorMsg::Paste(text) => {
                self.buffer.insert_str(&text);
            }
            EditorMsg::Resize { width, height } => self.set_size(width, height),
            EditorMsg::SessionSelected(session) => self.select_session(session),
            EditorMsg::FocusRequest => self.focus(&mut events),
        }
        events
    }

    /// Switches the session whose busy state gates sending. The draft is kept.
    pub fn select_session(&mut self, session: SessionId) {
        if session != self.session {
            debug!(from = %self.session, to = %session, "session selected");
            self.session = session;
        }
    }

    /// Takes the host's region size for the editor.
    pub fn set_size(&mut self, width: u16, height: u16) {
        let (width, height) = negotiate(width, height);
        self.buffer.set_size(width, height);
    }

    #[cfg(test)]
    pub fn size(&self) -> (u16, u16) {
        self.buffer.size()
    }

    pub fn focus_mode(&self) -> FocusMode {
        if self.buffer.is_focused() {
            FocusMode::Focused
        } else {
            FocusMode::Blurred
        }
    }

    pub fn is_focused(&self) -> bool {
        self.buffer.is_focused()
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn value(&self) -> String {
        self.buffer.value()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Help entries for the bindings active in the current mode.
    pub fn binding_help(&self) -> Vec<HelpEntry> {
        self.bindings.help(self.focus_mode())
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        terminal: &mut dyn TerminalHandoff,
        events: &mut Vec<EditorEvent>,
    ) {
        match self.bindings.resolve(self.focus_mode(), key) {
            Some(EditorAction::OpenExternalEditor) => self.open_external_editor(terminal, events),
            Some(EditorAction::Send) => self.send(events),
            Some(EditorAction::Blur) => self.blur(events),
            Some(EditorAction::Focus) => self.focus(events),
            None => {
                self.buffer.input(key);
            }
        }
    }

    fn session_busy(&self) -> bool {
        self.activity.is_session_busy(&self.session)
    }

    fn send(&mut self, events: &mut Vec<EditorEvent>) {
        if self.session_busy() {
            warn!(session = %self.session, "send refused, session busy");
            events.push(EditorEvent::Warning(BUSY_WARNING.to_string()));
            return;
        }

        let value = self.buffer.value();
        let text = value.trim();
        if text.is_empty() {
            return;
        }
        let text = text.to_string();

        self.buffer.reset();
        self.blur(events);
        info!(session = %self.session, chars = text.chars().count(), "message submitted");
        events.push(EditorEvent::Submit(text));
    }

    fn open_external_editor(
        &mut self,
        terminal: &mut dyn TerminalHandoff,
        events: &mut Vec<EditorEvent>,
    ) {
        if self.session_busy() {
            warn!(session = %self.session, "external editor refused, session busy");
            events.push(EditorEvent::Warning(BUSY_WARNING.to_string()));
            return;
        }

        match self.launcher.launch(terminal) {
            Ok(content) => {
                // Nothing written keeps the in-progress draft.
                if content.trim().is_empty() {
                    return;
                }
                if self.session_busy() {
                    // Busy again after the editor closed: keep both texts.
                    warn!(session = %self.session, "external editor result held, session busy");
                    let draft = self.buffer.value();
                    let merged = if draft.trim().is_empty() {
                        content
                    } else {
                        format!("{draft}\n{content}")
                    };
                    self.buffer.set_value(&merged);
                    events.push(EditorEvent::Warning(BUSY_WARNING.to_string()));
                    return;
                }
                self.buffer.set_value(&content);
                self.send(events);
            }
            Err(err) => events.push(EditorEvent::Error(err)),
        }
    }

    fn focus(&mut self, events: &mut Vec<EditorEvent>) {
        if self.buffer.is_focused() {
            return;
        }
        self.buffer.focus();
        debug!("editor focused");
        events.push(EditorEvent::FocusChanged(true));
    }

    fn blur(&mut self, events: &mut Vec<EditorEvent>) {
        if !self.buffer.is_focused() {
            return;
        }
        self.buffer.blur();
        debug!("editor blurred");
        events.push(EditorEvent::FocusChanged(false));
    }
}
