//! Per-focus-mode binding tables for the chat editor.
//!
//! One `FocusMode` selects which table classifies a key event. The
//! open-editor binding is shared by both modes and always checked first.

use std::slice;

use crossterm::event::KeyEvent;
use tracing::warn;

use crate::config::{
    KeymapConfig, DEFAULT_BLUR, DEFAULT_BLURRED_SEND, DEFAULT_FOCUS, DEFAULT_OPEN_EDITOR,
    DEFAULT_SEND,
};

use super::{matches_chord, parse_key_chord, KeyChord};

/// Whether the editor currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    Focused,
    Blurred,
}

/// Logical actions the editor intercepts before the text buffer sees a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Send,
    OpenExternalEditor,
    /// Release focus back to the surrounding UI.
    Blur,
    /// Claim focus from the surrounding UI.
    Focus,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub action: EditorAction,
    pub chords: Vec<KeyChord>,
    pub help: &'static str,
}

impl Binding {
    fn new(action: EditorAction, chords: Vec<KeyChord>, help: &'static str) -> Self {
        Self {
            action,
            chords,
            help,
        }
    }

    pub fn matches(&self, key: KeyEvent) -> bool {
        self.chords.iter().any(|chord| matches_chord(key, chord))
    }

    /// Chords joined for display, e.g. `ctrl+s/enter`.
    pub fn keys_label(&self) -> String {
        self.chords
            .iter()
            .map(KeyChord::label)
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub keys: String,
    pub description: &'static str,
}

/// Keys the text area handles itself. Listed after the mode table.
const EDITING_KEYS: &[(&str, &str)] = &[
    ("enter", "new line"),
    ("backspace", "delete char"),
    ("ctrl+a/home", "line start"),
    ("end", "line end"),
    ("ctrl+k", "delete to line end"),
    ("ctrl+w", "delete word"),
];

#[derive(Debug, Clone)]
pub struct KeyBindingSet {
    open_editor: Binding,
    focused: Vec<Binding>,
    blurred: Vec<Binding>,
}

impl KeyBindingSet {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let send = chords_or_default("send", slice::from_ref(&config.send), &[DEFAULT_SEND]);
        let blurred_send =
            chords_or_default("blurred_send", &config.blurred_send, DEFAULT_BLURRED_SEND);
        let blur = chords_or_default("blur", slice::from_ref(&config.blur), &[DEFAULT_BLUR]);
        let focus = chords_or_default("focus", slice::from_ref(&config.focus), &[DEFAULT_FOCUS]);
        let open_editor = chords_or_default(
            "open_editor",
            slice::from_ref(&config.open_editor),
            &[DEFAULT_OPEN_EDITOR],
        );

        Self {
            open_editor: Binding::new(
                EditorAction::OpenExternalEditor,
                open_editor,
                "open editor",
            ),
            focused: vec![
                Binding::new(EditorAction::Send, send, "send message"),
                Binding::new(EditorAction::Blur, blur, "focus messages"),
            ],
            blurred: vec![
                Binding::new(EditorAction::Send, blurred_send, "send message"),
                Binding::new(EditorAction::Focus, focus, "focus editor"),
            ],
        }
    }

    /// Mode-specific bindings, without the shared open-editor binding.
    pub fn table(&self, mode: FocusMode) -> &[Binding] {
        match mode {
            FocusMode::Focused => &self.focused,
            FocusMode::Blurred => &self.blurred,
        }
    }

    pub fn resolve(&self, mode: FocusMode, key: KeyEvent) -> Option<EditorAction> {
        if self.open_editor.matches(key) {
            return Some(EditorAction::OpenExternalEditor);
        }
        self.table(mode)
            .iter()
            .find(|binding| binding.matches(key))
            .map(|binding| binding.action)
    }

    pub fn help(&self, mode: FocusMode) -> Vec<HelpEntry> {
        let mut bindings: Vec<&Binding> = self.table(mode).iter().collect();
        let position = match mode {
            FocusMode::Focused => 1,
            FocusMode::Blurred => bindings.len(),
        };
        bindings.insert(position, &self.open_editor);
        bindings
            .into_iter()
            .map(|binding| HelpEntry {
                keys: binding.keys_label(),
                description: binding.help,
            })
            .chain(EDITING_KEYS.iter().map(|&(keys, description)| HelpEntry {
                keys: keys.to_string(),
                description,
            }))
            .collect()
    }
}

impl Default for KeyBindingSet {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

fn chords_or_default(name: &str, values: &[String], defaults: &[&str]) -> Vec<KeyChord> {
    let parsed: Option<Vec<KeyChord>> = values
        .iter()
        .map(|value| parse_key_chord(value))
        .collect();
    match parsed {
        Some(chords) if !chords.is_empty() => chords,
        _ => {
            warn!(binding = name, ?values, "invalid key chord in config, using default");
            defaults
                .iter()
                .filter_map(|value| parse_key_chord(value))
                .collect()
        }
    }
}
