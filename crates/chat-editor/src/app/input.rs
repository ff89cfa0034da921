//! Input handling for the main loop.
//!
//! Host keys (quit, session switching) are checked first; everything else
//! goes to the chat editor, whose events are applied back onto `App`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{debug, error, warn};

use crate::editor::{EditorEvent, EditorMsg, TerminalHandoff};
use crate::events::AppEvent;

use super::render::editor_area;
use super::state::{App, StatusLevel};

/// Process a single event from the input thread.
pub fn handle_event(app: &mut App, event: AppEvent, terminal: &mut dyn TerminalHandoff) {
    match event {
        AppEvent::Input(key) => handle_key(app, key, terminal),
        AppEvent::Paste(text) => {
            // A paste is meant for the editor, so pull focus back first.
            if !app.editor.is_focused() {
                dispatch(app, EditorMsg::FocusRequest, terminal);
            }
            dispatch(app, EditorMsg::Paste(text), terminal);
        }
        AppEvent::Resize(width, height) => {
            let area = editor_area(app, Rect::new(0, 0, width, height));
            let msg = EditorMsg::Resize {
                width: area.width,
                height: area.height,
            };
            dispatch(app, msg, terminal);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, terminal: &mut dyn TerminalHandoff) {
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        app.should_quit = true;
        return;
    }
    if key.code == KeyCode::Char('l') && key.modifiers == KeyModifiers::CONTROL {
        app.refresh_requested = true;
        return;
    }
    if !app.editor.is_focused() && key.modifiers == KeyModifiers::NONE {
        match key.code {
            KeyCode::Tab => {
                let session = app.select_next_session();
                dispatch(app, EditorMsg::SessionSelected(session), terminal);
                return;
            }
            KeyCode::Char('q') => {
                app.should_quit = true;
                return;
            }
            _ => {}
        }
    }
    dispatch(app, EditorMsg::Key(key), terminal);
}

fn dispatch(app: &mut App, msg: EditorMsg, terminal: &mut dyn TerminalHandoff) {
    for event in app.editor.update(msg, terminal) {
        match event {
            EditorEvent::Submit(text) => app.submit(text),
            EditorEvent::FocusChanged(focused) => debug!(focused, "editor focus changed"),
            EditorEvent::Warning(message) => app.set_status(StatusLevel::Warning, message),
            EditorEvent::Error(err) => {
                if err.is_external_editor() {
                    warn!(error = %err, "external editor failed");
                } else {
                    error!(error = %err, "external editor hand-off failed");
                }
                app.set_status(StatusLevel::Error, err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::handle_event;
    use crate::app::state::{App, StatusLevel};
    use crate::config::Config;
    use crate::editor::testing::{Script, ScriptedTerminal};
    use crate::editor::{SessionId, BUSY_WARNING};
    use crate::events::AppEvent;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::TempDir;

    struct Harness {
        app: App,
        _scratch: TempDir,
    }

    impl Harness {
        fn with_busy_ms(busy_ms: u64) -> Self {
            let scratch = TempDir::new().expect("scratch dir");
            let mut config = Config::default();
            config.agent.busy_ms = busy_ms;
            config.editor.scratch_dir = Some(scratch.path().to_path_buf());
            Self {
                app: App::new(&config),
                _scratch: scratch,
            }
        }

        fn new() -> Self {
            Self::with_busy_ms(60_000)
        }

        fn event_with(&mut self, event: AppEvent, terminal: &mut ScriptedTerminal) {
            handle_event(&mut self.app, event, terminal);
        }

        fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) {
            let mut terminal = ScriptedTerminal::new(Script::SpawnError);
            self.event_with(AppEvent::Input(KeyEvent::new(code, modifiers)), &mut terminal);
        }

        fn type_str(&mut self, text: &str) {
            for ch in text.chars() {
                self.press(KeyCode::Char(ch), KeyModifiers::NONE);
            }
        }

        fn send(&mut self) {
            self.press(KeyCode::Char('s'), KeyModifiers::CONTROL);
        }

        fn transcript(&self, name: &str) -> Vec<String> {
            self.app.transcript(&SessionId::new(name)).to_vec()
        }
    }

    #[test]
    fn submit_records_message_and_starts_agent() {
        let mut h = Harness::new();
        h.type_str("hello");
        h.send();

        assert_eq!(h.transcript("general"), vec!["you: hello".to_string()]);
        assert!(h.app.editor.value().is_empty());
        assert!(!h.app.editor.is_focused());
        assert_eq!(
            h.app.output.as_ref().map(|s| s.level),
            Some(StatusLevel::Info)
        );
        assert_eq!(h.app.pending_replies, vec![SessionId::new("general")]);
    }

    #[test]
    fn busy_session_shows_warning_and_keeps_draft() {
        let mut h = Harness::new();
        h.type_str("one");
        h.send();
        h.press(KeyCode::Char('i'), KeyModifiers::NONE);
        h.type_str("two");
        h.send();

        let status = h.app.output.clone().expect("status");
        assert_eq!(status.level, StatusLevel::Warning);
        assert_eq!(status.text, BUSY_WARNING);
        assert_eq!(h.app.editor.value(), "two");
        assert_eq!(h.transcript("general").len(), 1);
    }

    #[test]
    fn switching_to_idle_session_allows_sending() {
        let mut h = Harness::new();
        h.type_str("one");
        h.send();
        h.press(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(h.app.editor.session(), &SessionId::new("research"));

        h.press(KeyCode::Char('i'), KeyModifiers::NONE);
        h.type_str("two");
        h.send();

        assert_eq!(h.transcript("research"), vec!["you: two".to_string()]);
    }

    #[test]
    fn tab_wraps_around_sessions_when_blurred() {
        let mut h = Harness::new();
        h.press(KeyCode::Esc, KeyModifiers::NONE);
        for _ in 0..3 {
            h.press(KeyCode::Tab, KeyModifiers::NONE);
        }
        assert_eq!(h.app.active_session, 0);
        assert_eq!(h.app.editor.session(), &SessionId::new("general"));
    }

    #[test]
    fn q_quits_only_when_blurred() {
        let mut h = Harness::new();
        h.type_str("q");
        assert!(!h.app.should_quit);
        assert_eq!(h.app.editor.value(), "q");

        h.press(KeyCode::Esc, KeyModifiers::NONE);
        h.press(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(h.app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_either_mode() {
        let mut h = Harness::new();
        h.press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(h.app.should_quit);
        assert!(h.app.editor.value().is_empty());
    }

    #[test]
    fn external_editor_failure_sets_error_status() {
        let mut h = Harness::new();
        let mut terminal = ScriptedTerminal::new(Script::Exit(2));
        let key = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL);
        h.event_with(AppEvent::Input(key), &mut terminal);

        let status = h.app.output.clone().expect("status");
        assert_eq!(status.level, StatusLevel::Error);
        assert!(h.transcript("general").is_empty());
    }

    #[test]
    fn external_editor_content_is_submitted() {
        let mut h = Harness::new();
        let mut terminal = ScriptedTerminal::new(Script::Write(b"first\nsecond\n".to_vec()));
        let key = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL);
        h.event_with(AppEvent::Input(key), &mut terminal);

        assert_eq!(
            h.transcript("general"),
            vec!["you: first".to_string(), "     second".to_string()]
        );
    }

    #[test]
    fn resize_sizes_editor_from_its_region() {
        let mut h = Harness::new();
        let mut terminal = ScriptedTerminal::new(Script::SpawnError);
        h.event_with(AppEvent::Resize(100, 30), &mut terminal);
        // Two columns of padding, then the prompt margin.
        assert_eq!(h.app.editor.size(), (95, 5));
    }

    #[test]
    fn paste_while_blurred_refocuses_editor() {
        let mut h = Harness::new();
        h.press(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!h.app.editor.is_focused());

        let mut terminal = ScriptedTerminal::new(Script::SpawnError);
        h.event_with(AppEvent::Paste("from clipboard".to_string()), &mut terminal);

        assert!(h.app.editor.is_focused());
        assert_eq!(h.app.editor.value(), "from clipboard");
        assert!(terminal.launched.is_empty());
    }

    #[test]
    fn paste_goes_to_focused_editor() {
        let mut h = Harness::new();
        let mut terminal = ScriptedTerminal::new(Script::SpawnError);
        h.event_with(AppEvent::Paste("pasted\ntext".to_string()), &mut terminal);
        assert_eq!(h.app.editor.value(), "pasted\ntext");
    }

    #[test]
    fn finished_task_posts_reply_on_tick() {
        let mut h = Harness::with_busy_ms(0);
        h.type_str("ping");
        h.send();
        h.app.tick();

        assert_eq!(
            h.transcript("general"),
            vec!["you: ping".to_string(), "agent: done.".to_string()]
        );
        assert!(h.app.pending_replies.is_empty());
    }
}
