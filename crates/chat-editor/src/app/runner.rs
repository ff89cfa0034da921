//! Application runner and event loop.
//!
//! Handles terminal setup/teardown and the main event loop.
//! Events are read from an mpsc channel and dispatched to handlers.
//! While an external program owns the terminal the input thread is
//! parked, so every keystroke reaches that program.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info, warn};

use crate::config::{load_config, Config};
use crate::editor::TerminalHandoff;
use crate::events::AppEvent;
use crate::logging;

use super::state::App;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Redraw interval when no input arrives, so busy indicators expire.
const TICK: Duration = Duration::from_millis(250);
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Entry point: set up terminal and run the event loop.
pub fn run() -> io::Result<()> {
    let _log_guard = logging::init();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&cwd);
    info!(cwd = %cwd.display(), "chat-editor starting");

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &config);

    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableBracketedPaste)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("chat-editor stopped");
    result
}

/// Main event loop: process events until quit.
fn run_loop(terminal: &mut Tui, config: &Config) -> io::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let gate = InputGate::new();
    spawn_input_thread(event_tx, gate.clone());

    let mut app = App::new(config);
    terminal.clear()?;
    terminal.draw(|frame| super::render::render(&mut app, frame))?;

    let result = loop {
        if app.should_quit {
            break Ok(());
        }
        match event_rx.recv_timeout(TICK) {
            Ok(event) => dispatch(&mut app, event, terminal, &gate),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break Ok(()),
        }
        // Drain any pending events before redraw
        while let Ok(event) = event_rx.try_recv() {
            dispatch(&mut app, event, terminal, &gate);
        }
        app.tick();

        if app.refresh_requested {
            if let Err(err) = terminal.clear() {
                break Err(err);
            }
            app.refresh_requested = false;
        }

        if let Err(err) = terminal.draw(|frame| super::render::render(&mut app, frame)) {
            break Err(err);
        }
    };
    gate.stop();
    if !app.editor.value().trim().is_empty() {
        info!("exiting with an unsent draft");
    }
    result
}

fn dispatch(app: &mut App, event: AppEvent, terminal: &mut Tui, gate: &InputGate) {
    let mut handoff = SuspendingTerminal {
        terminal,
        input: gate,
    };
    super::input::handle_event(app, event, &mut handoff);
}

/// Spawn a thread to read terminal input events.
fn spawn_input_thread(sender: Sender<AppEvent>, gate: InputGate) {
    std::thread::spawn(move || {
        while gate.checkpoint() {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    warn!(error = %err, "terminal poll failed");
                    break;
                }
            }
            let event = match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    AppEvent::Input(key)
                }
                Ok(Event::Paste(text)) => AppEvent::Paste(text),
                Ok(Event::Resize(cols, rows)) => AppEvent::Resize(cols, rows),
                Ok(_) => continue,
                Err(err) => {
                    warn!(error = %err, "terminal read failed");
                    break;
                }
            };
            if sender.send(event).is_err() {
                break;
            }
        }
        gate.stop();
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Running,
    PauseRequested,
    Paused,
    Stopped,
}

/// Pause handshake between the main loop and the input thread.
#[derive(Clone)]
struct InputGate {
    inner: Arc<(Mutex<GateState>, Condvar)>,
}

impl InputGate {
    fn new() -> Self {
        Self {
            inner: Arc::new((Mutex::new(GateState::Running), Condvar::new())),
        }
    }

    fn state(&self) -> MutexGuard<'_, GateState> {
        self.inner
            .0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, GateState>) -> MutexGuard<'a, GateState> {
        self.inner
            .1
            .wait(guard)
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Blocks until the reader has parked (or exited).
    fn pause(&self) {
        let mut state = self.state();
        if *state != GateState::Running {
            return;
        }
        *state = GateState::PauseRequested;
        self.inner.1.notify_all();
        while *state == GateState::PauseRequested {
            state = self.wait(state);
        }
        debug!("input thread paused");
    }

    fn resume(&self) {
        let mut state = self.state();
        if matches!(*state, GateState::PauseRequested | GateState::Paused) {
            *state = GateState::Running;
            self.inner.1.notify_all();
        }
    }

    fn stop(&self) {
        *self.state() = GateState::Stopped;
        self.inner.1.notify_all();
    }

    /// Reader side. Parks while paused; false once stopped.
    fn checkpoint(&self) -> bool {
        let mut state = self.state();
        loop {
            match *state {
                GateState::Running => return true,
                GateState::Stopped => return false,
                GateState::PauseRequested => {
                    *state = GateState::Paused;
                    self.inner.1.notify_all();
                }
                GateState::Paused => {}
            }
            state = self.wait(state);
        }
    }
}

/// Hands the real terminal to a child process.
struct SuspendingTerminal<'a> {
    terminal: &'a mut Tui,
    input: &'a InputGate,
}

impl TerminalHandoff for SuspendingTerminal<'_> {
    fn run_exclusive(&mut self, command: &mut Command) -> io::Result<ExitStatus> {
        self.input.pause();
        let result =
            TerminalSuspendGuard::new(self.terminal).and_then(|_suspend| command.status());
        self.input.resume();
        result
    }
}

/// Leaves raw mode and the alternate screen; restores both on drop.
struct TerminalSuspendGuard<'a> {
    terminal: &'a mut Tui,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(terminal: &'a mut Tui) -> io::Result<Self> {
        terminal.show_cursor()?;
        disable_raw_mode()?;

        if let Err(err) = execute!(
            terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        ) {
            let _ = enable_raw_mode();
            let _ = execute!(terminal.backend_mut(), EnterAlternateScreen, EnableBracketedPaste);
            let _ = terminal.hide_cursor();
            return Err(err);
        }
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableBracketedPaste
        );
        let _ = self.terminal.clear();
        let _ = self.terminal.hide_cursor();
    }
}
