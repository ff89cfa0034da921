//! Seams between the editor and the application hosting it.

use std::fmt;
use std::io;
use std::process::{Command, ExitStatus};

/// Opaque identifier of the conversation the editor sends into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only view of the task-execution side.
///
/// Queried on every send; implementations must answer from live state.
pub trait SessionActivity {
    fn is_session_busy(&self, session: &SessionId) -> bool;
}

/// Host capability to give a child process exclusive use of the terminal.
///
/// Implementations stop drawing and release the terminal, run `command`
/// to completion, and restore the terminal before returning, on both the
/// success and the error path.
pub trait TerminalHandoff {
    fn run_exclusive(&mut self, command: &mut Command) -> io::Result<ExitStatus>;
}
