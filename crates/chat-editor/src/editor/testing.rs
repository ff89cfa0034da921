//! Test doubles for the editor's host seams.

use std::cell::Cell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::rc::Rc;

use super::host::{SessionActivity, SessionId, TerminalHandoff};

/// What the pretend editor does with the scratch file.
pub enum Script {
    /// Overwrite the file, then exit 0.
    Write(Vec<u8>),
    Exit(i32),
    SpawnError,
}

pub struct ScriptedTerminal {
    script: Script,
    pub programs: Vec<String>,
    pub launched: Vec<PathBuf>,
    pub existed_at_launch: bool,
}

impl ScriptedTerminal {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            programs: Vec::new(),
            launched: Vec::new(),
            existed_at_launch: false,
        }
    }

    pub fn single_scratch_path(&self) -> PathBuf {
        assert_eq!(self.launched.len(), 1, "expected exactly one launch");
        self.launched[0].clone()
    }
}

impl TerminalHandoff for ScriptedTerminal {
    fn run_exclusive(&mut self, command: &mut Command) -> io::Result<ExitStatus> {
        let args: Vec<PathBuf> = command.get_args().map(PathBuf::from).collect();
        assert_eq!(args.len(), 1, "editor gets exactly the scratch path");
        let path = args[0].clone();
        self.programs
            .push(command.get_program().to_string_lossy().into_owned());
        self.existed_at_launch = path.is_file();
        self.launched.push(path.clone());

        match &self.script {
            Script::Write(bytes) => {
                fs::write(&path, bytes)?;
                Ok(exit_status(0))
            }
            Script::Exit(code) => Ok(exit_status(*code)),
            Script::SpawnError => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no such editor",
            )),
        }
    }
}

/// Runs the command for real, without touching any terminal state.
pub struct PassthroughTerminal;

impl TerminalHandoff for PassthroughTerminal {
    fn run_exclusive(&mut self, command: &mut Command) -> io::Result<ExitStatus> {
        command.status()
    }
}

/// Busy flag the test flips between sends.
#[derive(Clone, Default)]
pub struct BusyFlag(Rc<Cell<bool>>);

impl BusyFlag {
    pub fn set(&self, busy: bool) {
        self.0.set(busy);
    }
}

impl SessionActivity for BusyFlag {
    fn is_session_busy(&self, _session: &SessionId) -> bool {
        self.0.get()
    }
}

#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}
