//! Hands the draft off to an external editor program.
//!
//! A fresh `msg_*.md` scratch file is created for every launch, the
//! program runs with exclusive use of the terminal, and the file is
//! removed again whatever the outcome.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempPath;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;

use super::error::EditorError;
use super::host::TerminalHandoff;

pub const DEFAULT_EDITOR: &str = "nvim";
const EDITOR_ENV: &str = "EDITOR";
const SCRATCH_PREFIX: &str = "msg_";
const SCRATCH_SUFFIX: &str = ".md";

#[derive(Debug, Clone)]
pub struct ExternalEditorLauncher {
    fallback_program: Option<String>,
    scratch_dir: PathBuf,
}

impl ExternalEditorLauncher {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            fallback_program: config.command.clone(),
            scratch_dir: config.scratch_dir.clone().unwrap_or_else(env::temp_dir),
        }
    }

    #[cfg(test)]
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// `$EDITOR`, then the configured command, then `nvim`. Read on every
    /// launch so a changed environment takes effect immediately.
    pub fn program(&self) -> String {
        env::var(EDITOR_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.fallback_program.clone())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }

    /// Runs the editor and returns what it left in the scratch file.
    pub fn launch(&self, terminal: &mut dyn TerminalHandoff) -> Result<String, EditorError> {
        let program = self.program();
        let scratch = create_scratch(&self.scratch_dir)?;
        info!(%program, path = %scratch.display(), "launching external editor");

        let result = run_editor(&program, &scratch, terminal);

        let path = scratch.to_path_buf();
        if let Err(err) = scratch.close() {
            warn!(path = %path.display(), %err, "failed to remove scratch file");
        }
        match &result {
            Ok(content) => debug!(bytes = content.len(), "external editor finished"),
            Err(err) => warn!(%err, "external editor failed"),
        }
        result
    }
}

fn create_scratch(dir: &Path) -> Result<TempPath, EditorError> {
    let file = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .suffix(SCRATCH_SUFFIX)
        .tempfile_in(dir)
        .map_err(EditorError::ScratchCreation)?;
    // Close our handle so the editor is the only writer.
    Ok(file.into_temp_path())
}

fn run_editor(
    program: &str,
    path: &Path,
    terminal: &mut dyn TerminalHandoff,
) -> Result<String, EditorError> {
    let mut command = Command::new(program);
    command
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let status = terminal
        .run_exclusive(&mut command)
        .map_err(|source| EditorError::ExternalEditorSpawn {
            program: program.to_string(),
            source,
        })?;
    if !status.success() {
        return Err(EditorError::ExternalEditorExit {
            program: program.to_string(),
            status,
        });
    }

    fs::read_to_string(path).map_err(EditorError::ScratchRead)
}
