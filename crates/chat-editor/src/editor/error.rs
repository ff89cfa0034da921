use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Failures of the external editor path. All of them are reported to the
/// host as events; none abort the application.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("could not create scratch file: {0}")]
    ScratchCreation(#[source] io::Error),
    #[error("could not start editor `{program}`: {source}")]
    ExternalEditorSpawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("editor `{program}` exited with {status}")]
    ExternalEditorExit { program: String, status: ExitStatus },
    #[error("could not read scratch file: {0}")]
    ScratchRead(#[source] io::Error),
}

impl EditorError {
    /// True for failures of the external program itself.
    pub fn is_external_editor(&self) -> bool {
        matches!(
            self,
            Self::ExternalEditorSpawn { .. } | Self::ExternalEditorExit { .. }
        )
    }
}
