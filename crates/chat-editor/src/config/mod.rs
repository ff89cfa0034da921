//! Configuration loading and merging.
//!
//! Config is loaded from two sources with workspace taking precedence:
//! 1. User-level: `$XDG_CONFIG_HOME/chat-editor/config.toml`
//!    (falls back to `~/.config/chat-editor/config.toml`)
//! 2. Workspace-level: `<cwd>/.config/chat-editor/config.toml`
//!
//! Supports keymap customization, the fallback external editor and
//! scratch directory, and the simulated agent's busy window. Uses TOML
//! format with serde. Unreadable or malformed files are ignored.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

pub(crate) const DEFAULT_SEND: &str = "ctrl+s";
pub(crate) const DEFAULT_BLURRED_SEND: &[&str] = &["ctrl+s", "enter"];
pub(crate) const DEFAULT_BLUR: &str = "esc";
pub(crate) const DEFAULT_FOCUS: &str = "i";
pub(crate) const DEFAULT_OPEN_EDITOR: &str = "ctrl+e";
const DEFAULT_AGENT_BUSY_MS: u64 = 3000;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub keymap: KeymapConfig,
    pub editor: EditorConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapConfig {
    pub send: String,
    pub blurred_send: Vec<String>,
    pub blur: String,
    pub focus: String,
    pub open_editor: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            send: DEFAULT_SEND.to_string(),
            blurred_send: DEFAULT_BLURRED_SEND
                .iter()
                .map(|chord| chord.to_string())
                .collect(),
            blur: DEFAULT_BLUR.to_string(),
            focus: DEFAULT_FOCUS.to_string(),
            open_editor: DEFAULT_OPEN_EDITOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorConfig {
    /// Used when `$EDITOR` is unset.
    pub command: Option<String>,
    /// Directory for scratch files; the system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub busy_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            busy_ms: DEFAULT_AGENT_BUSY_MS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    keymap: Option<RawKeymap>,
    editor: Option<RawEditor>,
    agent: Option<RawAgent>,
}

#[derive(Debug, Default, Deserialize)]
struct RawKeymap {
    send: Option<String>,
    #[serde(alias = "blurredSend")]
    blurred_send: Option<Vec<String>>,
    blur: Option<String>,
    focus: Option<String>,
    #[serde(alias = "openEditor")]
    open_editor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEditor {
    command: Option<String>,
    #[serde(alias = "scratchDir")]
    scratch_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAgent {
    #[serde(alias = "busyMs")]
    busy_ms: Option<u64>,
}

fn read_toml(path: &Path) -> Option<RawConfig> {
    let contents = fs::read_to_string(path).ok()?;
    if contents.trim().is_empty() {
        return None;
    }
    match toml::from_str::<RawConfig>(&contents) {
        Ok(raw) => Some(raw),
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring malformed config");
            None
        }
    }
}

fn merge_config(user: Option<RawConfig>, workspace: Option<RawConfig>) -> Config {
    let workspace_keymap = workspace.as_ref().and_then(|c| c.keymap.as_ref());
    let user_keymap = user.as_ref().and_then(|c| c.keymap.as_ref());
    let defaults = KeymapConfig::default();
    let send = workspace_keymap
        .and_then(|k| k.send.clone())
        .or_else(|| user_keymap.and_then(|k| k.send.clone()))
        .unwrap_or(defaults.send);
    let blurred_send = workspace_keymap
        .and_then(|k| k.blurred_send.clone())
        .or_else(|| user_keymap.and_then(|k| k.blurred_send.clone()))
        .unwrap_or(defaults.blurred_send);
    let blur = workspace_keymap
        .and_then(|k| k.blur.clone())
        .or_else(|| user_keymap.and_then(|k| k.blur.clone()))
        .unwrap_or(defaults.blur);
    let focus = workspace_keymap
        .and_then(|k| k.focus.clone())
        .or_else(|| user_keymap.and_then(|k| k.focus.clone()))
        .unwrap_or(defaults.focus);
    let open_editor = workspace_keymap
        .and_then(|k| k.open_editor.clone())
        .or_else(|| user_keymap.and_then(|k| k.open_editor.clone()))
        .unwrap_or(defaults.open_editor);

    let workspace_editor = workspace.as_ref().and_then(|c| c.editor.as_ref());
    let user_editor = user.as_ref().and_then(|c| c.editor.as_ref());
    let command = workspace_editor
        .and_then(|e| e.command.clone())
        .or_else(|| user_editor.and_then(|e| e.command.clone()))
        .filter(|command| !command.trim().is_empty());
    let scratch_dir = workspace_editor
        .and_then(|e| e.scratch_dir.clone())
        .or_else(|| user_editor.and_then(|e| e.scratch_dir.clone()))
        .map(PathBuf::from);

    let workspace_agent = workspace.as_ref().and_then(|c| c.agent.as_ref());
    let user_agent = user.as_ref().and_then(|c| c.agent.as_ref());
    let busy_ms = workspace_agent
        .and_then(|a| a.busy_ms)
        .or_else(|| user_agent.and_then(|a| a.busy_ms))
        .unwrap_or(DEFAULT_AGENT_BUSY_MS);

    Config {
        keymap: KeymapConfig {
            send,
            blurred_send,
            blur,
            focus,
            open_editor,
        },
        editor: EditorConfig {
            command,
            scratch_dir,
        },
        agent: AgentConfig { busy_ms },
    }
}

fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    let home = dirs::home_dir()?;
    Some(home.join(".config"))
}

pub fn user_config_path() -> Option<PathBuf> {
    Some(config_dir()?.join("chat-editor").join("config.toml"))
}

pub fn workspace_config_path(root: &Path) -> PathBuf {
    root.join(".config").join("chat-editor").join("config.toml")
}

pub fn load_config(root: &Path) -> Config {
    let workspace_config = read_toml(&workspace_config_path(root));
    let user_config = user_config_path().and_then(|path| read_toml(&path));

    merge_config(user_config, workspace_config)
}
