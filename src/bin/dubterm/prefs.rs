//! Saved preferences under `~/.config/dubterm/config.toml`.
//!
//! Loaded once at startup and merged beneath CLI flags, so a flag always wins
//! over a saved value. The theme picked with Ctrl+T and the server the
//! session actually used are written back when the session ends.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use dubterm::log_debug;

use crate::theme::Theme;

const PREFS_FILE: &str = "config.toml";
pub(crate) const CONFIG_DIR_ENV: &str = "DUBTERM_CONFIG_DIR";

/// Preferences that survive across sessions. Unknown keys are ignored so
/// older builds can read files written by newer ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub(crate) struct SavedPrefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) server: Option<String>,
}

/// `DUBTERM_CONFIG_DIR` redirects the whole directory, mainly for tests.
fn prefs_dir() -> Option<PathBuf> {
    match env::var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Some(PathBuf::from(dir.trim())),
        _ => dirs::config_dir().map(|base| base.join("dubterm")),
    }
}

pub(crate) fn prefs_path() -> Option<PathBuf> {
    Some(prefs_dir()?.join(PREFS_FILE))
}

/// Read saved preferences; any failure quietly yields the empty set.
pub(crate) fn load_prefs() -> SavedPrefs {
    let Some(path) = prefs_path() else {
        return SavedPrefs::default();
    };
    let Ok(text) = fs::read_to_string(&path) else {
        return SavedPrefs::default();
    };
    toml::from_str(&text).unwrap_or_else(|err| {
        log_debug(&format!(
            "ignoring unparsable prefs at {}: {err}",
            path.display()
        ));
        SavedPrefs::default()
    })
}

/// Write preferences back, logging instead of failing: losing a saved theme
/// must never take down an exiting session.
pub(crate) fn save_prefs(prefs: &SavedPrefs) {
    if let Err(why) = try_save(prefs) {
        log_debug(&format!("prefs not saved: {why}"));
    }
}

fn try_save(prefs: &SavedPrefs) -> Result<(), String> {
    let path = prefs_path().ok_or("no config directory on this system")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("create {}: {err}", parent.display()))?;
    }
    let doc = toml::to_string(prefs).map_err(|err| err.to_string())?;
    let doc =
        format!("# dubterm saved preferences\n# CLI flags override these values.\n\n{doc}");
    fs::write(&path, doc).map_err(|err| format!("write {}: {err}", path.display()))
}

/// Capture the current runtime choices for persistence.
pub(crate) fn snapshot(theme: Theme, server: &str) -> SavedPrefs {
    SavedPrefs {
        theme: Some(theme.to_string()),
        server: Some(server.to_string()),
    }
}

/// Serializes tests that redirect the config dir through the env override.
#[cfg(test)]
pub(crate) fn env_lock() -> &'static std::sync::Mutex<()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    &LOCK
}
