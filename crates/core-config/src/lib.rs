//! Configuration loading and parsing.
//!
//! Parses `kiln.toml` (or an override path provided by the binary) extracting
//! the `[editor]` table. Every key is optional and falls back to its default.
//! Unknown fields are ignored. A file that fails to parse is logged at `warn`
//! and replaced by defaults.
//!
//! The editing core never reads this crate; the binary turns a `Config` into
//! plain option values before constructing editor state.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, io, path::PathBuf, time::Duration};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "kiln.toml";
const MAX_TAB_STOP: usize = 32;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses required to quit with unsaved changes.
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u8,
    #[serde(default = "EditorConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> usize {
        8
    }
    const fn default_quit_times() -> u8 {
        3
    }
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Config path following platform conventions: the working directory first,
/// then the platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("kiln").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(target: "config", path = %path.display(), "config_not_found_using_defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading config {}", path.display()));
        }
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                source: Some(path),
                file,
            };
            cfg.normalize();
            Ok(cfg)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp values into ranges the editor can honour.
    pub fn normalize(&mut self) {
        let raw = self.file.editor.tab_stop;
        let clamped = raw.clamp(1, MAX_TAB_STOP);
        if clamped != raw {
            info!(target: "config", raw, clamped, "tab_stop_clamped");
            self.file.editor.tab_stop = clamped;
        }
    }

    pub fn tab_stop(&self) -> usize {
        self.file.editor.tab_stop
    }

    pub fn quit_times(&self) -> u8 {
        self.file.editor.quit_times
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.file.editor.message_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), text).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.tab_stop(), 8);
        assert_eq!(cfg.quit_times(), 3);
        assert_eq!(cfg.message_timeout(), Duration::from_secs(5));
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn parses_editor_table() {
        let tmp = write_config("[editor]\ntab_stop = 4\nquit_times = 1\nmessage_timeout_secs = 2\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_stop(), 4);
        assert_eq!(cfg.quit_times(), 1);
        assert_eq!(cfg.message_timeout(), Duration::from_secs(2));
        assert_eq!(cfg.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let tmp = write_config("[editor]\ntab_stop = 2\n[unknown]\nkey = 1\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.tab_stop(), 2);
        assert_eq!(cfg.quit_times(), 3);
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[editor\ntab_stop = ");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.editor, EditorConfig::default());
    }

    #[test]
    fn zero_tab_stop_is_clamped_and_logged() {
        let tmp = write_config("[editor]\ntab_stop = 0\n");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf())).unwrap());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("tab_stop_clamped"));
        assert_eq!(cfg.tab_stop(), 1);
    }
}
