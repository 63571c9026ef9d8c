//! Kiln entrypoint.
//!
//! Startup order: parse arguments, install logging and the panic hook, load
//! configuration and the document, then enter raw mode and run the
//! refresh / read / dispatch loop until the dispatcher asks to quit. Anything
//! that fails before the loop is fatal; the terminal guard lives inside
//! `run_editor` so it has already restored the terminal when `main` reports
//! the error.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::io_ops::open_document;
use core_actions::{DocumentStore, Dispatcher, FsStore};
use core_config::{Config, load_from};
use core_input::{ByteSource, KeyDecoder};
use core_model::{EditorModel, Viewport};
use core_render::refresh_screen;
use core_state::{EditorOptions, EditorState};
use core_terminal::{CrosstermBackend, StdinBytes, TerminalBackend, window_size};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "kiln.log";
const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "kiln", version, about = "A small terminal text editor")]
struct Args {
    /// File to edit. Without it the editor starts on an empty, unnamed document.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `kiln.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Subscriber already installed; dropping the guard stops this writer.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Editing options from the resolved configuration.
fn editor_options(config: &Config) -> EditorOptions {
    EditorOptions {
        tab_stop: config.tab_stop(),
        quit_times: config.quit_times(),
        message_timeout: config.message_timeout(),
    }
}

/// Open `args.path` or start empty. A file that cannot be read is fatal.
fn load_editor_state(
    path: Option<&Path>,
    options: EditorOptions,
    store: &mut dyn DocumentStore,
) -> Result<EditorState> {
    match path {
        Some(path) => open_document(store, path, options)
            .with_context(|| format!("cannot open {}", path.display())),
        None => Ok(EditorState::new(options)),
    }
}

struct EditorRuntime<S: ByteSource, W: Write> {
    model: EditorModel,
    dispatcher: Dispatcher,
    decoder: KeyDecoder<S>,
    store: FsStore,
    out: W,
}

impl<S: ByteSource, W: Write> EditorRuntime<S, W> {
    fn run(&mut self) -> Result<()> {
        loop {
            refresh_screen(&mut self.model, &mut self.out, Instant::now())?;
            let key = self.decoder.read_key().context("reading keyboard input")?;
            let result = self
                .dispatcher
                .dispatch_key(key, &mut self.model, &mut self.store);
            if result.quit {
                info!(target: "runtime.shutdown", dirty = self.model.document().is_dirty(), "quit");
                return Ok(());
            }
        }
    }
}

fn run_editor(backend: &mut CrosstermBackend, state: EditorState, quit_times: u8) -> Result<()> {
    backend.set_title("Kiln")?;
    let guard = backend.enter_guard()?;

    let mut input = StdinBytes::new();
    let mut out = stdout();
    let size = window_size(&mut input, &mut out)?;
    info!(target: "runtime.startup", rows = size.rows, cols = size.cols, "window_size");

    let mut model = EditorModel::new(state, Viewport::for_window(size.rows, size.cols));
    model.state_mut().set_status(HELP_MESSAGE);

    let mut runtime = EditorRuntime {
        model,
        dispatcher: Dispatcher::new(quit_times),
        decoder: KeyDecoder::new(input),
        store: FsStore,
        out,
    };
    let result = runtime.run();
    guard.release()?;
    result
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let options = editor_options(&config);
    let state = load_editor_state(args.path.as_deref(), options, &mut FsStore)?;
    info!(
        target: "runtime.startup",
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        rows = state.document.num_rows(),
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        tab_stop = options.tab_stop,
        "bootstrap_complete"
    );

    let result = run_editor(&mut startup.backend, state, options.quit_times);
    if let Err(e) = &result {
        tracing::error!(target: "runtime", error = %format!("{e:#}"), "fatal");
    }
    result
}
