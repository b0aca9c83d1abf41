//! Progress and failure reporting
//!
//! The file updater and the run pipeline report through [`UpdateLogger`]
//! instead of a global logger, so tests can capture every message.

use std::cell::{Cell, RefCell};
use std::io::Write;

use tracing::{error, info, warn};

/// Sink for progress notes, recoverable warnings and failures.
///
/// `set_failed` marks the invocation as failed; it does not stop the caller.
pub trait UpdateLogger {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn set_failed(&self, message: &str);
}

/// Reporter used by the binary.
///
/// Logs through `tracing` and, inside a GitHub Actions runner, also emits
/// workflow command annotations so warnings and errors show up on the run.
#[derive(Debug, Default)]
pub struct ActionReporter {
    annotations: bool,
    failed: Cell<bool>,
}

impl ActionReporter {
    pub fn new(annotations: bool) -> Self {
        Self {
            annotations,
            failed: Cell::new(false),
        }
    }

    /// Enable annotations when `GITHUB_ACTIONS=true`
    pub fn from_env() -> Self {
        let in_actions = std::env::var("GITHUB_ACTIONS")
            .map(|v| v == "true")
            .unwrap_or(false);
        Self::new(in_actions)
    }

    pub fn has_failed(&self) -> bool {
        self.failed.get()
    }

    fn annotate(&self, command: &str, message: &str) {
        if !self.annotations {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", workflow_command(command, message)) {
            warn!("Failed to write workflow command: {}", e);
        }
    }
}

impl UpdateLogger for ActionReporter {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warning(&self, message: &str) {
        warn!("{}", message);
        self.annotate("warning", message);
    }

    fn set_failed(&self, message: &str) {
        self.failed.set(true);
        error!("{}", message);
        self.annotate("error", message);
    }
}

/// Format `::command::message` with the runner's data escaping.
pub fn workflow_command(command: &str, message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::{}::{}", command, escaped)
}

/// Logger that keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingLogger {
    infos: RefCell<Vec<String>>,
    warnings: RefCell<Vec<String>>,
    failures: RefCell<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }
}

impl UpdateLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn set_failed(&self, message: &str) {
        self.failures.borrow_mut().push(message.to_string());
    }
}
