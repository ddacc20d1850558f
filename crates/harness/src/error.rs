//! Error types for the harness.
//!
//! Every failure a single test can hit is one of these variants. The
//! orchestrator converts them into a failed result for that test only.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while driving the toolchain or inspecting its output.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The tool binary could not be spawned at all.
    #[error("tool not found {tool} ({}): {source}", .path.display())]
    ToolNotFound {
        /// Pipeline step the tool was invoked for.
        tool: &'static str,
        /// Program path that failed to spawn.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tool ran but exited unsuccessfully.
    #[error("error {tool}: {status}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
        /// Captured standard error of the failed process.
        stderr: String,
    },

    /// The disassembly dump could not be read back.
    #[error("dump file {} not found: {source}", .path.display())]
    DumpUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no SHOULD_ALIGN_X_HERE symbols found in disassembly")]
    NoMarkers,

    /// Filesystem error on a generated artifact.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),

    /// Settings file could not be read or parsed.
    #[error("invalid settings: {0}")]
    Settings(String),
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Captured diagnostic text, when the failing tool produced any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::ToolFailed { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
