use std::fmt;
use std::path::{Path, PathBuf};

/// All errors produced by the plot exporter.
#[derive(Debug)]
pub struct PlotError {
    pub kind: ErrorKind,
}

#[derive(Debug)]
pub enum ErrorKind {
    /// No embeddable-frame display capability was supplied.
    MissingCapability,
    /// The viewer HTML template could not be found.
    TemplateNotFound(PathBuf),
    /// Filesystem failure, with the path and operation that failed.
    Io {
        op: String,
        path: PathBuf,
        message: String,
    },
    /// The delegate point-cloud export failed for its own reasons.
    Export(String),
    /// General message.
    Message(String),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::MissingCapability => {
                write!(
                    f,
                    "no display capability available: supply a FrameSink to render the plot"
                )
            }
            ErrorKind::TemplateNotFound(path) => {
                write!(f, "viewer template not found: {}", path.display())
            }
            ErrorKind::Io { op, path, message } => {
                write!(f, "cannot {op} '{}': {message}", path.display())
            }
            ErrorKind::Export(msg) => write!(f, "point cloud export failed: {msg}"),
            ErrorKind::Message(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PlotError {}

pub type Result<T> = std::result::Result<T, PlotError>;

/// Shorthand constructors.
impl PlotError {
    pub fn missing_capability() -> Self {
        Self {
            kind: ErrorKind::MissingCapability,
        }
    }

    pub fn template_not_found(path: &Path) -> Self {
        Self {
            kind: ErrorKind::TemplateNotFound(path.to_path_buf()),
        }
    }

    /// Filesystem error wrapper carrying the failed operation and path.
    pub fn io(op: &str, path: &Path, err: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io {
                op: op.to_string(),
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        }
    }

    pub fn export(msg: &str) -> Self {
        Self {
            kind: ErrorKind::Export(msg.to_string()),
        }
    }

    /// General error with a message.
    pub fn message(msg: &str) -> Self {
        Self {
            kind: ErrorKind::Message(msg.to_string()),
        }
    }
}
