use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    CorpusNotFound,
    ConfigParseError,
    NodeNotFound,
    InvalidParameter,
    CorpusReadFailed,
    ExportWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CorpusNotFound => "E1001",
            Self::ConfigParseError => "E1002",
            Self::NodeNotFound => "E2001",
            Self::InvalidParameter => "E2002",
            Self::CorpusReadFailed => "E3001",
            Self::ExportWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CorpusNotFound => "Corpus root not found",
            Self::ConfigParseError => "Config file parse error",
            Self::NodeNotFound => "Node not found",
            Self::InvalidParameter => "Invalid parameter",
            Self::CorpusReadFailed => "Corpus read failed",
            Self::ExportWriteFailed => "Export write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::CorpusNotFound => Some("Pass the directory containing your notes as ROOT."),
            Self::ConfigParseError => Some("Fix syntax in notegraph.toml and retry."),
            Self::NodeNotFound => {
                Some("Use the note path relative to ROOT without its extension, e.g. `notes/rust`.")
            }
            Self::InvalidParameter => None,
            Self::CorpusReadFailed => Some("Check read permissions on the corpus directory."),
            Self::ExportWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures while locating or walking a corpus directory.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus root does not exist: {0}")]
    RootMissing(PathBuf),

    #[error("corpus root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to walk corpus directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CorpusError {
    /// Map the failure onto its stable [`ErrorCode`].
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RootMissing(_) | Self::NotADirectory(_) => ErrorCode::CorpusNotFound,
            Self::Walk(_) => ErrorCode::CorpusReadFailed,
        }
    }
}
