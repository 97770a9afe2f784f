//! Error types for the PDF decoder.
//!
//! Every error carries a `kind` and, where meaningful, a byte offset into the
//! document that produced it. Most error kinds are recoverable at a higher
//! level (see the module docs on `document` and `resolver` for the
//! propagation policy); this module only defines the vocabulary.

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds produced by the PDF decoder.
///
/// The kind names mirror the component that raised them, not a specific
/// Rust type: `Lex` and `Parse` both originate from tokenizing/assembling a
/// single object and are usually absorbed into a null value rather than
/// propagated to the caller of `open`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Lexer failure: unexpected EOF or a malformed literal at `offset`.
    #[error("lex error at byte {offset}: {message}")]
    Lex {
        /// Byte offset where the failure occurred.
        offset: usize,
        /// Human-readable description.
        message: String,
    },

    /// Object parser failure: tokens did not assemble into a valid value.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset where the failure occurred.
        offset: usize,
        /// Human-readable description.
        message: String,
    },

    /// Cross-reference table/stream could not be located or parsed, and
    /// reconstruction also failed to find any objects.
    #[error("xref error: {0}")]
    Xref(String),

    /// Password verification failed, or an unsupported security handler
    /// revision was encountered.
    #[error("encryption error: {0}")]
    Crypt(String),

    /// A stream filter failed to decode its input.
    #[error("filter error: {0}")]
    Filter(String),

    /// Object resolution failed (cycle, wrong type at an expected position).
    #[error("resolve error: {0}")]
    Resolve(String),

    /// Content-stream interpretation error (unbalanced operators etc.).
    /// Per policy this is almost always absorbed into a warning; this
    /// variant exists for the cases that cannot be.
    #[error("interpreter error: {0}")]
    Interp(String),

    /// Font or CMap resolution error.
    #[error("font error: {0}")]
    Font(String),

    /// A feature is recognized but intentionally unimplemented (e.g. a
    /// security handler revision, or a filter the core does not decode).
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Underlying I/O failure on the byte source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Construct a `Lex` error.
    pub fn lex(offset: usize, message: impl Into<String>) -> Self {
        Error::Lex { offset, message: message.into() }
    }

    /// Construct a `Parse` error.
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Error::Parse { offset, message: message.into() }
    }

    /// Byte offset associated with this error, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Lex { offset, .. } | Error::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// A non-fatal diagnostic recorded on the document or a page during parsing
/// or interpretation. Warnings never interrupt iteration (§7).
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    /// Byte offset the warning pertains to, if known.
    pub offset: Option<usize>,
    /// Human-readable message.
    pub message: String,
}

impl Warning {
    /// Build a warning with a known byte offset.
    pub fn at(offset: usize, message: impl Into<String>) -> Self {
        Warning { offset: Some(offset), message: message.into() }
    }

    /// Build a warning with no associated offset.
    pub fn new(message: impl Into<String>) -> Self {
        Warning { offset: None, message: message.into() }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(o) => write!(f, "warning at byte {o}: {}", self.message),
            None => write!(f, "warning: {}", self.message),
        }
    }
}
