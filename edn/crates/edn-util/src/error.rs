//! Reader error type.
//!
//! Every failure produced inside the reader is a [`ReaderError`]: a kind, a
//! message, and an optional source position. The position is attached once,
//! at the outermost read entry point, and only when the character source is
//! indexing. Non-reader faults (I/O, caller-supplied tag handlers) are
//! wrapped with the original attached as the cause.

use std::error::Error;
use std::fmt;

use thiserror::Error as ThisError;

use crate::pos::Pos;

/// Classification of reader failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token, invalid escape, invalid digit for a base, duplicate
    /// map key or set element, odd map form count, invalid metadata, and
    /// other character-level or form-level syntax faults.
    Lexical,

    /// End of input inside a string, character literal, collection,
    /// dispatch form, or token.
    UnexpectedEof,

    /// A stray closing delimiter (`)`, `]`, `}`).
    UnmatchedDelimiter,

    /// `#x` where `x` is neither a registered dispatch character nor a
    /// valid tag start.
    NoDispatchMacro,

    /// A tagged literal whose tag resolves to no reader function.
    NoTagReader,

    /// An I/O fault from the underlying character source.
    Io,

    /// A failure raised by a caller-supplied tag handler.
    External,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::UnexpectedEof => "unexpected end of input",
            ErrorKind::UnmatchedDelimiter => "unmatched delimiter",
            ErrorKind::NoDispatchMacro => "no dispatch macro",
            ErrorKind::NoTagReader => "no tag reader",
            ErrorKind::Io => "io error",
            ErrorKind::External => "external error",
        };
        f.write_str(name)
    }
}

/// An error raised while reading EDN.
///
/// Carries the failure classification, a human-readable message, the source
/// position when the source was indexing, fault-specific payloads (the
/// offending character for unmatched delimiters, the starting line of the
/// open collection for end-of-input faults), and the original cause when a
/// non-reader fault was wrapped.
#[derive(Debug, ThisError)]
#[error("{}", self.render())]
pub struct ReaderError {
    kind: ErrorKind,
    message: String,
    pos: Option<Pos>,
    delimiter: Option<char>,
    start_line: Option<u32>,
    #[source]
    cause: Option<Box<dyn Error + Send + Sync>>,
}

/// Result type alias using [`ReaderError`].
pub type Result<T> = std::result::Result<T, ReaderError>;

impl ReaderError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            pos: None,
            delimiter: None,
            start_line: None,
            cause: None,
        }
    }

    /// A form-level or character-level syntax fault.
    pub fn lexical(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lexical, message)
    }

    /// End of input where more was required.
    pub fn unexpected_eof(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedEof, message)
    }

    /// A stray closing delimiter. The offending character is retained and
    /// queryable through [`ReaderError::delimiter`].
    pub fn unmatched_delimiter(delimiter: char) -> Self {
        let mut err = Self::new(
            ErrorKind::UnmatchedDelimiter,
            format!("Unmatched delimiter: {}", delimiter),
        );
        err.delimiter = Some(delimiter);
        err
    }

    /// `#x` with no dispatch entry and no plausible tag.
    pub fn no_dispatch(ch: char) -> Self {
        Self::new(
            ErrorKind::NoDispatchMacro,
            format!("No dispatch macro for: {}", ch),
        )
    }

    /// A dispatch form whose tag position does not hold a valid tag.
    pub fn bad_reader_tag(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoDispatchMacro, message)
    }

    /// A tag with no resolvable reader function.
    pub fn no_tag_reader(tag: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::NoTagReader,
            format!("No reader function for tag {}", tag),
        )
    }

    /// A failure from a caller-supplied tag handler, with the original
    /// attached as the cause.
    pub fn external(message: impl Into<String>, cause: Box<dyn Error + Send + Sync>) -> Self {
        let mut err = Self::new(ErrorKind::External, message);
        err.cause = Some(cause);
        err
    }

    /// Attach the source position. Used once, by the outermost entry point.
    pub fn with_pos(mut self, pos: Pos) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Attach the starting line of the collection that was open when end of
    /// input was reached.
    pub fn with_start_line(mut self, line: u32) -> Self {
        self.start_line = Some(line);
        self
    }

    /// The failure classification.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message, without position decoration.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The position, when one was attached.
    #[inline]
    pub fn pos(&self) -> Option<&Pos> {
        self.pos.as_ref()
    }

    /// The offending character of an unmatched-delimiter fault.
    #[inline]
    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    /// The starting line of the collection left open by an end-of-input
    /// fault.
    #[inline]
    pub fn start_line(&self) -> Option<u32> {
        self.start_line
    }

    fn render(&self) -> String {
        match &self.pos {
            Some(pos) => format!("{} [at {}]", self.message, pos),
            None => self.message.clone(),
        }
    }
}

impl From<std::io::Error> for ReaderError {
    fn from(err: std::io::Error) -> Self {
        let mut out = Self::new(ErrorKind::Io, format!("IO error: {}", err));
        out.cause = Some(Box::new(err));
        out
    }
}
