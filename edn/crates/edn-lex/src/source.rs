//! Character sources.
//!
//! This module provides the [`CharSource`] trait: a one-character-lookahead
//! stream with pushback and optional line/column/file tracking, plus the two
//! adapters the reader ships with — [`StringSource`] over in-memory text and
//! [`StreamSource`] over any byte stream.
//!
//! Position tracking is a capability, not a given: indexing sources answer
//! [`CharSource::pos`] with `Some`, non-indexing sources with `None`, and
//! the outermost read entry point uses that to decide whether errors carry
//! positions.

use std::io::{self, Read};

use edn_util::{Pos, ReaderError, Result};

/// A pushbackable character stream.
///
/// `read` consumes the next character; at end of input it returns `None`
/// once and thereafter stably. `peek` observes without consuming. `unread`
/// pushes a character back into the stream; the pushback buffer is bounded
/// (default depth 1), and only the most recently read character is
/// guaranteed to be restorable.
pub trait CharSource {
    /// Consume and return the next character, or `None` at end of input.
    fn read(&mut self) -> Result<Option<char>>;

    /// Return the next character without consuming it.
    fn peek(&mut self) -> Result<Option<char>>;

    /// Push one character back into the stream.
    ///
    /// # Panics
    ///
    /// Panics when the pushback buffer is full.
    fn unread(&mut self, ch: char);

    /// Current position, or `None` for non-indexing sources.
    fn pos(&self) -> Option<Pos>;

    /// Whether this source tracks positions.
    fn is_indexing(&self) -> bool {
        self.pos().is_some()
    }

    /// Current line (1-based), on indexing sources.
    fn line(&self) -> Option<u32> {
        self.pos().map(|p| p.line)
    }

    /// Current column (1-based), on indexing sources.
    fn column(&self) -> Option<u32> {
        self.pos().map(|p| p.column)
    }

    /// The file name, when the source carries one.
    fn file(&self) -> Option<String> {
        self.pos().and_then(|p| p.file)
    }
}

/// Line/column bookkeeping shared by the indexing adapters.
///
/// Column is 1-based and advances once per character. Line increments after
/// `\n`, so `\r\n` counts as one terminator. One step of rewind across a
/// line terminator is supported, which is all the bounded pushback needs.
#[derive(Clone, Copy, Debug)]
struct Tracker {
    line: u32,
    column: u32,
    prev_column: u32,
}

impl Tracker {
    fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            prev_column: 1,
        }
    }

    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.prev_column = self.column;
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn retreat(&mut self, ch: char) {
        if ch == '\n' {
            self.line -= 1;
            self.column = self.prev_column;
        } else {
            self.column -= 1;
        }
    }
}

/// Default pushback buffer depth.
pub const DEFAULT_PUSHBACK: usize = 1;

/// An indexing character source over in-memory text.
///
/// # Examples
///
/// ```
/// use edn_lex::source::{CharSource, StringSource};
///
/// let mut src = StringSource::new("ab");
/// assert_eq!(src.read().unwrap(), Some('a'));
/// assert_eq!(src.peek().unwrap(), Some('b'));
/// src.unread('a');
/// assert_eq!(src.read().unwrap(), Some('a'));
/// assert_eq!(src.read().unwrap(), Some('b'));
/// assert_eq!(src.read().unwrap(), None);
/// assert_eq!(src.read().unwrap(), None);
/// ```
pub struct StringSource {
    chars: Vec<char>,
    index: usize,
    pushback: Vec<char>,
    depth: usize,
    tracker: Tracker,
    file: Option<String>,
}

impl StringSource {
    /// Create a source over the given text.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
            pushback: Vec::new(),
            depth: DEFAULT_PUSHBACK,
            tracker: Tracker::new(),
            file: None,
        }
    }

    /// Attach a file name reported in positions.
    pub fn with_file(mut self, name: impl Into<String>) -> Self {
        self.file = Some(name.into());
        self
    }

    /// Extend the pushback buffer beyond the default single character.
    pub fn with_pushback_depth(mut self, depth: usize) -> Self {
        self.depth = depth.max(1);
        self
    }
}

impl CharSource for StringSource {
    fn read(&mut self) -> Result<Option<char>> {
        let ch = if let Some(ch) = self.pushback.pop() {
            Some(ch)
        } else if self.index < self.chars.len() {
            let ch = self.chars[self.index];
            self.index += 1;
            Some(ch)
        } else {
            None
        };
        if let Some(ch) = ch {
            self.tracker.advance(ch);
        }
        Ok(ch)
    }

    fn peek(&mut self) -> Result<Option<char>> {
        if let Some(&ch) = self.pushback.last() {
            return Ok(Some(ch));
        }
        Ok(self.chars.get(self.index).copied())
    }

    fn unread(&mut self, ch: char) {
        assert!(
            self.pushback.len() < self.depth,
            "pushback buffer overflow (depth {})",
            self.depth
        );
        self.pushback.push(ch);
        self.tracker.retreat(ch);
    }

    fn pos(&self) -> Option<Pos> {
        Some(Pos {
            line: self.tracker.line,
            column: self.tracker.column,
            file: self.file.clone(),
        })
    }
}

/// A character source over any byte stream, decoding UTF-8 incrementally.
///
/// Non-indexing by default; [`StreamSource::indexing`] (or attaching a file
/// name) turns position tracking on. The underlying stream is never closed
/// by the reader; dropping the source drops the reader's borrow only.
pub struct StreamSource<R> {
    inner: R,
    pushback: Vec<char>,
    depth: usize,
    eof: bool,
    tracker: Option<Tracker>,
    file: Option<String>,
}

impl<R: Read> StreamSource<R> {
    /// Create a non-indexing source over the given stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushback: Vec::new(),
            depth: DEFAULT_PUSHBACK,
            eof: false,
            tracker: None,
            file: None,
        }
    }

    /// Create an indexing source over the given stream.
    pub fn indexing(inner: R) -> Self {
        let mut src = Self::new(inner);
        src.tracker = Some(Tracker::new());
        src
    }

    /// Attach a file name reported in positions. Implies indexing.
    pub fn with_file(mut self, name: impl Into<String>) -> Self {
        if self.tracker.is_none() {
            self.tracker = Some(Tracker::new());
        }
        self.file = Some(name.into());
        self
    }

    /// Extend the pushback buffer beyond the default single character.
    pub fn with_pushback_depth(mut self, depth: usize) -> Self {
        self.depth = depth.max(1);
        self
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReaderError::from(e)),
            }
        }
    }

    /// Decode one UTF-8 character from the stream.
    fn next_char(&mut self) -> Result<Option<char>> {
        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };
        if first < 0x80 {
            return Ok(Some(first as char));
        }

        let width = match first {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(invalid_utf8()),
        };

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.next_byte()? {
                Some(b) if (0x80..=0xBF).contains(&b) => *slot = b,
                _ => return Err(invalid_utf8()),
            }
        }

        match std::str::from_utf8(&bytes[..width]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => Err(invalid_utf8()),
        }
    }
}

fn invalid_utf8() -> ReaderError {
    ReaderError::from(io::Error::new(
        io::ErrorKind::InvalidData,
        "stream did not contain valid UTF-8",
    ))
}

impl<R: Read> CharSource for StreamSource<R> {
    fn read(&mut self) -> Result<Option<char>> {
        let ch = if let Some(ch) = self.pushback.pop() {
            Some(ch)
        } else if self.eof {
            None
        } else {
            let ch = self.next_char()?;
            if ch.is_none() {
                self.eof = true;
            }
            ch
        };
        if let (Some(ch), Some(tracker)) = (ch, self.tracker.as_mut()) {
            tracker.advance(ch);
        }
        Ok(ch)
    }

    fn peek(&mut self) -> Result<Option<char>> {
        if let Some(&ch) = self.pushback.last() {
            return Ok(Some(ch));
        }
        match self.read()? {
            Some(ch) => {
                self.unread(ch);
                Ok(Some(ch))
            }
            None => Ok(None),
        }
    }

    fn unread(&mut self, ch: char) {
        assert!(
            self.pushback.len() < self.depth,
            "pushback buffer overflow (depth {})",
            self.depth
        );
        self.pushback.push(ch);
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.retreat(ch);
        }
    }

    fn pos(&self) -> Option<Pos> {
        self.tracker.map(|tracker| Pos {
            line: tracker.line,
            column: tracker.column,
            file: self.file.clone(),
        })
    }
}
