//! edn-read - The EDN Reader
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! This crate is the form layer of the reader: a recursive-descent dispatch
//! loop over the character machinery in `edn-lex`, producing [`Value`]s.
//!
//! READING PIPELINE:
//! -----------------
//! ```text
//! "(1 :two #inst \"...\")"
//!        |
//!        v
//! +----------------+   peek/read/unread    +----------------------+
//! | CharSource     | <-------------------> | Dispatch loop        |
//! | (edn-lex)      |                       |  - whitespace skip   |
//! +----------------+                       |  - number start?     |
//!                                          |  - macro table       |
//!                                          |  - symbol fallback   |
//!                                          +----------------------+
//!                                              |           ^
//!                                   macro readers           | recurse
//!                                              v           |
//!                                          +----------------------+
//!                                          | string char keyword  |
//!                                          | meta list vec map set|
//!                                          | dispatch (#) tagged  |
//!                                          +----------------------+
//! ```
//!
//! THE MACRO TABLE:
//! ----------------
//! `"` string, `:` keyword, `;` comment, `^` metadata, `(`/`[`/`{` open a
//! collection, `)`/`]`/`}` are unmatched-delimiter errors, `\` character,
//! `#` consults the dispatch sub-table: `^` metadata (deprecated spelling),
//! `{` set, `_` discard, `!` comment, `<` unreadable, `:` namespaced map,
//! anything else a tagged literal.
//!
//! NON-PRODUCING READERS:
//! ----------------------
//! Comments and `#_` discard consume input and produce nothing. On the
//! internal read path that outcome is `None`; the dispatch loop and the
//! delimited-collection loop skip it and continue. It never escapes the
//! public API.
//!
//! TAGGED LITERALS:
//! ----------------
//! `#tag value` resolves through per-call readers, then the process-wide
//! defaults (`inst` → timestamp, `uuid` → UUID), then the per-call
//! fallback; an unresolved tag is an error. Handlers are caller code and
//! treated as untrusted: their failures are wrapped, with the original
//! attached as the cause.
//!
//! ERRORS AND POSITIONS:
//! ---------------------
//! Everything fails through one [`ReaderError`] type. The outermost entry
//! point attaches `line`/`column`/`file` exactly once — and only when the
//! source is indexing. All errors abort the current top-level read; the
//! reader never retries, recovers, or mutates caller state on failure.
//!
//! OWNERSHIP:
//! ----------
//! Reader state lives for one top-level read call and is owned by it.
//! Produced values own their data. A source can be read again after a
//! failed call, but the position of the failure is wherever the reader
//! stopped; the reader makes no attempt to resynchronize.

mod collections;
mod edge_cases;
mod reader;
mod tags;

pub mod options;
pub mod value;

pub use options::{DefaultTagHandler, EofBehavior, ReadOptions, TagError, TagHandler};
pub use reader::{read, read_str, read_str_with};
pub use value::Value;

// The pieces of the lower layers that appear in this crate's API surface.
pub use edn_lex::{CharSource, StreamSource, StringSource};
pub use edn_util::{BigDecimal, ErrorKind, Keyword, Pos, Ratio, ReaderError, Result, Symbol};
