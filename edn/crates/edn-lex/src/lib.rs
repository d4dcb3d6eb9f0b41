//! edn-lex - Character-Level Machinery for the EDN Reader
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! This crate is the character layer of the reader: everything that looks at
//! one character at a time and produces either characters, tokens, or
//! decoded literals. The form layer (`edn-read`) drives it recursively.
//!
//! PIPELINE POSITION:
//! ------------------
//! ```text
//! Source Text  →  Character Source  →  Scanners  →  Form Reader
//!   (str/IO)        (pushback,          (tokens,      (values)
//!                    positions)          literals)
//! ```
//!
//! COMPONENTS:
//! -----------
//!
//! 1. CHARACTER SOURCE ([`source`])
//!    A one-character-lookahead stream with bounded pushback. Two adapters
//!    are provided: [`source::StringSource`] over in-memory text (always
//!    position-tracking) and [`source::StreamSource`] over any `io::Read`
//!    (non-indexing unless asked). Pushback depth defaults to one
//!    character; the grammar's only two-character decision (a sign
//!    followed by a digit) is made with one read plus one peek.
//!
//! 2. LEXICAL PREDICATES ([`classify`])
//!    The character classes of the grammar. Note two quirks: `,` is
//!    whitespace, and the macro table splits into terminating and
//!    non-terminating characters — `#`, `'` and `:` may appear inside a
//!    token while the rest end it.
//!
//! 3. NUMBER SCANNER ([`number`])
//!    Accumulate-then-match: the token is gathered first (stopping at
//!    whitespace, any macro character, or end of input, with the
//!    terminator pushed back), then matched against the integer, radix,
//!    ratio and float rules in order. Integers promote to big integers on
//!    overflow or an `N` suffix; `M` floats become arbitrary-precision
//!    decimals; ratios reduce to lowest terms.
//!
//! 4. TOKEN SCANNER ([`token`])
//!    A run of constituent characters bounded by whitespace or a
//!    terminating macro character. Reserved characters (`@`, `` ` ``,
//!    `~`) are rejected wherever they appear.
//!
//! 5. STRING/CHAR SCANNERS ([`string`])
//!    String contents with the escape repertoire (`\t \r \n \\ \" \b
//!    \f`, `\uXXXX`, bounded octal), and character literals with their
//!    special names. Surrogate code points are rejected from `\uXXXX` in
//!    both.
//!
//! ERROR MODEL:
//! ------------
//! Every scanner returns `Result<_, ReaderError>` and fails fast; nothing
//! here recovers or resynchronizes. Positions are *not* attached at this
//! layer — the outermost read entry point owns that, so messages compose
//! exactly once.

pub mod classify;
pub mod number;
pub mod source;
pub mod string;
pub mod token;

mod edge_cases;

pub use number::Number;
pub use source::{CharSource, StreamSource, StringSource, DEFAULT_PUSHBACK};
