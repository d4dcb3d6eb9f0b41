//! edn-util - Foundation Types for the EDN Reader
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the foundation types shared by the character-level
//! (`edn-lex`) and form-level (`edn-read`) layers of the reader:
//!
//! - [`pos`]: source positions (1-based line/column, optional file name),
//!   attached to errors by the outermost read entry point when the
//!   character source tracks positions.
//!
//! - [`error`]: the single error type surfaced by every reader operation.
//!   A [`error::ReaderError`] classifies the fault (lexical, unexpected end
//!   of input, unmatched delimiter, missing dispatch macro, missing tag
//!   reader, I/O, external), carries a message, optionally a position, and
//!   optionally the original cause when a non-reader fault was wrapped.
//!
//! - [`symbol`]: symbolic names. [`symbol::Symbol`] and [`symbol::Keyword`]
//!   are an optional namespace plus a name; `Symbol::parse` implements the
//!   `[ns/]name` token validation used by the symbol, keyword, tag and
//!   namespaced-map readers.
//!
//! - [`num`]: big-number value shapes. [`num::Ratio`] is a reduced rational
//!   with a positive denominator; [`num::BigDecimal`] is an unscaled
//!   integer/scale pair produced by `M`-suffixed literals. Both are thin
//!   domain types over `num-bigint`.
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. ONE ERROR TYPE
//!    Every fault the reader can produce flows through `ReaderError`, so
//!    callers match on one type and positions attach uniformly.
//!
//! 2. OWNED VALUES
//!    Names and numbers own their data. Reader state lives only for the
//!    duration of one top-level read; nothing here borrows from it.
//!
//! 3. NO PRINTING
//!    These types implement `Display` only where diagnostics need it
//!    (positions, names in error messages). Writing EDN is out of scope.

pub mod error;
pub mod num;
pub mod pos;
pub mod symbol;

pub use error::{ErrorKind, ReaderError, Result};
pub use num::{BigDecimal, Ratio, Reduced};
pub use pos::Pos;
pub use symbol::{Keyword, Symbol};
