//! Symbolic token scanning.
//!
//! A token is a run of constituent characters bounded by whitespace, a
//! macro-terminating character, or end of input. The boundary character is
//! pushed back so the caller sees it again.

use edn_util::{ReaderError, Result};

use crate::classify;
use crate::source::CharSource;

/// Reads a token whose first character has already been consumed.
///
/// `kind` names what is being read (symbol, keyword, character, ...) and
/// appears in diagnostics. With `validate_leading`, a reserved character in
/// the leading position is rejected; reserved characters inside the token
/// are always rejected. `initch` of `None` means input ended where the
/// token should have begun.
pub fn read_token(
    src: &mut dyn CharSource,
    kind: &str,
    initch: Option<char>,
    validate_leading: bool,
) -> Result<String> {
    let Some(initch) = initch else {
        return Err(ReaderError::unexpected_eof(format!(
            "Unexpected EOF while reading the start of {}",
            kind
        )));
    };

    if validate_leading && classify::is_not_constituent(initch) {
        return Err(ReaderError::lexical(format!(
            "Invalid leading character at the start of a {}",
            kind
        )));
    }

    let mut token = String::new();
    let mut ch = Some(initch);
    loop {
        match ch {
            None => break,
            Some(c) if classify::is_whitespace(c) || classify::is_macro_terminating(c) => {
                src.unread(c);
                break;
            }
            Some(c) if classify::is_not_constituent(c) => {
                return Err(ReaderError::lexical(format!(
                    "Invalid character [{}] in {} starting with [{}]",
                    c, kind, token
                )));
            }
            Some(c) => {
                token.push(c);
                ch = src.read()?;
            }
        }
    }
    Ok(token)
}
