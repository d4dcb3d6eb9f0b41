//! Lexical character classification.
//!
//! These predicates define the character classes of the grammar: what counts
//! as whitespace, which characters dispatch to macro readers, which of those
//! terminate a running token, and which characters are reserved and may not
//! appear in tokens at all.

/// Checks if a character is grammar whitespace.
///
/// Any Unicode whitespace counts, and so does `,` — commas are whitespace in
/// this grammar.
///
/// # Example
///
/// ```
/// use edn_lex::classify::is_whitespace;
///
/// assert!(is_whitespace(' '));
/// assert!(is_whitespace(','));
/// assert!(is_whitespace('\u{2028}'));
/// assert!(!is_whitespace('x'));
/// ```
#[inline]
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Checks if a character is an ASCII digit.
#[inline]
pub fn is_numeric(c: char) -> bool {
    c.is_ascii_digit()
}

/// Checks if a character has a macro reader bound to it.
///
/// # Example
///
/// ```
/// use edn_lex::classify::is_macro;
///
/// assert!(is_macro('('));
/// assert!(is_macro('#'));
/// assert!(is_macro('"'));
/// assert!(!is_macro('a'));
/// assert!(!is_macro('\''));
/// ```
#[inline]
pub fn is_macro(c: char) -> bool {
    matches!(
        c,
        '"' | ':' | ';' | '^' | '(' | ')' | '[' | ']' | '{' | '}' | '\\' | '#'
    )
}

/// Checks if a character terminates a running token.
///
/// Every macro character terminates except `#`, `'` and `:`, which may
/// appear inside a token when not leading.
///
/// # Example
///
/// ```
/// use edn_lex::classify::is_macro_terminating;
///
/// assert!(is_macro_terminating(')'));
/// assert!(is_macro_terminating('"'));
/// assert!(!is_macro_terminating('#'));
/// assert!(!is_macro_terminating(':'));
/// assert!(!is_macro_terminating('\''));
/// ```
#[inline]
pub fn is_macro_terminating(c: char) -> bool {
    is_macro(c) && !matches!(c, '#' | '\'' | ':')
}

/// Checks if a character is reserved and may not appear in a token.
#[inline]
pub fn is_not_constituent(c: char) -> bool {
    matches!(c, '@' | '`' | '~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_includes_comma() {
        assert!(is_whitespace(','));
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\t'));
        assert!(is_whitespace('\n'));
        assert!(is_whitespace('\r'));
    }

    #[test]
    fn test_whitespace_unicode() {
        assert!(is_whitespace('\u{00A0}'));
        assert!(is_whitespace('\u{2003}'));
        assert!(!is_whitespace('_'));
    }

    #[test]
    fn test_numeric() {
        assert!(is_numeric('0'));
        assert!(is_numeric('9'));
        assert!(!is_numeric('a'));
        // Only ASCII digits count, not Unicode ones.
        assert!(!is_numeric('٣'));
    }

    #[test]
    fn test_macro_table() {
        for c in ['"', ':', ';', '^', '(', ')', '[', ']', '{', '}', '\\', '#'] {
            assert!(is_macro(c), "{} should be a macro character", c);
        }
        for c in ['a', '1', '\'', '@', '-', '_'] {
            assert!(!is_macro(c), "{} should not be a macro character", c);
        }
    }

    #[test]
    fn test_macro_terminating_exceptions() {
        assert!(!is_macro_terminating('#'));
        assert!(!is_macro_terminating(':'));
        assert!(!is_macro_terminating('\''));
        assert!(is_macro_terminating(';'));
        assert!(is_macro_terminating('\\'));
        assert!(is_macro_terminating('^'));
    }

    #[test]
    fn test_not_constituent() {
        assert!(is_not_constituent('@'));
        assert!(is_not_constituent('`'));
        assert!(is_not_constituent('~'));
        assert!(!is_not_constituent('%'));
        assert!(!is_not_constituent('&'));
    }
}
