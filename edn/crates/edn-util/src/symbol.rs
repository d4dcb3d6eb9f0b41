//! Symbolic names.
//!
//! [`Symbol`] and [`Keyword`] share one shape: an optional namespace and a
//! name. [`Symbol::parse`] implements the `[ns/]name` token rules used by
//! both the symbol and keyword readers.

use std::fmt;

/// A symbol: an optional namespace plus a name.
///
/// A symbol never begins with `:`. Construction through [`Symbol::parse`]
/// enforces the token rules; the direct constructors are for callers that
/// already hold validated parts.
///
/// # Examples
///
/// ```
/// use edn_util::symbol::Symbol;
///
/// let plain = Symbol::parse("foo").unwrap();
/// assert_eq!(plain.name(), "foo");
/// assert!(plain.namespace().is_none());
///
/// let qualified = Symbol::parse("my.ns/foo").unwrap();
/// assert_eq!(qualified.namespace(), Some("my.ns"));
/// assert_eq!(qualified.name(), "foo");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    ns: Option<String>,
    name: String,
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Symbol {
    /// Create a symbol with no namespace.
    #[inline]
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            ns: None,
            name: name.into(),
        }
    }

    /// Create a namespace-qualified symbol.
    #[inline]
    pub fn qualified(ns: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ns: Some(ns.into()),
            name: name.into(),
        }
    }

    /// Parse a token as `[ns/]name`.
    ///
    /// Returns `None` when the token is malformed:
    ///
    /// - empty, ends with `:`, or starts with `::`;
    /// - namespace part present but empty, or ending with `:`;
    /// - name part empty, starting with a digit (when qualified), or
    ///   containing a second `/` (the name `/` itself is allowed);
    /// - token starts with `/` but is not the lone symbol `/`.
    pub fn parse(token: &str) -> Option<Symbol> {
        if token.is_empty() || token.ends_with(':') || token.starts_with("::") {
            return None;
        }

        match token.find('/') {
            Some(idx) if idx > 0 => {
                let ns = &token[..idx];
                let name = &token[idx + 1..];
                if name.is_empty() || ns.ends_with(':') {
                    return None;
                }
                if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                    return None;
                }
                if name != "/" && name.contains('/') {
                    return None;
                }
                Some(Symbol::qualified(ns, name))
            }
            _ => {
                // A leading '/' is only valid as the lone symbol "/".
                if token == "/" || !token.contains('/') {
                    Some(Symbol::simple(token))
                } else {
                    None
                }
            }
        }
    }

    /// The namespace part, when qualified.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    /// The name part.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the namespace part, keeping the name.
    pub fn with_namespace(&self, ns: Option<&str>) -> Symbol {
        Symbol {
            ns: ns.map(str::to_string),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ns {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A keyword: an optional namespace plus a name, printed with a leading `:`.
///
/// A keyword always begins with exactly one colon in source; the colon is
/// not part of the stored name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword {
    ns: Option<String>,
    name: String,
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Keyword {
    /// Create a keyword with no namespace.
    #[inline]
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            ns: None,
            name: name.into(),
        }
    }

    /// Create a namespace-qualified keyword.
    #[inline]
    pub fn qualified(ns: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ns: Some(ns.into()),
            name: name.into(),
        }
    }

    /// The namespace part, when qualified.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    /// The name part, without the leading colon.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the namespace part, keeping the name.
    pub fn with_namespace(&self, ns: Option<&str>) -> Keyword {
        Keyword {
            ns: ns.map(str::to_string),
            name: self.name.clone(),
        }
    }
}

impl From<Symbol> for Keyword {
    fn from(sym: Symbol) -> Self {
        Self {
            ns: sym.ns,
            name: sym.name,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ns {
            Some(ns) => write!(f, ":{}/{}", ns, self.name),
            None => write!(f, ":{}", self.name),
        }
    }
}
