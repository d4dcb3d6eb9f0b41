//! Per-read configuration.
//!
//! Every read call takes a [`ReadOptions`]: what to do at clean end of
//! input, which tag readers to consult before the built-in defaults, and an
//! optional fallback for unresolved tags. Options are plain owned values —
//! there is no global reader configuration.

use rustc_hash::FxHashMap;

use edn_util::Symbol;

use crate::value::Value;

/// Error type produced by caller-supplied tag handlers.
///
/// Handler failures are caught by the reader and wrapped into a
/// `ReaderError` with the original attached as the cause.
pub type TagError = Box<dyn std::error::Error + Send + Sync>;

/// A tag reader: one value in, one value out.
pub type TagHandler = Box<dyn Fn(Value) -> Result<Value, TagError>>;

/// The fallback handler: receives the tag and the value when no
/// tag-specific reader matched.
pub type DefaultTagHandler = Box<dyn Fn(Symbol, Value) -> Result<Value, TagError>>;

/// What a read does at clean end of input.
#[derive(Clone, Debug, Default)]
pub enum EofBehavior {
    /// Raise an end-of-input error. The default.
    #[default]
    Raise,
    /// Return the given value instead.
    Value(Value),
}

/// Configuration for one read call.
#[derive(Default)]
pub struct ReadOptions {
    /// End-of-input behavior.
    pub eof: EofBehavior,

    /// Tag readers consulted before the built-in defaults.
    pub readers: FxHashMap<Symbol, TagHandler>,

    /// Fallback for tags no reader resolves.
    pub default: Option<DefaultTagHandler>,
}

impl ReadOptions {
    /// Default options: raise at end of input, no custom readers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `value` at clean end of input instead of raising.
    pub fn with_eof_value(mut self, value: Value) -> Self {
        self.eof = EofBehavior::Value(value);
        self
    }

    /// Register a tag reader, shadowing any built-in default for that tag.
    pub fn with_reader(
        mut self,
        tag: Symbol,
        handler: impl Fn(Value) -> Result<Value, TagError> + 'static,
    ) -> Self {
        self.readers.insert(tag, Box::new(handler));
        self
    }

    /// Register the fallback handler for unresolved tags.
    pub fn with_default(
        mut self,
        handler: impl Fn(Symbol, Value) -> Result<Value, TagError> + 'static,
    ) -> Self {
        self.default = Some(Box::new(handler));
        self
    }
}
