//! Tagged-literal resolution.
//!
//! Tags resolve in a fixed order: per-call readers from the options, then
//! the process-wide default registry (`inst`, `uuid`), then the per-call
//! fallback handler. Handler failures — caller-supplied functions are
//! untrusted — are caught and wrapped with the original as the cause.

use std::sync::LazyLock;

use chrono::DateTime;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use edn_util::{ReaderError, Result, Symbol};

use crate::options::{ReadOptions, TagError};
use crate::value::Value;

type BuiltinReader = fn(Value) -> std::result::Result<Value, TagError>;

/// Process-wide default tag readers. Initialized on first use.
static DEFAULT_READERS: LazyLock<FxHashMap<&'static str, BuiltinReader>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    table.insert("inst", read_inst as BuiltinReader);
    table.insert("uuid", read_uuid as BuiltinReader);
    table
});

/// Resolves `#tag value` through the registries.
pub(crate) fn resolve_tag(opts: &ReadOptions, tag: Symbol, value: Value) -> Result<Value> {
    if let Some(handler) = opts.readers.get(&tag) {
        tracing::trace!(tag = %tag, source = "options", "resolving tagged literal");
        return handler(value).map_err(|cause| wrap_handler_failure(&tag, cause));
    }

    if tag.namespace().is_none() {
        if let Some(builtin) = DEFAULT_READERS.get(tag.name()) {
            tracing::trace!(tag = %tag, source = "builtin", "resolving tagged literal");
            return builtin(value).map_err(|cause| wrap_handler_failure(&tag, cause));
        }
    }

    if let Some(fallback) = &opts.default {
        tracing::trace!(tag = %tag, source = "default", "resolving tagged literal");
        return fallback(tag.clone(), value).map_err(|cause| wrap_handler_failure(&tag, cause));
    }

    Err(ReaderError::no_tag_reader(&tag))
}

fn wrap_handler_failure(tag: &Symbol, cause: TagError) -> ReaderError {
    ReaderError::external(format!("Reader function failed for tag {}", tag), cause)
}

/// `#inst "1985-04-12T23:20:50.52Z"` — an RFC 3339 timestamp.
fn read_inst(value: Value) -> std::result::Result<Value, TagError> {
    let Value::String(text) = value else {
        return Err("inst literal expects a string".into());
    };
    let instant = DateTime::parse_from_rfc3339(&text)
        .map_err(|e| format!("invalid inst literal \"{}\": {}", text, e))?;
    Ok(Value::Inst(instant))
}

/// `#uuid "f81d4fae-7dec-11d0-a765-00a0c91e6bf6"`
fn read_uuid(value: Value) -> std::result::Result<Value, TagError> {
    let Value::String(text) = value else {
        return Err("uuid literal expects a string".into());
    };
    let uuid = Uuid::parse_str(&text).map_err(|e| format!("invalid uuid literal \"{}\": {}", text, e))?;
    Ok(Value::Uuid(uuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edn_util::ErrorKind;

    #[test]
    fn test_builtin_inst() {
        let opts = ReadOptions::new();
        let out = resolve_tag(
            &opts,
            Symbol::simple("inst"),
            Value::String("1985-04-12T23:20:50.52Z".into()),
        )
        .unwrap();
        match out {
            Value::Inst(dt) => {
                assert_eq!(dt, DateTime::parse_from_rfc3339("1985-04-12T23:20:50.52Z").unwrap());
            }
            other => panic!("expected inst, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_uuid() {
        let opts = ReadOptions::new();
        let out = resolve_tag(
            &opts,
            Symbol::simple("uuid"),
            Value::String("f81d4fae-7dec-11d0-a765-00a0c91e6bf6".into()),
        )
        .unwrap();
        assert!(matches!(out, Value::Uuid(_)));
    }

    #[test]
    fn test_builtin_inst_rejects_garbage() {
        let opts = ReadOptions::new();
        let err = resolve_tag(
            &opts,
            Symbol::simple("inst"),
            Value::String("yesterday".into()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::External);
        assert_eq!(err.message(), "Reader function failed for tag inst");
    }

    #[test]
    fn test_builtin_inst_rejects_non_string() {
        let opts = ReadOptions::new();
        let err = resolve_tag(&opts, Symbol::simple("inst"), Value::Int(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::External);
    }

    #[test]
    fn test_options_reader_shadows_builtin() {
        let opts = ReadOptions::new().with_reader(Symbol::simple("inst"), |v| {
            Ok(Value::Tagged {
                tag: Symbol::simple("shadowed"),
                value: Box::new(v),
            })
        });
        let out = resolve_tag(
            &opts,
            Symbol::simple("inst"),
            Value::String("not a timestamp".into()),
        )
        .unwrap();
        assert!(matches!(out, Value::Tagged { .. }));
    }

    #[test]
    fn test_default_handler_receives_tag() {
        let opts = ReadOptions::new().with_default(|tag, value| {
            Ok(Value::Tagged {
                tag,
                value: Box::new(value),
            })
        });
        let out = resolve_tag(&opts, Symbol::simple("point"), Value::Int(1)).unwrap();
        match out {
            Value::Tagged { tag, value } => {
                assert_eq!(tag, Symbol::simple("point"));
                assert_eq!(*value, Value::Int(1));
            }
            other => panic!("expected tagged, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_tag() {
        let opts = ReadOptions::new();
        let err = resolve_tag(&opts, Symbol::simple("point"), Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoTagReader);
        assert_eq!(err.message(), "No reader function for tag point");
    }

    #[test]
    fn test_qualified_tag_skips_builtins() {
        let opts = ReadOptions::new();
        let err = resolve_tag(
            &opts,
            Symbol::qualified("my", "inst"),
            Value::String("1985-04-12T23:20:50.52Z".into()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoTagReader);
    }

    #[test]
    fn test_handler_failure_is_wrapped() {
        let opts = ReadOptions::new().with_reader(Symbol::simple("boom"), |_| Err("exploded".into()));
        let err = resolve_tag(&opts, Symbol::simple("boom"), Value::Nil).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::External);
        assert!(std::error::Error::source(&err).is_some());
    }
}
