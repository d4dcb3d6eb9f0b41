//! Collection readers.
//!
//! All delimited forms run through one shared loop that records the
//! starting line, skips whitespace, dispatches macros, and drops the
//! no-value outcomes of comments and discards. The specializations
//! enforce the per-collection invariants: even form counts for maps,
//! uniqueness for map keys and set elements, and namespace rewriting for
//! namespaced maps.

use indexmap::{IndexMap, IndexSet};

use edn_lex::classify;
use edn_lex::token::read_token;
use edn_util::{ReaderError, Result, Symbol};

use crate::reader::Reader;
use crate::value::Value;

impl<'s, 'o> Reader<'s, 'o> {
    /// The shared delimited-read loop: accumulates forms until `close`.
    pub(crate) fn read_delimited(&mut self, kind: &str, close: char) -> Result<Vec<Value>> {
        let start_line = self.src.line();
        let mut items = Vec::new();

        loop {
            let Some(ch) = self.read_skipping_whitespace()? else {
                return Err(eof_delimited(kind, start_line));
            };

            if ch == close {
                return Ok(items);
            }

            if classify::is_macro(ch) {
                if let Some(value) = self.run_macro(ch)? {
                    items.push(value);
                }
                continue;
            }

            // Numbers and symbols both route back through the dispatch
            // loop; push the character back first.
            self.src.unread(ch);
            if let Some(value) = self.read_next(true)? {
                items.push(value);
            }
        }
    }

    pub(crate) fn read_map(&mut self) -> Result<Value> {
        let items = self.read_delimited("map", '}')?;
        build_map(items).map(Value::Map)
    }

    pub(crate) fn read_set(&mut self) -> Result<Value> {
        let items = self.read_delimited("set", '}')?;
        let mut set = IndexSet::with_capacity(items.len());
        for item in items {
            if set.contains(&item) {
                return Err(ReaderError::lexical(format!("Duplicate key: {:?}", item)));
            }
            set.insert(item);
        }
        Ok(Value::Set(set))
    }

    /// `#:ns{...}` — rewrite unqualified keyword/symbol keys into `ns`.
    ///
    /// Only the explicit form is part of the format; `#::{...}` and
    /// `#::alias{...}` auto-resolution are rejected.
    pub(crate) fn read_namespaced_map(&mut self) -> Result<Value> {
        let initch = self.src.read()?;
        let token = read_token(self.src, "namespaced map", initch, true)?;

        if token.starts_with(':') {
            return Err(ReaderError::lexical(format!(
                "Namespaced map cannot use auto-resolution: #::{}",
                token.trim_start_matches(':')
            )));
        }
        let ns = match Symbol::parse(&token) {
            Some(sym) if sym.namespace().is_none() => sym.name().to_string(),
            _ => {
                return Err(ReaderError::lexical(format!(
                    "Invalid token used as namespace in namespaced map: {}",
                    token
                )))
            }
        };

        let open = self.read_skipping_whitespace()?;
        if open != Some('{') {
            return Err(ReaderError::lexical(format!(
                "Namespaced map with namespace {} does not specify a map",
                ns
            )));
        }

        let items = self.read_delimited("namespaced map", '}')?;
        let qualified = items
            .into_iter()
            .enumerate()
            .map(|(i, form)| if i % 2 == 0 { qualify_key(form, &ns) } else { form })
            .collect();
        build_map(qualified).map(Value::Map)
    }
}

fn eof_delimited(kind: &str, start_line: Option<u32>) -> ReaderError {
    let message = match start_line {
        Some(line) => format!(
            "Unexpected EOF while reading {}, starting at line {}",
            kind, line
        ),
        None => format!("Unexpected EOF while reading {}", kind),
    };
    let err = ReaderError::unexpected_eof(message);
    match start_line {
        Some(line) => err.with_start_line(line),
        None => err,
    }
}

fn build_map(items: Vec<Value>) -> Result<IndexMap<Value, Value>> {
    if items.len() % 2 != 0 {
        return Err(ReaderError::lexical(
            "Map literal must contain an even number of forms",
        ));
    }
    let mut map = IndexMap::with_capacity(items.len() / 2);
    let mut iter = items.into_iter();
    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        if map.contains_key(&key) {
            return Err(ReaderError::lexical(format!("Duplicate key: {:?}", key)));
        }
        map.insert(key, value);
    }
    Ok(map)
}

/// Namespace rewriting for namespaced-map keys: unqualified keyword and
/// symbol keys gain `ns`; the reserved `_` namespace strips to bare; other
/// keys pass through unchanged.
fn qualify_key(key: Value, ns: &str) -> Value {
    match key {
        Value::Keyword(kw) => match kw.namespace() {
            None => Value::Keyword(kw.with_namespace(Some(ns))),
            Some("_") => Value::Keyword(kw.with_namespace(None)),
            Some(_) => Value::Keyword(kw),
        },
        Value::Symbol(sym) => match sym.namespace() {
            None => Value::Symbol(sym.with_namespace(Some(ns))),
            Some("_") => Value::Symbol(sym.with_namespace(None)),
            Some(_) => Value::Symbol(sym),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_str;
    use edn_util::{ErrorKind, Keyword};

    fn keyword(name: &str) -> Value {
        Value::Keyword(Keyword::simple(name))
    }

    fn kw2(ns: &str, name: &str) -> Value {
        Value::Keyword(Keyword::qualified(ns, name))
    }

    #[test]
    fn test_list() {
        assert_eq!(
            read_str("(1 2 3)").unwrap(),
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(read_str("()").unwrap(), Value::List(vec![]));
    }

    #[test]
    fn test_vector() {
        assert_eq!(
            read_str("[1 [2] 3]").unwrap(),
            Value::Vector(vec![
                Value::Int(1),
                Value::Vector(vec![Value::Int(2)]),
                Value::Int(3)
            ])
        );
    }

    #[test]
    fn test_map() {
        match read_str("{:a 1, :b 2}").unwrap() {
            Value::Map(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get(&keyword("a")), Some(&Value::Int(1)));
                assert_eq!(map.get(&keyword("b")), Some(&Value::Int(2)));
                // Insertion order is preserved.
                assert_eq!(map.get_index(0).map(|(k, _)| k), Some(&keyword("a")));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_map_and_set() {
        assert_eq!(read_str("{}").unwrap(), Value::Map(IndexMap::new()));
        assert_eq!(read_str("#{}").unwrap(), Value::Set(IndexSet::new()));
    }

    #[test]
    fn test_set() {
        match read_str("#{1 2 3}").unwrap() {
            Value::Set(set) => {
                assert_eq!(set.len(), 3);
                assert!(set.contains(&Value::Int(2)));
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_map_odd_forms() {
        let err = read_str("{:a 1 :b}").unwrap_err();
        assert_eq!(err.message(), "Map literal must contain an even number of forms");
    }

    #[test]
    fn test_map_duplicate_key() {
        let err = read_str("{:a 1 :a 2}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert!(err.message().starts_with("Duplicate key"));
    }

    #[test]
    fn test_set_duplicate_element() {
        let err = read_str("#{1 1}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert!(err.message().starts_with("Duplicate key"));
    }

    #[test]
    fn test_float_keys() {
        match read_str("{1.5 :a 2.5 :b}").unwrap() {
            Value::Map(map) => {
                assert_eq!(map.get(&Value::Float(1.5)), Some(&keyword("a")));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_collections() {
        let parsed = read_str("{:xs [1 2], :ys #{(3)}}").unwrap();
        match parsed {
            Value::Map(map) => {
                assert_eq!(
                    map.get(&keyword("xs")),
                    Some(&Value::Vector(vec![Value::Int(1), Value::Int(2)]))
                );
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_comments_inside_collections() {
        assert_eq!(
            read_str("[1 ; skip\n 2]").unwrap(),
            Value::Vector(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_discard_inside_collections() {
        assert_eq!(
            read_str("[1 #_ 99 2]").unwrap(),
            Value::Vector(vec![Value::Int(1), Value::Int(2)])
        );
        match read_str("#{1 #_ 1 2}").unwrap() {
            Value::Set(set) => assert_eq!(set.len(), 2),
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_eof_in_collection_names_start_line() {
        let err = read_str("(1 2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert_eq!(
            err.message(),
            "Unexpected EOF while reading list, starting at line 1"
        );
        assert_eq!(err.start_line(), Some(1));
    }

    #[test]
    fn test_eof_in_multiline_collection() {
        let err = read_str("[\n1\n[2").unwrap_err();
        // The inner vector opened on line 3.
        assert_eq!(err.start_line(), Some(3));
    }

    #[test]
    fn test_unmatched_delimiter_inside_collection() {
        let err = read_str("[)]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnmatchedDelimiter);
        assert_eq!(err.delimiter(), Some(')'));
    }

    #[test]
    fn test_namespaced_map() {
        match read_str("#:person{:name \"n\" :age 7}").unwrap() {
            Value::Map(map) => {
                assert_eq!(
                    map.get(&kw2("person", "name")),
                    Some(&Value::String("n".into()))
                );
                assert_eq!(map.get(&kw2("person", "age")), Some(&Value::Int(7)));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_namespaced_map_leaves_qualified_keys() {
        match read_str("#:a{:b/k 1 :k 2}").unwrap() {
            Value::Map(map) => {
                assert_eq!(map.get(&kw2("b", "k")), Some(&Value::Int(1)));
                assert_eq!(map.get(&kw2("a", "k")), Some(&Value::Int(2)));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_namespaced_map_underscore_strips() {
        match read_str("#:a{:_/k 1}").unwrap() {
            Value::Map(map) => {
                assert_eq!(map.get(&keyword("k")), Some(&Value::Int(1)));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_namespaced_map_symbol_keys() {
        match read_str("#:a{sym 1}").unwrap() {
            Value::Map(map) => {
                assert_eq!(
                    map.get(&Value::Symbol(Symbol::qualified("a", "sym"))),
                    Some(&Value::Int(1))
                );
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_namespaced_map_non_name_keys_untouched() {
        match read_str("#:a{1 :one \"s\" :two}").unwrap() {
            Value::Map(map) => {
                assert_eq!(map.get(&Value::Int(1)), Some(&keyword("one")));
                assert_eq!(map.get(&Value::String("s".into())), Some(&keyword("two")));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_namespaced_map_whitespace_before_brace() {
        assert!(matches!(read_str("#:a {:k 1}").unwrap(), Value::Map(_)));
    }

    #[test]
    fn test_namespaced_map_rejects_auto_resolution() {
        let err = read_str("#::{:k 1}").unwrap_err();
        assert!(err.message().contains("auto-resolution"));
        let err = read_str("#::alias{:k 1}").unwrap_err();
        assert!(err.message().contains("auto-resolution"));
    }

    #[test]
    fn test_namespaced_map_requires_map() {
        let err = read_str("#:a [1]").unwrap_err();
        assert_eq!(
            err.message(),
            "Namespaced map with namespace a does not specify a map"
        );
    }

    #[test]
    fn test_namespaced_map_odd_forms() {
        let err = read_str("#:a{:k}").unwrap_err();
        assert_eq!(err.message(), "Map literal must contain an even number of forms");
    }

    #[test]
    fn test_namespaced_map_duplicate_after_rewrite() {
        // :k and :a/k collide once :k is qualified.
        let err = read_str("#:a{:k 1 :a/k 2}").unwrap_err();
        assert!(err.message().starts_with("Duplicate key"));
    }

    #[test]
    fn test_namespaced_map_invalid_namespace() {
        let err = read_str("#:a/b{:k 1}").unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid token used as namespace in namespaced map: a/b"
        );
    }

    #[test]
    fn test_deep_nesting_is_supported() {
        let depth = 1000;
        let mut text = String::new();
        for _ in 0..depth {
            text.push('[');
        }
        text.push('1');
        for _ in 0..depth {
            text.push(']');
        }

        let mut value = read_str(&text).unwrap();
        let mut levels = 0;
        loop {
            match value {
                Value::Vector(mut items) => {
                    levels += 1;
                    value = items.pop().expect("non-empty level");
                }
                Value::Int(1) => break,
                other => panic!("unexpected value {:?}", other),
            }
        }
        assert_eq!(levels, depth);
    }
}
