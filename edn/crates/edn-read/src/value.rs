//! The value model.
//!
//! [`Value`] is the tagged union every read produces. Values own their data
//! outright; nothing borrows from the reader state that produced them.
//!
//! The manual `PartialEq`/`Eq`/`Hash` implementations exist for one reason:
//! values are usable as map keys and set elements, floats included. Floats
//! compare and hash by bit pattern (with `0.0`/`-0.0` unified so equality
//! and hashing agree), and map/set hashes are computed order-independently
//! to match their order-independent equality.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use indexmap::{IndexMap, IndexSet};
use num_bigint::BigInt;
use uuid::Uuid;

use edn_util::{BigDecimal, Keyword, Ratio, Symbol};

/// A parsed EDN value.
#[derive(Clone, Debug)]
pub enum Value {
    /// `nil`
    Nil,

    /// `true` / `false`
    Bool(bool),

    /// A fixed-width integer.
    Int(i64),

    /// An arbitrary-precision integer (`N` suffix, or literal overflow).
    BigInt(BigInt),

    /// A ratio in lowest terms, like `22/7`.
    Ratio(Ratio),

    /// A 64-bit float.
    Float(f64),

    /// An arbitrary-precision decimal (`M` suffix).
    Decimal(BigDecimal),

    /// A character literal.
    Char(char),

    /// A string literal.
    String(String),

    /// A symbol, like `my.ns/name`.
    Symbol(Symbol),

    /// A keyword, like `:my.ns/name`.
    Keyword(Keyword),

    /// A list, like `(1 2 3)`.
    List(Vec<Value>),

    /// A vector, like `[1 2 3]`.
    Vector(Vec<Value>),

    /// A map, like `{:a 1}`. Insertion-ordered, unique keys.
    Map(IndexMap<Value, Value>),

    /// A set, like `#{1 2}`. Insertion-ordered, unique elements.
    Set(IndexSet<Value>),

    /// A tagged literal handed to the caller unresolved, like `#point [1 2]`
    /// routed through the `default` handler.
    Tagged {
        /// The tag symbol.
        tag: Symbol,
        /// The form following the tag.
        value: Box<Value>,
    },

    /// An `#inst` timestamp, decoded by the built-in default reader.
    Inst(DateTime<FixedOffset>),

    /// A `#uuid`, decoded by the built-in default reader.
    Uuid(Uuid),

    /// Metadata attached with `^`. `meta` is always a map.
    Meta {
        /// The metadata map.
        meta: Box<Value>,
        /// The form carrying the metadata.
        form: Box<Value>,
    },
}

impl Value {
    /// Whether `^` metadata may be attached to this value.
    ///
    /// Collections and symbols carry metadata; attaching to anything else is
    /// an error. A value that already carries metadata stays attachable.
    pub fn can_have_meta(&self) -> bool {
        match self {
            Value::List(_) | Value::Vector(_) | Value::Map(_) | Value::Set(_) => true,
            Value::Symbol(_) => true,
            Value::Meta { form, .. } => form.can_have_meta(),
            _ => false,
        }
    }
}

/// Normalized bit pattern: equality and hashing agree on `0.0 == -0.0`, and
/// `NaN` equals itself.
fn float_bits(f: f64) -> u64 {
    if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}

fn hash_one(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn hash_entry(key: &Value, value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    value.hash(&mut hasher);
    hasher.finish()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (BigInt(a), BigInt(b)) => a == b,
            (Ratio(a), Ratio(b)) => a == b,
            (Float(a), Float(b)) => float_bits(*a) == float_bits(*b),
            (Decimal(a), Decimal(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Symbol(a), Symbol(b)) => a == b,
            (Keyword(a), Keyword(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Vector(a), Vector(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Set(a), Set(b)) => a == b,
            (
                Tagged { tag: ta, value: va },
                Tagged { tag: tb, value: vb },
            ) => ta == tb && va == vb,
            (Inst(a), Inst(b)) => a == b,
            (Uuid(a), Uuid(b)) => a == b,
            (
                Meta { meta: ma, form: fa },
                Meta { meta: mb, form: fb },
            ) => ma == mb && fa == fb,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use Value::*;
        std::mem::discriminant(self).hash(state);
        match self {
            Nil => {}
            Bool(b) => b.hash(state),
            Int(i) => i.hash(state),
            BigInt(b) => b.hash(state),
            Ratio(r) => r.hash(state),
            Float(f) => float_bits(*f).hash(state),
            Decimal(d) => d.hash(state),
            Char(c) => c.hash(state),
            String(s) => s.hash(state),
            Symbol(s) => s.hash(state),
            Keyword(k) => k.hash(state),
            List(items) | Vector(items) => {
                items.len().hash(state);
                for item in items {
                    item.hash(state);
                }
            }
            Map(map) => {
                // Order-independent, to agree with order-independent equality.
                map.len().hash(state);
                let mut acc: u64 = 0;
                for (k, v) in map {
                    acc = acc.wrapping_add(hash_entry(k, v));
                }
                acc.hash(state);
            }
            Set(set) => {
                set.len().hash(state);
                let mut acc: u64 = 0;
                for item in set {
                    acc = acc.wrapping_add(hash_one(item));
                }
                acc.hash(state);
            }
            Tagged { tag, value } => {
                tag.hash(state);
                value.hash(state);
            }
            Inst(dt) => dt.hash(state),
            Uuid(u) => u.hash(state),
            Meta { meta, form } => {
                meta.hash(state);
                form.hash(state);
            }
        }
    }
}

static_assertions::assert_impl_all!(Value: Clone, Send, Sync);
static_assertions::assert_impl_all!(edn_util::ReaderError: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(name: &str) -> Value {
        Value::Keyword(Keyword::simple(name))
    }

    #[test]
    fn test_list_and_vector_are_distinct() {
        let list = Value::List(vec![Value::Int(1)]);
        let vector = Value::Vector(vec![Value::Int(1)]);
        assert_ne!(list, vector);
    }

    #[test]
    fn test_float_nan_is_self_equal() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn test_float_zero_signs_unified() {
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(hash_one(&Value::Float(0.0)), hash_one(&Value::Float(-0.0)));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let mut a = IndexMap::new();
        a.insert(keyword("a"), Value::Int(1));
        a.insert(keyword("b"), Value::Int(2));
        let mut b = IndexMap::new();
        b.insert(keyword("b"), Value::Int(2));
        b.insert(keyword("a"), Value::Int(1));
        assert_eq!(Value::Map(a.clone()), Value::Map(b.clone()));
        assert_eq!(hash_one(&Value::Map(a)), hash_one(&Value::Map(b)));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let mut a = IndexSet::new();
        a.insert(Value::Int(1));
        a.insert(Value::Int(2));
        let mut b = IndexSet::new();
        b.insert(Value::Int(2));
        b.insert(Value::Int(1));
        assert_eq!(Value::Set(a.clone()), Value::Set(b.clone()));
        assert_eq!(hash_one(&Value::Set(a)), hash_one(&Value::Set(b)));
    }

    #[test]
    fn test_map_usable_as_key() {
        let mut inner = IndexMap::new();
        inner.insert(keyword("k"), Value::Int(1));
        let mut outer = IndexMap::new();
        outer.insert(Value::Map(inner.clone()), keyword("v"));
        assert_eq!(outer.get(&Value::Map(inner)), Some(&keyword("v")));
    }

    #[test]
    fn test_can_have_meta() {
        assert!(Value::List(vec![]).can_have_meta());
        assert!(Value::Vector(vec![]).can_have_meta());
        assert!(Value::Map(IndexMap::new()).can_have_meta());
        assert!(Value::Set(IndexSet::new()).can_have_meta());
        assert!(Value::Symbol(Symbol::simple("x")).can_have_meta());

        assert!(!Value::Nil.can_have_meta());
        assert!(!Value::Int(1).can_have_meta());
        assert!(!keyword("k").can_have_meta());
        assert!(!Value::String("s".into()).can_have_meta());
    }

    #[test]
    fn test_meta_wrapped_value_keeps_attachability() {
        let wrapped = Value::Meta {
            meta: Box::new(Value::Map(IndexMap::new())),
            form: Box::new(Value::Symbol(Symbol::simple("x"))),
        };
        assert!(wrapped.can_have_meta());

        let wrapped_scalar = Value::Meta {
            meta: Box::new(Value::Map(IndexMap::new())),
            form: Box::new(Value::Int(1)),
        };
        assert!(!wrapped_scalar.can_have_meta());
    }

    #[test]
    fn test_int_and_bigint_are_distinct_values() {
        assert_ne!(Value::Int(1), Value::BigInt(BigInt::from(1)));
    }
}
