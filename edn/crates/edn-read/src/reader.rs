//! The dispatch engine.
//!
//! A single recursive-descent loop: skip whitespace, decide between number,
//! macro reader, and symbol, and recurse through the macro readers for
//! nested forms. Non-producing readers (comments, `#_` discard) yield no
//! value; the driving loops consume input and continue.
//!
//! Position handling lives at the outermost entry point only: [`read`]
//! attaches the source position to any error that bubbles out without one,
//! and only when the source is indexing.

use indexmap::IndexMap;

use edn_lex::classify;
use edn_lex::number::read_number;
use edn_lex::source::CharSource;
use edn_lex::string::{read_char_literal, read_string_content};
use edn_lex::token::read_token;
use edn_lex::Number;
use edn_util::{Keyword, ReaderError, Result, Symbol};

use crate::options::{EofBehavior, ReadOptions};
use crate::tags;
use crate::value::Value;

/// Reads one value from `source`.
///
/// Consumes exactly one complete form plus any trailing pushback produced
/// by the terminator logic; subsequent calls resume deterministically. At
/// clean end of input the behavior is governed by `opts.eof`: raise, or
/// return the configured value.
pub fn read(opts: &ReadOptions, source: &mut dyn CharSource) -> Result<Value> {
    let outcome = {
        let mut reader = Reader::new(source, opts);
        reader.read_top()
    };
    outcome.map_err(|err| attach_position(err, source))
}

/// Reads one value from a string. Empty input yields `nil`.
pub fn read_str(text: &str) -> Result<Value> {
    read_str_with(&ReadOptions::default(), text)
}

/// Reads one value from a string with explicit options. Empty input yields
/// `nil`.
pub fn read_str_with(opts: &ReadOptions, text: &str) -> Result<Value> {
    if text.is_empty() {
        return Ok(Value::Nil);
    }
    let mut source = edn_lex::StringSource::new(text);
    read(opts, &mut source)
}

fn attach_position(err: ReaderError, source: &dyn CharSource) -> ReaderError {
    if err.pos().is_some() {
        return err;
    }
    match source.pos() {
        Some(pos) => err.with_pos(pos),
        None => err,
    }
}

/// Reader state for one top-level read call.
///
/// Owned exclusively by that call; no state survives it. The source and the
/// options are borrowed from the caller.
pub(crate) struct Reader<'s, 'o> {
    pub(crate) src: &'s mut dyn CharSource,
    pub(crate) opts: &'o ReadOptions,
}

impl<'s, 'o> Reader<'s, 'o> {
    pub(crate) fn new(src: &'s mut dyn CharSource, opts: &'o ReadOptions) -> Self {
        Self { src, opts }
    }

    /// One top-level read, honoring the configured end-of-input behavior.
    pub(crate) fn read_top(&mut self) -> Result<Value> {
        let eof_error = matches!(self.opts.eof, EofBehavior::Raise);
        match self.read_next(eof_error)? {
            Some(value) => Ok(value),
            None => match &self.opts.eof {
                EofBehavior::Value(value) => Ok(value.clone()),
                EofBehavior::Raise => Err(ReaderError::unexpected_eof("EOF while reading")),
            },
        }
    }

    /// The dispatch loop. Returns `Ok(None)` only for clean end of input
    /// with `eof_error` off; comments and discards are consumed internally.
    pub(crate) fn read_next(&mut self, eof_error: bool) -> Result<Option<Value>> {
        loop {
            let Some(ch) = self.read_skipping_whitespace()? else {
                if eof_error {
                    return Err(ReaderError::unexpected_eof("EOF while reading"));
                }
                return Ok(None);
            };

            if self.number_start(ch)? {
                return Ok(Some(self.read_number_value(ch)?));
            }

            if classify::is_macro(ch) {
                match self.run_macro(ch)? {
                    Some(value) => return Ok(Some(value)),
                    None => continue,
                }
            }

            return Ok(Some(self.read_symbol_value(ch)?));
        }
    }

    /// Reads one form, failing on end of input.
    pub(crate) fn read_required(&mut self) -> Result<Value> {
        self.read_next(true)?
            .ok_or_else(|| ReaderError::unexpected_eof("EOF while reading"))
    }

    pub(crate) fn read_skipping_whitespace(&mut self) -> Result<Option<char>> {
        loop {
            match self.src.read()? {
                Some(ch) if classify::is_whitespace(ch) => continue,
                other => return Ok(other),
            }
        }
    }

    /// Number-literal start rule: a digit, or a sign immediately followed
    /// by a digit (one peek of lookahead after the sign was consumed).
    fn number_start(&mut self, ch: char) -> Result<bool> {
        if classify::is_numeric(ch) {
            return Ok(true);
        }
        if ch == '+' || ch == '-' {
            if let Some(next) = self.src.peek()? {
                return Ok(classify::is_numeric(next));
            }
        }
        Ok(false)
    }

    fn read_number_value(&mut self, initch: char) -> Result<Value> {
        Ok(match read_number(self.src, initch)? {
            Number::Int(v) => Value::Int(v),
            Number::BigInt(b) => Value::BigInt(b),
            Number::Ratio(r) => Value::Ratio(r),
            Number::Float(f) => Value::Float(f),
            Number::Decimal(d) => Value::Decimal(d),
        })
    }

    /// Dispatches a macro character. `Ok(None)` means the reader consumed
    /// input but produced nothing (comment, discard).
    pub(crate) fn run_macro(&mut self, ch: char) -> Result<Option<Value>> {
        match ch {
            '"' => Ok(Some(Value::String(read_string_content(self.src)?))),
            ':' => Ok(Some(self.read_keyword()?)),
            ';' => {
                self.skip_line_comment()?;
                Ok(None)
            }
            '^' => Ok(Some(self.read_meta()?)),
            '(' => Ok(Some(Value::List(self.read_delimited("list", ')')?))),
            '[' => Ok(Some(Value::Vector(self.read_delimited("vector", ']')?))),
            '{' => Ok(Some(self.read_map()?)),
            ')' | ']' | '}' => Err(ReaderError::unmatched_delimiter(ch)),
            '\\' => Ok(Some(Value::Char(read_char_literal(self.src)?))),
            '#' => self.read_dispatch(),
            _ => unreachable!("run_macro called on a non-macro character"),
        }
    }

    fn skip_line_comment(&mut self) -> Result<()> {
        loop {
            match self.src.read()? {
                None | Some('\n') => return Ok(()),
                Some(_) => continue,
            }
        }
    }

    fn read_keyword(&mut self) -> Result<Value> {
        let initch = self.src.read()?;
        if let Some(ch) = initch {
            if classify::is_whitespace(ch) {
                return Err(ReaderError::lexical("A single colon is not a valid keyword"));
            }
        }

        let token = read_token(self.src, "keyword", initch, true)?;
        if token.starts_with(':') {
            return Err(ReaderError::lexical(format!(
                "A keyword cannot begin with two colons: :{}",
                token
            )));
        }
        match Symbol::parse(&token) {
            Some(sym) if !token.contains("::") => Ok(Value::Keyword(Keyword::from(sym))),
            _ => Err(ReaderError::lexical(format!("Invalid token: :{}", token))),
        }
    }

    fn read_symbol_value(&mut self, initch: char) -> Result<Value> {
        let token = read_token(self.src, "symbol", Some(initch), true)?;
        match token.as_str() {
            "nil" => Ok(Value::Nil),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "/" => Ok(Value::Symbol(Symbol::simple("/"))),
            "NaN" => Ok(Value::Float(f64::NAN)),
            "-Infinity" => Ok(Value::Float(f64::NEG_INFINITY)),
            "Infinity" | "+Infinity" => Ok(Value::Float(f64::INFINITY)),
            _ => match Symbol::parse(&token) {
                Some(sym) => Ok(Value::Symbol(sym)),
                None => Err(ReaderError::lexical(format!("Invalid symbol: {}", token))),
            },
        }
    }

    /// `^meta target`, and the deprecated `#^` spelling.
    fn read_meta(&mut self) -> Result<Value> {
        let meta = self.read_required()?;
        let meta_map = match meta {
            Value::Keyword(kw) => {
                let mut map = IndexMap::new();
                map.insert(Value::Keyword(kw), Value::Bool(true));
                map
            }
            Value::Symbol(_) | Value::String(_) => {
                let mut map = IndexMap::new();
                map.insert(Value::Keyword(Keyword::simple("tag")), meta);
                map
            }
            Value::Map(map) => map,
            _ => {
                return Err(ReaderError::lexical(
                    "Metadata must be Symbol, Keyword, String or Map",
                ))
            }
        };

        let target = self.read_required()?;
        if !target.can_have_meta() {
            return Err(ReaderError::lexical(
                "Metadata can only be applied to collections and symbols",
            ));
        }

        Ok(match target {
            Value::Meta { meta: existing, form } => {
                // The map being processed now overrides keys already on the
                // target.
                let mut merged = match *existing {
                    Value::Map(map) => map,
                    _ => IndexMap::new(),
                };
                merged.extend(meta_map);
                Value::Meta {
                    meta: Box::new(Value::Map(merged)),
                    form,
                }
            }
            other => Value::Meta {
                meta: Box::new(Value::Map(meta_map)),
                form: Box::new(other),
            },
        })
    }

    /// The `#` dispatch sub-table.
    fn read_dispatch(&mut self) -> Result<Option<Value>> {
        let Some(ch) = self.src.read()? else {
            return Err(ReaderError::unexpected_eof(
                "Unexpected EOF while reading dispatch character",
            ));
        };
        match ch {
            '^' => Ok(Some(self.read_meta()?)),
            '{' => Ok(Some(self.read_set()?)),
            '_' => {
                let dropped = self.read_required()?;
                tracing::trace!(?dropped, "discarded form");
                Ok(None)
            }
            '!' => {
                self.skip_line_comment()?;
                Ok(None)
            }
            '<' => Err(ReaderError::lexical("Unreadable form")),
            ':' => Ok(Some(self.read_namespaced_map()?)),
            _ => {
                self.src.unread(ch);
                Ok(Some(self.read_tagged()?))
            }
        }
    }

    fn read_tagged(&mut self) -> Result<Value> {
        let tag = self.read_required()?;
        let Value::Symbol(tag) = tag else {
            return Err(ReaderError::bad_reader_tag("Reader tag must be a symbol"));
        };
        let value = self.read_required()?;
        tags::resolve_tag(self.opts, tag, value)
    }
}
