//! Edge case tests for edn-lex
