//! Edge case tests for edn-read
