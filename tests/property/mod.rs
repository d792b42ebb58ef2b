//! Property-based tests for sitegen

mod determinism;
