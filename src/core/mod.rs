// src/core/mod.rs

/// Helpers shared by the core modules.
pub mod commons;
/// Builds the ordered `jfrog rt dl` tokens.
pub mod composer;
/// Runs one download step end to end.
pub mod download;
/// Pre-flight checks.
pub mod validator;
