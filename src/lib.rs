//! # artifactory-download
//!
//! Translates the `PLUGIN_*` parameters of a CI step into a single `jfrog rt dl`
//! invocation and runs it.
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`core::validator`] rejects configurations that cannot produce a download.
//! 2. [`core::composer`] maps the typed [`models::Configuration`] to command tokens.
//! 3. [`system::executor`] renders the tokens through a [`system::platform::PlatformProfile`]
//!    and runs them as one child process.
//!
//! [`core::download::execute`] ties the three together.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Shared flag set by the signal listener when the step is being cancelled.
pub type CancellationToken = Arc<AtomicBool>;

/// Command-line and `PLUGIN_*` environment decoding.
pub mod cli;
/// Names shared with the CI system and the JFrog CLI.
pub mod constants;
/// Validation, command composition and the download entry point.
pub mod core;
/// Configuration and command-token types.
pub mod models;
/// Host platform profile and process launching.
pub mod system;
