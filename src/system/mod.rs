//! # System Interaction Layer
//!
//! The boundary between the download logic and the host operating system.
//!
//! ## Modules
//!
//! - **`platform`**: The [`platform::PlatformProfile`] of the host: which shell runs the
//!   command, where the JFrog CLI lives and how environment variables are referenced.
//!   Resolved once and passed explicitly so any host can be simulated in tests.
//! - **`executor`**: Spawns the composed command, streams its output, waits for it with
//!   support for cancellation and maps its outcome to an [`executor::ExecutionError`].

/// Launches the rendered command and waits for it.
pub mod executor;
/// Per-host shell and CLI conventions.
pub mod platform;
