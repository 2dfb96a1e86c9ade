// src/constants.rs

/// Subcommand tokens passed to the JFrog CLI right after the binary.
pub const DOWNLOAD_SUBCOMMAND: [&str; 2] = ["rt", "dl"];

/// Binary name resolved through `PATH` on POSIX hosts.
pub const POSIX_JFROG_BIN: &str = "jfrog";

/// Absolute install location of the CLI on Windows runners.
pub const WINDOWS_JFROG_BIN: &str = "C:/bin/jfrog.exe";

// Variables holding the credentials. The composed command refers to these by
// name so the values never appear in the echoed command line.
/// Username variable.
pub const ENV_USERNAME: &str = "PLUGIN_USERNAME";
/// Password variable.
pub const ENV_PASSWORD: &str = "PLUGIN_PASSWORD";
/// API key variable.
pub const ENV_API_KEY: &str = "PLUGIN_API_KEY";
/// Access token variable.
pub const ENV_ACCESS_TOKEN: &str = "PLUGIN_ACCESS_TOKEN";

/// Repository URL variable.
pub const ENV_URL: &str = "PLUGIN_URL";
/// Source path variable.
pub const ENV_SOURCE_PATH: &str = "PLUGIN_SOURCE_PATH";

/// Environment forced onto the child process: no first-run config prompt and
/// experimental transitive downloads enabled.
pub const CHILD_ENV: [(&str, &str); 2] = [
    ("JFROG_CLI_OFFER_CONFIG", "false"),
    ("JFROG_CLI_TRANSITIVE_DOWNLOAD_EXPERIMENTAL", "true"),
];

/// Exit code used when the step is interrupted, matching shell conventions.
pub const EXIT_CODE_CANCELLED: i32 = 130;
