// src/models.rs

use crate::constants::{ENV_ACCESS_TOKEN, ENV_API_KEY, ENV_PASSWORD, ENV_USERNAME};
use std::fmt;

// --- SECRET VALUES ---

/// A credential value that must never show up in logs or echoed command lines.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a raw credential value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw value. Only the launcher should need this, when it
    /// exports the value to the child environment.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when no value was supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(<unset>)")
        } else {
            f.write_str("Secret(***)")
        }
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// --- CONFIGURATION ---

/// The fully decoded parameters of one plugin invocation.
///
/// Strings are "unset" when empty, integers when zero. Booleans are tri-state:
/// `None` means the input was missing or unparseable, and the composer
/// substitutes the per-flag default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    // Identity / target
    /// Artifactory base URL. Required.
    pub url: String,
    /// Repository path or pattern to download. Required.
    pub source_path: String,
    /// Local destination, appended after the source when set.
    pub target_path: String,

    // Authentication
    /// Username half of the username/password form.
    pub username: Secret,
    /// Password half of the username/password form.
    pub password: Secret,
    /// API key form.
    pub api_key: Secret,
    /// Access token form.
    pub access_token: Secret,

    // Transfer shaping
    /// File spec path (`--spec`).
    pub spec: String,
    /// Variables for the file spec, passed single-quoted.
    pub spec_vars: String,
    /// `--include-dirs`, default false.
    pub include_dirs: Option<bool>,
    /// `--recursive`, default true.
    pub recursive: Option<bool>,
    /// `--flat`, default false.
    pub flat: Option<bool>,
    /// `--explode`, default false.
    pub explode: Option<bool>,
    /// `--split-count`.
    pub split_count: i64,
    /// `--min-split`.
    pub min_split: i64,
    /// `--limit`.
    pub limit: i64,
    /// `--offset`.
    pub offset: i64,
    /// `--threads`.
    pub threads: i64,
    /// `--sync-deletes`.
    pub sync_deletes: String,
    /// `--exclusions`.
    pub exclusions: String,
    /// `--sort-by`.
    pub sort_by: String,
    /// `--sort-order`.
    pub sort_order: String,

    // Build / project metadata
    /// `--server-id`.
    pub server_id: String,
    /// `--build-name`.
    pub build_name: String,
    /// `--build-number`.
    pub build_number: String,
    /// `--project`.
    pub project: String,
    /// `--module`.
    pub module: String,
    /// `--bundle`.
    pub bundle: String,
    /// `--build`, a "name/number" build coordinate.
    pub build: String,

    // Properties
    /// `--props`.
    pub props: String,
    /// `--exclude-props`.
    pub exclude_props: String,

    // Operational flags
    /// `--insecure-tls`, default false.
    pub insecure: Option<bool>,
    /// `--dry-run`, default false.
    pub dry_run: Option<bool>,
    /// `--quiet`, default false.
    pub quiet: Option<bool>,
    /// `--fail-no-op`, default false.
    pub fail_no_op: Option<bool>,
    /// `--detailed-summary`, default false.
    pub detailed_summary: Option<bool>,
    /// `--bypass-archive-inspection`, default false.
    pub bypass_archive_inspection: Option<bool>,
    /// `--validate-symlinks`, default false.
    pub validate_symlinks: Option<bool>,
    /// `--retries`, emitted twice when non-zero.
    pub retries: i64,
    /// `--retry-wait-time`.
    pub retry_wait_time: String,
    /// `--gpg-key`.
    pub gpg_key: String,
}

impl Configuration {
    /// Picks the credential form to authenticate with.
    ///
    /// Precedence is fixed: username/password (both halves required), then API
    /// key, then access token. Returns `None` when no form is complete.
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        if !self.username.is_empty() && !self.password.is_empty() {
            Some(Credentials::UserPassword {
                username: &self.username,
                password: &self.password,
            })
        } else if !self.api_key.is_empty() {
            Some(Credentials::ApiKey(&self.api_key))
        } else if !self.access_token.is_empty() {
            Some(Credentials::AccessToken(&self.access_token))
        } else {
            None
        }
    }
}

/// The credential form selected for a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials<'a> {
    /// Username and password, both non-empty.
    UserPassword {
        /// Username value.
        username: &'a Secret,
        /// Password value.
        password: &'a Secret,
    },
    /// API key.
    ApiKey(&'a Secret),
    /// Access token.
    AccessToken(&'a Secret),
}

impl<'a> Credentials<'a> {
    /// The (flag, variable) placeholders this form contributes to the command.
    pub fn placeholders(&self) -> Vec<CommandToken> {
        match self {
            Credentials::UserPassword { .. } => vec![
                CommandToken::secret("--user", ENV_USERNAME),
                CommandToken::secret("--password", ENV_PASSWORD),
            ],
            Credentials::ApiKey(_) => vec![CommandToken::secret("--apikey", ENV_API_KEY)],
            Credentials::AccessToken(_) => {
                vec![CommandToken::secret("--access-token", ENV_ACCESS_TOKEN)]
            }
        }
    }

    /// The variables the child process needs so the placeholders resolve.
    pub fn env_bindings(self) -> Vec<(&'static str, &'a str)> {
        match self {
            Credentials::UserPassword { username, password } => vec![
                (ENV_USERNAME, username.expose()),
                (ENV_PASSWORD, password.expose()),
            ],
            Credentials::ApiKey(key) => vec![(ENV_API_KEY, key.expose())],
            Credentials::AccessToken(token) => vec![(ENV_ACCESS_TOKEN, token.expose())],
        }
    }
}

// --- COMMAND TOKENS ---

/// One word of the composed command line, before platform rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandToken {
    /// The JFrog CLI binary; its path depends on the platform profile.
    Program,
    /// A word emitted verbatim.
    Literal(String),
    /// A flag whose value is read from an environment variable by the shell.
    Secret {
        /// Flag name, e.g. `--user`.
        flag: &'static str,
        /// Variable holding the value.
        env_var: &'static str,
    },
}

impl CommandToken {
    /// Builds a verbatim token.
    pub fn literal(value: impl Into<String>) -> Self {
        CommandToken::Literal(value.into())
    }

    /// Builds a placeholder token.
    pub fn secret(flag: &'static str, env_var: &'static str) -> Self {
        CommandToken::Secret { flag, env_var }
    }
}
