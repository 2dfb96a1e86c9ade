// src/system/platform.rs

use crate::{
    constants::{POSIX_JFROG_BIN, WINDOWS_JFROG_BIN},
    models::CommandToken,
};
use lazy_static::lazy_static;

lazy_static! {
    static ref HOST_PROFILE: PlatformProfile = if cfg!(target_os = "windows") {
        PlatformProfile::windows()
    } else {
        PlatformProfile::posix()
    };
}

/// Everything about the host that changes how the download command is spelled
/// and launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Shell program that interprets the command string.
    pub shell: String,
    /// Flag telling the shell to run the next argument as a command.
    pub run_flag: String,
    /// Path (or bare name) of the JFrog CLI.
    pub binary: String,
    /// Prefix that turns a variable name into a reference the shell expands.
    pub env_prefix: String,
}

impl PlatformProfile {
    /// The profile for the current host, resolved once per process.
    pub fn host() -> &'static Self {
        &HOST_PROFILE
    }

    /// `sh -c` running `jfrog` from `PATH`.
    pub fn posix() -> Self {
        Self {
            shell: "sh".to_string(),
            run_flag: "-c".to_string(),
            binary: POSIX_JFROG_BIN.to_string(),
            env_prefix: "$".to_string(),
        }
    }

    /// `powershell -Command` running the CLI from its fixed install path.
    pub fn windows() -> Self {
        Self {
            shell: "powershell".to_string(),
            run_flag: "-Command".to_string(),
            binary: WINDOWS_JFROG_BIN.to_string(),
            env_prefix: "$Env:".to_string(),
        }
    }

    /// Same profile, different CLI location.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Spells a single token for this platform. Secret placeholders become
    /// variable references, never values.
    pub fn render_token(&self, token: &CommandToken) -> String {
        match token {
            CommandToken::Program => self.binary.clone(),
            CommandToken::Literal(s) => s.clone(),
            CommandToken::Secret { flag, env_var } => {
                format!("{} {}{}", flag, self.env_prefix, env_var)
            }
        }
    }

    /// Joins the tokens into the command string handed to the shell.
    pub fn render(&self, tokens: &[CommandToken]) -> String {
        tokens
            .iter()
            .map(|t| self.render_token(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The line echoed before the command runs.
    pub fn audit_line(&self, command: &str) -> String {
        format!("+ {} {} {}", self.shell, self.run_flag, command)
    }
}
