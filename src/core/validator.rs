// src/core/validator.rs

use crate::{
    constants::{ENV_SOURCE_PATH, ENV_URL},
    models::Configuration,
};
use thiserror::Error;

/// Reasons a configuration cannot produce a download.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required input is empty.
    #[error("{field} needs to be set ({env_var}).")]
    MissingRequiredField {
        /// Human-readable field name.
        field: &'static str,
        /// Variable the CI system sets it from.
        env_var: &'static str,
    },
    /// No complete credential form is present.
    #[error("Either username/password, api key or access token needs to be set.")]
    MissingCredentials,
}

/// Pre-flight checks. Only a missing URL, source path or credential form stops
/// the download; malformed optional values are left to the composer defaults.
pub fn validate(config: &Configuration) -> Result<(), ValidationError> {
    if config.url.is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: "url",
            env_var: ENV_URL,
        });
    }
    if config.source_path.is_empty() {
        return Err(ValidationError::MissingRequiredField {
            field: "source path",
            env_var: ENV_SOURCE_PATH,
        });
    }
    if config.credentials().is_none() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}
