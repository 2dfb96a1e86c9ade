// src/cli.rs

use crate::{
    core::commons::parse_bool,
    models::{Configuration, Secret},
};
use clap::Parser;
use log::LevelFilter;

/// Downloads artifacts from an Artifactory repository with the JFrog CLI.
///
/// Every option is normally supplied by the CI system as a `PLUGIN_*`
/// environment variable; the long flags exist for running the step by hand.
/// Boolean options accept `true/false/1/0/t/f`; anything else falls back to
/// the option's default.
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct PluginArgs {
    /// Log verbosity (trace, debug, info, warn, error).
    #[arg(long, env = "PLUGIN_LOG_LEVEL")]
    pub log_level: Option<String>,

    // --- Target ---
    /// Artifactory base URL.
    #[arg(long, env = "PLUGIN_URL")]
    pub url: Option<String>,

    /// Repository path (or pattern) to download.
    #[arg(long, env = "PLUGIN_SOURCE_PATH")]
    pub source_path: Option<String>,

    /// Local destination.
    #[arg(long, env = "PLUGIN_TARGET_PATH")]
    pub target_path: Option<String>,

    // --- Authentication ---
    /// Username; needs the password as well.
    #[arg(long, env = "PLUGIN_USERNAME", hide_env_values = true)]
    pub username: Option<String>,

    /// Password for the username.
    #[arg(long, env = "PLUGIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API key, used when no username/password pair is set.
    #[arg(long, env = "PLUGIN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Access token, used when nothing else is set.
    #[arg(long, env = "PLUGIN_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    // --- Transfer shaping ---
    /// File spec describing the download.
    #[arg(long, env = "PLUGIN_SPEC")]
    pub spec: Option<String>,

    /// Variables substituted into the file spec ("key1=val1;key2=val2").
    #[arg(long, env = "PLUGIN_SPEC_VARS")]
    pub spec_vars: Option<String>,

    /// Also download empty directories.
    #[arg(long, env = "PLUGIN_INCLUDE_DIRS")]
    pub include_dirs: Option<String>,

    /// Recurse into subdirectories. Defaults to true.
    #[arg(long, env = "PLUGIN_RECURSIVE")]
    pub recursive: Option<String>,

    /// Drop the source directory structure.
    #[arg(long, env = "PLUGIN_FLAT")]
    pub flat: Option<String>,

    /// Extract downloaded archives.
    #[arg(long, env = "PLUGIN_EXPLODE")]
    pub explode: Option<String>,

    /// Parts to split large files into.
    #[arg(long, env = "PLUGIN_SPLIT_COUNT", default_value_t = 0)]
    pub split_count: i64,

    /// Minimum size in KB for splitting.
    #[arg(long, env = "PLUGIN_MIN_SPLIT", default_value_t = 0)]
    pub min_split: i64,

    /// Maximum number of artifacts to download.
    #[arg(long, env = "PLUGIN_LIMIT", default_value_t = 0)]
    pub limit: i64,

    /// Artifacts to skip before downloading.
    #[arg(long, env = "PLUGIN_OFFSET", default_value_t = 0)]
    pub offset: i64,

    /// Parallel download threads.
    #[arg(long, env = "PLUGIN_THREADS", default_value_t = 0)]
    pub threads: i64,

    /// Local path whose files not in the download get deleted.
    #[arg(long, env = "PLUGIN_SYNC_DELETES")]
    pub sync_deletes: Option<String>,

    /// Semicolon-separated patterns to leave out.
    #[arg(long, env = "PLUGIN_EXCLUSIONS")]
    pub exclusions: Option<String>,

    /// Fields to sort results by.
    #[arg(long, env = "PLUGIN_SORT_BY")]
    pub sort_by: Option<String>,

    /// "asc" or "desc".
    #[arg(long, env = "PLUGIN_SORT_ORDER")]
    pub sort_order: Option<String>,

    // --- Build / project metadata ---
    /// Configured JFrog server to use.
    #[arg(long, env = "PLUGIN_SERVER_ID")]
    pub server_id: Option<String>,

    /// Build the downloaded files are recorded against.
    #[arg(long, env = "PLUGIN_BUILD_NAME")]
    pub build_name: Option<String>,

    /// Number of that build.
    #[arg(long, env = "PLUGIN_BUILD_NUMBER")]
    pub build_number: Option<String>,

    /// JFrog project key.
    #[arg(long, env = "PLUGIN_PROJECT")]
    pub project: Option<String>,

    /// Build-info module id.
    #[arg(long, env = "PLUGIN_MODULE")]
    pub module: Option<String>,

    /// Release bundle ("name/version") to download from.
    #[arg(long, env = "PLUGIN_BUNDLE")]
    pub bundle: Option<String>,

    /// Build coordinate ("name/number") whose artifacts are downloaded.
    #[arg(long, env = "PLUGIN_BUILD")]
    pub build: Option<String>,

    // --- Properties ---
    /// Only artifacts with these properties ("a=1;b=2").
    #[arg(long, env = "PLUGIN_PROPS")]
    pub props: Option<String>,

    /// Skip artifacts with these properties.
    #[arg(long, env = "PLUGIN_EXCLUDE_PROPS")]
    pub exclude_props: Option<String>,

    // --- Operational flags ---
    /// Skip TLS certificate verification.
    #[arg(long, env = "PLUGIN_INSECURE")]
    pub insecure: Option<String>,

    /// Show what would be downloaded without downloading.
    #[arg(long, env = "PLUGIN_DRY_RUN")]
    pub dry_run: Option<String>,

    /// Skip confirmation prompts.
    #[arg(long, env = "PLUGIN_QUIET")]
    pub quiet: Option<String>,

    /// Fail when nothing was downloaded.
    #[arg(long, env = "PLUGIN_FAIL_NO_OP")]
    pub fail_no_op: Option<String>,

    /// Print a per-file summary.
    #[arg(long, env = "PLUGIN_DETAILED_SUMMARY")]
    pub detailed_summary: Option<String>,

    /// Skip the archive safety check when exploding.
    #[arg(long, env = "PLUGIN_BY_PASS_ARCHIVE_INSPECTION")]
    pub bypass_archive_inspection: Option<String>,

    /// Only download symlinks whose target checksum matches.
    #[arg(long, env = "PLUGIN_VALIDATION_SYS_LINKS")]
    pub validate_symlinks: Option<String>,

    /// Retries handed to the CLI; 0 leaves the CLI default.
    #[arg(long, env = "PLUGIN_RETRIES", default_value_t = 0)]
    pub retries: i64,

    /// Wait between retries, e.g. "10s".
    #[arg(long, env = "PLUGIN_RETRY_WAIT_TIME")]
    pub retry_wait_time: Option<String>,

    /// Public key used to verify release bundles.
    #[arg(long, env = "PLUGIN_GPG_KEY")]
    pub gpg_key: Option<String>,
}

fn tri_state(value: Option<String>) -> Option<bool> {
    value.as_deref().and_then(parse_bool)
}

impl PluginArgs {
    /// Converts the raw inputs into the typed configuration. Never fails:
    /// unparseable booleans become unset.
    pub fn into_configuration(self) -> Configuration {
        Configuration {
            url: self.url.unwrap_or_default(),
            source_path: self.source_path.unwrap_or_default(),
            target_path: self.target_path.unwrap_or_default(),

            username: Secret::new(self.username.unwrap_or_default()),
            password: Secret::new(self.password.unwrap_or_default()),
            api_key: Secret::new(self.api_key.unwrap_or_default()),
            access_token: Secret::new(self.access_token.unwrap_or_default()),

            spec: self.spec.unwrap_or_default(),
            spec_vars: self.spec_vars.unwrap_or_default(),
            include_dirs: tri_state(self.include_dirs),
            recursive: tri_state(self.recursive),
            flat: tri_state(self.flat),
            explode: tri_state(self.explode),
            split_count: self.split_count,
            min_split: self.min_split,
            limit: self.limit,
            offset: self.offset,
            threads: self.threads,
            sync_deletes: self.sync_deletes.unwrap_or_default(),
            exclusions: self.exclusions.unwrap_or_default(),
            sort_by: self.sort_by.unwrap_or_default(),
            sort_order: self.sort_order.unwrap_or_default(),

            server_id: self.server_id.unwrap_or_default(),
            build_name: self.build_name.unwrap_or_default(),
            build_number: self.build_number.unwrap_or_default(),
            project: self.project.unwrap_or_default(),
            module: self.module.unwrap_or_default(),
            bundle: self.bundle.unwrap_or_default(),
            build: self.build.unwrap_or_default(),

            props: self.props.unwrap_or_default(),
            exclude_props: self.exclude_props.unwrap_or_default(),

            insecure: tri_state(self.insecure),
            dry_run: tri_state(self.dry_run),
            quiet: tri_state(self.quiet),
            fail_no_op: tri_state(self.fail_no_op),
            detailed_summary: tri_state(self.detailed_summary),
            bypass_archive_inspection: tri_state(self.bypass_archive_inspection),
            validate_symlinks: tri_state(self.validate_symlinks),
            retries: self.retries,
            retry_wait_time: self.retry_wait_time.unwrap_or_default(),
            gpg_key: self.gpg_key.unwrap_or_default(),
        }
    }
}

/// Maps a log level name to a filter. Besides the `log` names this accepts
/// `warning`, `fatal` and `panic`, which CI templates commonly use.
pub fn parse_log_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "warning" => Some(LevelFilter::Warn),
        "fatal" | "panic" => Some(LevelFilter::Error),
        other => other.parse().ok(),
    }
}
