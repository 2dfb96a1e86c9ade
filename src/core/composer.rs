// src/core/composer.rs

use crate::{
    constants::DOWNLOAD_SUBCOMMAND,
    core::commons::parse_bool_or,
    models::{CommandToken, Configuration},
};

// --- Flag Tables ---
// Order matters: the composed command is compared verbatim in logs and tests.

/// A `--flag=value` emitted only when the source string is non-empty.
struct StringFlag {
    flag: &'static str,
    value: fn(&Configuration) -> &str,
}

/// A `--flag=true|false` that is always emitted, falling back to `default`.
struct BoolFlag {
    flag: &'static str,
    default: bool,
    value: fn(&Configuration) -> Option<bool>,
}

/// A `--flag=n` emitted only when the integer is non-zero.
struct IntFlag {
    flag: &'static str,
    value: fn(&Configuration) -> i64,
}

#[rustfmt::skip]
static STRING_FLAGS: &[StringFlag] = &[
    StringFlag { flag: "--server-id", value: |c| c.server_id.as_str() },
    StringFlag { flag: "--build-name", value: |c| c.build_name.as_str() },
    StringFlag { flag: "--build-number", value: |c| c.build_number.as_str() },
    StringFlag { flag: "--project", value: |c| c.project.as_str() },
    StringFlag { flag: "--module", value: |c| c.module.as_str() },
    StringFlag { flag: "--props", value: |c| c.props.as_str() },
    StringFlag { flag: "--exclude-props", value: |c| c.exclude_props.as_str() },
    StringFlag { flag: "--build", value: |c| c.build.as_str() },
    StringFlag { flag: "--bundle", value: |c| c.bundle.as_str() },
    StringFlag { flag: "--retry-wait-time", value: |c| c.retry_wait_time.as_str() },
    StringFlag { flag: "--sync-deletes", value: |c| c.sync_deletes.as_str() },
    StringFlag { flag: "--sort-by", value: |c| c.sort_by.as_str() },
    StringFlag { flag: "--sort-order", value: |c| c.sort_order.as_str() },
    StringFlag { flag: "--gpg-key", value: |c| c.gpg_key.as_str() },
    StringFlag { flag: "--exclusions", value: |c| c.exclusions.as_str() },
];

#[rustfmt::skip]
static BOOL_FLAGS: &[BoolFlag] = &[
    BoolFlag { flag: "--insecure-tls", default: false, value: |c| c.insecure },
    BoolFlag { flag: "--flat", default: false, value: |c| c.flat },
    BoolFlag { flag: "--detailed-summary", default: false, value: |c| c.detailed_summary },
    BoolFlag { flag: "--recursive", default: true, value: |c| c.recursive },
    BoolFlag { flag: "--dry-run", default: false, value: |c| c.dry_run },
    BoolFlag { flag: "--explode", default: false, value: |c| c.explode },
    BoolFlag { flag: "--bypass-archive-inspection", default: false, value: |c| c.bypass_archive_inspection },
    BoolFlag { flag: "--validate-symlinks", default: false, value: |c| c.validate_symlinks },
    BoolFlag { flag: "--include-dirs", default: false, value: |c| c.include_dirs },
    BoolFlag { flag: "--quiet", default: false, value: |c| c.quiet },
    BoolFlag { flag: "--fail-no-op", default: false, value: |c| c.fail_no_op },
];

// `--retries` appears here and again right after `--url`. Existing pipelines
// see both, so both stay.
#[rustfmt::skip]
static INT_FLAGS: &[IntFlag] = &[
    IntFlag { flag: "--retries", value: |c| c.retries },
    IntFlag { flag: "--threads", value: |c| c.threads },
    IntFlag { flag: "--split-count", value: |c| c.split_count },
    IntFlag { flag: "--min-split", value: |c| c.min_split },
    IntFlag { flag: "--limit", value: |c| c.limit },
    IntFlag { flag: "--offset", value: |c| c.offset },
];

/// Maps a configuration to the ordered tokens of a `jfrog rt dl` invocation.
///
/// Pure and deterministic: the same configuration always yields the same
/// tokens in the same order. Composition never fails; a configuration without
/// credentials simply yields no auth flags, which [`validate`] already rejects.
///
/// [`validate`]: crate::core::validator::validate
pub fn compose(config: &Configuration) -> Vec<CommandToken> {
    let mut tokens = Vec::with_capacity(
        4 + STRING_FLAGS.len() + BOOL_FLAGS.len() + INT_FLAGS.len() + 6,
    );

    tokens.push(CommandToken::Program);
    tokens.extend(DOWNLOAD_SUBCOMMAND.iter().map(|s| CommandToken::literal(*s)));
    tokens.push(CommandToken::literal(format!("--url={}", config.url)));

    if config.retries != 0 {
        tokens.push(CommandToken::literal(format!("--retries={}", config.retries)));
    }

    if let Some(credentials) = config.credentials() {
        tokens.extend(credentials.placeholders());
    }

    for param in STRING_FLAGS {
        let value = (param.value)(config);
        if !value.is_empty() {
            tokens.push(CommandToken::literal(format!("{}={}", param.flag, value)));
        }
    }

    for param in BOOL_FLAGS {
        let value = parse_bool_or(param.default, (param.value)(config));
        tokens.push(CommandToken::literal(format!("{}={}", param.flag, value)));
    }

    for param in INT_FLAGS {
        let value = (param.value)(config);
        if value != 0 {
            tokens.push(CommandToken::literal(format!("{}={}", param.flag, value)));
        }
    }

    // Spec files and positional paths are not exclusive; the CLI sorts it out.
    if !config.spec.is_empty() {
        tokens.push(CommandToken::literal(format!("--spec={}", config.spec)));
        if !config.spec_vars.is_empty() {
            tokens.push(CommandToken::literal(format!(
                "--spec-vars='{}'",
                config.spec_vars
            )));
        }
    }

    tokens.push(CommandToken::literal(config.source_path.as_str()));
    if !config.target_path.is_empty() {
        tokens.push(CommandToken::literal(config.target_path.as_str()));
    }

    log::debug!("Composed {} command tokens.", tokens.len());
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::platform::PlatformProfile;

    fn base_config() -> Configuration {
        Configuration {
            url: "https://example/artifactory".to_string(),
            source_path: "libs/".to_string(),
            username: "u".into(),
            password: "p".into(),
            ..Default::default()
        }
    }

    fn words(config: &Configuration) -> Vec<String> {
        let line = PlatformProfile::posix().render(&compose(config));
        shlex::split(&line).unwrap()
    }

    fn count_prefix(words: &[String], prefix: &str) -> usize {
        words.iter().filter(|w| w.starts_with(prefix)).count()
    }

    #[test]
    fn test_compose_minimal_user_password() {
        // --- Execute ---
        let line = PlatformProfile::posix().render(&compose(&base_config()));

        // --- Assert ---
        assert_eq!(
            line,
            "jfrog rt dl --url=https://example/artifactory \
             --user $PLUGIN_USERNAME --password $PLUGIN_PASSWORD \
             --insecure-tls=false --flat=false --detailed-summary=false --recursive=true \
             --dry-run=false --explode=false --bypass-archive-inspection=false \
             --validate-symlinks=false --include-dirs=false --quiet=false --fail-no-op=false \
             libs/"
        );
    }

    #[test]
    fn test_compose_never_contains_secret_values() {
        let config = Configuration {
            username: "the-user".into(),
            password: "s3cr3t-pw".into(),
            ..base_config()
        };
        let line = PlatformProfile::posix().render(&compose(&config));
        assert!(!line.contains("s3cr3t-pw"));
        assert!(!line.contains("the-user"));
    }

    #[test]
    fn test_compose_single_credential_forms() {
        let api_key = Configuration {
            username: Default::default(),
            password: Default::default(),
            api_key: "key".into(),
            ..base_config()
        };
        let tokens = compose(&api_key);
        assert!(tokens.contains(&CommandToken::secret("--apikey", "PLUGIN_API_KEY")));
        assert_eq!(
            tokens
                .iter()
                .filter(|t| matches!(t, CommandToken::Secret { .. }))
                .count(),
            1
        );

        let access_token = Configuration {
            username: Default::default(),
            password: Default::default(),
            access_token: "tok".into(),
            ..base_config()
        };
        let tokens = compose(&access_token);
        assert!(tokens.contains(&CommandToken::secret(
            "--access-token",
            "PLUGIN_ACCESS_TOKEN"
        )));
        assert!(!tokens.contains(&CommandToken::secret("--apikey", "PLUGIN_API_KEY")));
    }

    #[test]
    fn test_compose_uses_highest_precedence_credentials_only() {
        let config = Configuration {
            api_key: "key".into(),
            access_token: "tok".into(),
            ..base_config()
        };
        let secrets: Vec<_> = compose(&config)
            .into_iter()
            .filter(|t| matches!(t, CommandToken::Secret { .. }))
            .collect();
        assert_eq!(
            secrets,
            vec![
                CommandToken::secret("--user", "PLUGIN_USERNAME"),
                CommandToken::secret("--password", "PLUGIN_PASSWORD"),
            ]
        );
    }

    #[test]
    fn test_compose_bool_flags_always_present() {
        let garbage = Configuration {
            insecure: Some(true),
            recursive: Some(false),
            quiet: None,
            ..base_config()
        };
        let words = words(&garbage);
        for param in BOOL_FLAGS {
            assert_eq!(
                count_prefix(&words, &format!("{}=", param.flag)),
                1,
                "{}",
                param.flag
            );
        }
        assert!(words.contains(&"--insecure-tls=true".to_string()));
        assert!(words.contains(&"--recursive=false".to_string()));
        assert!(words.contains(&"--quiet=false".to_string()));
    }

    #[test]
    fn test_compose_recursive_defaults_to_true() {
        let words = words(&base_config());
        assert!(words.contains(&"--recursive=true".to_string()));
        assert!(words.contains(&"--flat=false".to_string()));
    }

    #[test]
    fn test_compose_string_flags_omitted_when_empty() {
        let words = words(&base_config());
        for param in STRING_FLAGS {
            assert_eq!(count_prefix(&words, &format!("{}=", param.flag)), 0);
        }
    }

    #[test]
    fn test_compose_string_flags_verbatim_when_set() {
        // --- Setup ---
        let config = Configuration {
            server_id: "prod".to_string(),
            build_name: "nightly".to_string(),
            build_number: "42".to_string(),
            project: "core".to_string(),
            module: "api".to_string(),
            props: "a=1;b=2".to_string(),
            exclude_props: "stale=true".to_string(),
            build: "nightly/41".to_string(),
            bundle: "release/1.0".to_string(),
            retry_wait_time: "10s".to_string(),
            sync_deletes: "mirror/".to_string(),
            sort_by: "created".to_string(),
            sort_order: "desc".to_string(),
            gpg_key: "keys/public.asc".to_string(),
            exclusions: "*.tmp;*.log".to_string(),
            ..base_config()
        };

        // --- Execute ---
        let tokens = compose(&config);

        // --- Assert ---
        let mut last_position = None;
        for param in STRING_FLAGS {
            let value = (param.value)(&config);
            assert!(!value.is_empty(), "{} has no value in the fixture", param.flag);

            let prefix = format!("{}=", param.flag);
            let matching: Vec<usize> = tokens
                .iter()
                .enumerate()
                .filter(|(_, t)| matches!(t, CommandToken::Literal(w) if w.starts_with(&prefix)))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(matching.len(), 1, "{} emitted {} times", param.flag, matching.len());

            let position = matching.first().copied().unwrap();
            assert_eq!(
                tokens.get(position),
                Some(&CommandToken::literal(format!("{}={}", param.flag, value)))
            );
            assert!(
                last_position < Some(position),
                "{} is out of table order",
                param.flag
            );
            last_position = Some(position);
        }

        // Every fixture value is distinct, so no flag can be satisfied by another field.
        let mut values: Vec<&str> = STRING_FLAGS.iter().map(|p| (p.value)(&config)).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), STRING_FLAGS.len());
    }

    #[test]
    fn test_compose_int_flags_omitted_when_zero() {
        let words = words(&base_config());
        for param in INT_FLAGS {
            assert_eq!(count_prefix(&words, &format!("{}=", param.flag)), 0);
        }
    }

    #[test]
    fn test_compose_int_flags_when_set() {
        let config = Configuration {
            threads: 8,
            split_count: 3,
            min_split: 1024,
            limit: 10,
            offset: 5,
            ..base_config()
        };
        let words = words(&config);
        for expected in [
            "--threads=8",
            "--split-count=3",
            "--min-split=1024",
            "--limit=10",
            "--offset=5",
        ] {
            assert!(words.contains(&expected.to_string()), "{expected}");
        }
    }

    #[test]
    fn test_compose_retries_emitted_twice() {
        let config = Configuration {
            retries: 3,
            ..base_config()
        };
        let tokens = compose(&config);
        let retries = CommandToken::literal("--retries=3");
        assert_eq!(tokens.iter().filter(|t| **t == retries).count(), 2);
        // The dedicated one sits right after the URL, before credentials.
        assert_eq!(tokens.get(4), Some(&retries));
    }

    #[test]
    fn test_compose_spec_and_vars() {
        let config = Configuration {
            spec: "download.json".to_string(),
            spec_vars: "key1=val1;key2=val2".to_string(),
            target_path: "out/".to_string(),
            ..base_config()
        };
        let tokens = compose(&config);
        let tail: Vec<_> = tokens.iter().rev().take(4).rev().cloned().collect();
        assert_eq!(
            tail,
            vec![
                CommandToken::literal("--spec=download.json"),
                CommandToken::literal("--spec-vars='key1=val1;key2=val2'"),
                CommandToken::literal("libs/"),
                CommandToken::literal("out/"),
            ]
        );
    }

    #[test]
    fn test_compose_spec_vars_ignored_without_spec() {
        let config = Configuration {
            spec_vars: "key=val".to_string(),
            ..base_config()
        };
        let words = words(&config);
        assert_eq!(count_prefix(&words, "--spec"), 0);
    }

    #[test]
    fn test_compose_target_path_positional() {
        let without = compose(&base_config());
        assert_eq!(without.last(), Some(&CommandToken::literal("libs/")));

        let with = compose(&Configuration {
            target_path: "dest/".to_string(),
            ..base_config()
        });
        assert_eq!(with.last(), Some(&CommandToken::literal("dest/")));
        assert_eq!(with.len(), without.len() + 1);
    }

    #[test]
    fn test_compose_is_idempotent() {
        let config = Configuration {
            retries: 2,
            threads: 4,
            props: "x=y".to_string(),
            spec: "s.json".to_string(),
            flat: Some(true),
            ..base_config()
        };
        assert_eq!(compose(&config), compose(&config));
    }
}
