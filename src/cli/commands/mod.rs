mod auth;
mod connection;
mod groups;
mod logging;
mod profile;

pub use logging::validator_log_level;

use clap::{
    ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("groupdesk")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true);

    let command = connection::with_args(command);
    let command = logging::with_args(command);
    let command = auth::with_subcommands(command);
    command
        .subcommand(groups::subcommand())
        .subcommand(profile::subcommand())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "groupdesk");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_debug_assert() {
        new().debug_assert();
    }

    #[test]
    fn test_login_args() {
        temp_env::with_vars(
            [
                ("GROUPDESK_USERNAME", None::<&str>),
                ("GROUPDESK_PASSWORD", None),
                ("GROUPDESK_API_BASE_URL", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "groupdesk",
                    "--api-url",
                    "https://api.groupdesk.tld",
                    "login",
                    "-u",
                    "bob123",
                    "-p",
                    "secret1",
                    "--remember",
                ]);

                assert_eq!(
                    matches.get_one::<String>("api-url").cloned(),
                    Some("https://api.groupdesk.tld".to_string())
                );
                let (name, sub_m) = matches.subcommand().expect("missing subcommand");
                assert_eq!(name, "login");
                assert_eq!(
                    sub_m.get_one::<String>("username").cloned(),
                    Some("bob123".to_string())
                );
                assert!(sub_m.get_flag("remember"));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("GROUPDESK_API_BASE_URL", Some("https://api.groupdesk.tld")),
                ("GROUPDESK_STATE_DIR", Some("/tmp/groupdesk")),
                ("GROUPDESK_TIMEOUT_SECONDS", Some("30")),
                ("GROUPDESK_RECOVERY_POLICY", Some("silent-refresh")),
                ("GROUPDESK_REFRESH_PATH", Some("/auth/refresh")),
                ("GROUPDESK_LOG_LEVEL", Some("info")),
                ("GROUPDESK_LOG_JSON", Some("true")),
            ],
            || {
                let matches = new().get_matches_from(vec!["groupdesk", "whoami"]);
                assert_eq!(
                    matches.get_one::<String>("api-url").cloned(),
                    Some("https://api.groupdesk.tld".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("state-dir").cloned(),
                    Some("/tmp/groupdesk".to_string())
                );
                assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(30));
                assert_eq!(
                    matches.get_one::<String>("recovery-policy").cloned(),
                    Some("silent-refresh".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("refresh-path").cloned(),
                    Some("/auth/refresh".to_string())
                );
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
                assert!(matches.get_flag("log-json"));
            },
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("GROUPDESK_API_BASE_URL", None::<&str>),
                ("GROUPDESK_TIMEOUT_SECONDS", None),
                ("GROUPDESK_RECOVERY_POLICY", None),
                ("GROUPDESK_LOG_JSON", None),
                ("GROUPDESK_LOG_LEVEL", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["groupdesk", "logout"]);
                assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(10));
                assert_eq!(
                    matches.get_one::<String>("recovery-policy").cloned(),
                    Some("hard-invalidate".to_string())
                );
                assert!(!matches.get_flag("log-json"));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(0));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("GROUPDESK_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["groupdesk", "whoami"]);
                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("GROUPDESK_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["groupdesk".to_string(), "whoami".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_groups_delete_ids() {
        let matches = new().get_matches_from(vec!["groupdesk", "groups", "delete", "4,7", "9"]);
        let (_, groups_m) = matches.subcommand().expect("missing subcommand");
        let (name, delete_m) = groups_m.subcommand().expect("missing groups subcommand");
        assert_eq!(name, "delete");
        let ids: Vec<u64> = delete_m
            .get_many::<u64>("ids")
            .expect("missing ids")
            .copied()
            .collect();
        assert_eq!(ids, vec![4, 7, 9]);
    }

    #[test]
    fn test_unknown_recovery_policy() {
        let result = new().try_get_matches_from(vec![
            "groupdesk",
            "--recovery-policy",
            "retry-forever",
            "whoami",
        ]);
        assert_eq!(
            result.map_err(|e| e.kind()),
            Err(clap::error::ErrorKind::InvalidValue)
        );
    }
}
