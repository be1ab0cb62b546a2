use clap::{Arg, Command};

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("api-url")
                .short('a')
                .long("api-url")
                .help("Base URL of the Groupdesk API, example: https://api.groupdesk.tld")
                .env("GROUPDESK_API_BASE_URL")
                .global(true)
                .default_value("http://localhost:8080"),
        )
        .arg(
            Arg::new("state-dir")
                .long("state-dir")
                .help("Directory holding the remembered session (session.json)")
                .env("GROUPDESK_STATE_DIR")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Per-request timeout in seconds")
                .env("GROUPDESK_TIMEOUT_SECONDS")
                .global(true)
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("recovery-policy")
                .long("recovery-policy")
                .help("What to do when the API rejects the stored token")
                .long_help(
                    "What to do when the API rejects the stored token. hard-invalidate clears the session on 401; silent-refresh exchanges the refresh token on 403 and replays the request once.",
                )
                .env("GROUPDESK_RECOVERY_POLICY")
                .global(true)
                .default_value("hard-invalidate")
                .value_parser(["hard-invalidate", "silent-refresh"]),
        )
        .arg(
            Arg::new("refresh-path")
                .long("refresh-path")
                .help("Endpoint used by the silent-refresh policy")
                .env("GROUPDESK_REFRESH_PATH")
                .global(true)
                .default_value(crate::client::config::DEFAULT_REFRESH_PATH),
        )
}
