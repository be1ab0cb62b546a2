use clap::{Arg, ArgAction, Command};

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email address")
        .env("GROUPDESK_EMAIL")
        .required(true)
}

fn password_arg(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(long)
        .help(help)
        .hide_env_values(true)
        .required(true)
}

pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Account username")
                        .env("GROUPDESK_USERNAME")
                        .required(true),
                )
                .arg(
                    password_arg("password", "password", "Account password")
                        .short('p')
                        .env("GROUPDESK_PASSWORD"),
                )
                .arg(
                    Arg::new("remember")
                        .short('r')
                        .long("remember")
                        .help("Keep the session in the state directory after this process exits")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("logout").about("End the session and forget the stored token"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Username, 6 to 50 characters")
                        .required(true),
                )
                .arg(email_arg())
                .arg(
                    Arg::new("first-name")
                        .long("first-name")
                        .help("First name, letters only")
                        .required(true),
                )
                .arg(
                    Arg::new("last-name")
                        .long("last-name")
                        .help("Last name, letters only")
                        .required(true),
                )
                .arg(password_arg("password", "password", "Password, 6 to 800 characters"))
                .arg(password_arg(
                    "confirm-password",
                    "confirm-password",
                    "Password again",
                )),
        )
        .subcommand(
            Command::new("password")
                .about("Password reset flow")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("request-reset")
                        .about("Email a password reset link")
                        .arg(email_arg()),
                )
                .subcommand(
                    Command::new("resend-reset")
                        .about("Send the password reset link again")
                        .arg(email_arg()),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Set a new password with the token from the reset link")
                        .arg(
                            Arg::new("token")
                                .short('t')
                                .long("token")
                                .help("Token from the reset link")
                                .required(true),
                        )
                        .arg(password_arg("new-password", "new-password", "New password"))
                        .arg(password_arg(
                            "confirm-password",
                            "confirm-password",
                            "New password again",
                        )),
                ),
        )
        .subcommand(
            Command::new("resend-confirmation")
                .about("Send the account confirmation email again")
                .arg(email_arg()),
        )
}
