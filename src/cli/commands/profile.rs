use clap::{Arg, Command};

pub fn subcommand() -> Command {
    Command::new("profile")
        .about("Show or edit the signed-in user's profile")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("show").about("Show the profile"))
        .subcommand(
            Command::new("update")
                .about("Update profile fields; omitted fields keep their current value")
                .arg(Arg::new("first-name").long("first-name").help("First name"))
                .arg(Arg::new("last-name").long("last-name").help("Last name"))
                .arg(Arg::new("avatar-url").long("avatar-url").help("Avatar URL")),
        )
        .subcommand(
            Command::new("change-password")
                .about("Change the account password")
                .arg(
                    Arg::new("old-password")
                        .long("old-password")
                        .help("Current password")
                        .required(true),
                )
                .arg(
                    Arg::new("new-password")
                        .long("new-password")
                        .help("New password, at least 6 characters")
                        .required(true),
                )
                .arg(
                    Arg::new("confirm-password")
                        .long("confirm-password")
                        .help("New password again")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("upload-avatar")
                .about("Upload a new avatar image")
                .arg(Arg::new("file").help("Image file").required(true)),
        )
}
