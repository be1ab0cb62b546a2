use crate::{
    auth::{RegistrationForm, ResetPasswordForm},
    cli::{
        actions::{Action, auth, groups, profile},
        globals::GlobalArgs,
    },
    groups::{SortField, SortOrder},
    profile::ChangePasswordForm,
};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn optional(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::from_matches(matches)?;

    let (name, sub_m) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("no command given, see --help"))?;

    let action = match name {
        "groups" => Action::Groups(groups::Args {
            globals,
            command: groups_command(sub_m)?,
        }),
        "profile" => Action::Profile(profile::Args {
            globals,
            command: profile_command(sub_m)?,
        }),
        _ => Action::Auth(auth::Args {
            globals,
            command: auth_command(name, sub_m)?,
        }),
    };

    Ok(action)
}

fn auth_command(name: &str, matches: &ArgMatches) -> Result<auth::Command> {
    let command = match name {
        "login" => auth::Command::Login {
            username: required(matches, "username")?,
            password: SecretString::from(required(matches, "password")?),
            remember_me: matches.get_flag("remember"),
        },
        "logout" => auth::Command::Logout,
        "whoami" => auth::Command::WhoAmI,
        "register" => auth::Command::Register(RegistrationForm {
            user_name: required(matches, "username")?,
            email: required(matches, "email")?,
            first_name: required(matches, "first-name")?,
            last_name: required(matches, "last-name")?,
            password: required(matches, "password")?,
            confirm_password: required(matches, "confirm-password")?,
        }),
        "resend-confirmation" => auth::Command::ResendConfirmation {
            email: required(matches, "email")?,
        },
        "password" => {
            let (name, sub_m) = matches
                .subcommand()
                .ok_or_else(|| anyhow!("missing password subcommand"))?;
            match name {
                "request-reset" => auth::Command::RequestReset {
                    email: required(sub_m, "email")?,
                },
                "resend-reset" => auth::Command::ResendReset {
                    email: required(sub_m, "email")?,
                },
                "reset" => auth::Command::Reset(ResetPasswordForm {
                    token: required(sub_m, "token")?,
                    new_password: required(sub_m, "new-password")?,
                    confirm_password: required(sub_m, "confirm-password")?,
                }),
                other => return Err(anyhow!("unknown password subcommand: {other}")),
            }
        }
        other => return Err(anyhow!("unknown command: {other}")),
    };

    Ok(command)
}

fn groups_command(matches: &ArgMatches) -> Result<groups::Command> {
    let (name, sub_m) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("missing groups subcommand"))?;

    let command = match name {
        "list" => groups::Command::List {
            page: sub_m.get_one::<u32>("page").copied().unwrap_or(1),
            size: sub_m
                .get_one::<u32>("size")
                .copied()
                .unwrap_or(crate::groups::types::DEFAULT_PAGE_SIZE),
            search: optional(sub_m, "search"),
            sort: sub_m
                .get_one::<String>("sort")
                .and_then(|value| SortField::parse(value))
                .unwrap_or_default(),
            order: sub_m
                .get_one::<String>("order")
                .and_then(|value| SortOrder::parse(value))
                .unwrap_or_default(),
            min_members: sub_m.get_one::<u32>("min-members").copied(),
            max_members: sub_m.get_one::<u32>("max-members").copied(),
        },
        "create" => groups::Command::Create {
            name: required(sub_m, "name")?,
        },
        "edit" => groups::Command::Edit {
            id: sub_m
                .get_one::<u64>("id")
                .copied()
                .context("missing required argument: <id>")?,
            name: required(sub_m, "name")?,
            total_member: sub_m.get_one::<u32>("total-member").copied(),
        },
        "delete" => groups::Command::Delete {
            ids: sub_m
                .get_many::<u64>("ids")
                .map(|ids| ids.copied().collect())
                .unwrap_or_default(),
        },
        other => return Err(anyhow!("unknown groups subcommand: {other}")),
    };

    Ok(command)
}

fn profile_command(matches: &ArgMatches) -> Result<profile::Command> {
    let (name, sub_m) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("missing profile subcommand"))?;

    let command = match name {
        "show" => profile::Command::Show,
        "update" => profile::Command::Update {
            first_name: optional(sub_m, "first-name"),
            last_name: optional(sub_m, "last-name"),
            avatar_url: optional(sub_m, "avatar-url"),
        },
        "change-password" => profile::Command::ChangePassword(ChangePasswordForm {
            old_password: required(sub_m, "old-password")?,
            new_password: required(sub_m, "new-password")?,
            confirm_new_password: required(sub_m, "confirm-password")?,
        }),
        "upload-avatar" => profile::Command::UploadAvatar {
            file: PathBuf::from(required(sub_m, "file")?),
        },
        other => return Err(anyhow!("unknown profile subcommand: {other}")),
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    fn action_from(args: &[&str]) -> Result<Action> {
        let matches = commands::new().try_get_matches_from(args)?;
        handler(&matches)
    }

    #[test]
    fn test_login_action() -> Result<()> {
        let action = action_from(&[
            "groupdesk",
            "login",
            "--username",
            "bob123",
            "--password",
            "secret1",
            "-r",
        ])?;
        match action {
            Action::Auth(auth::Args {
                command:
                    auth::Command::Login {
                        username,
                        remember_me,
                        ..
                    },
                ..
            }) => {
                assert_eq!(username, "bob123");
                assert!(remember_me);
            }
            other => panic!("unexpected action {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_groups_list_action() -> Result<()> {
        let action = action_from(&[
            "groupdesk",
            "groups",
            "list",
            "--page",
            "2",
            "--sort",
            "totalMember",
            "--order",
            "desc",
            "--min-members",
            "3",
        ])?;
        match action {
            Action::Groups(groups::Args {
                command:
                    groups::Command::List {
                        page,
                        sort,
                        order,
                        min_members,
                        max_members,
                        ..
                    },
                ..
            }) => {
                assert_eq!(page, 2);
                assert_eq!(sort, SortField::TotalMember);
                assert_eq!(order, SortOrder::Desc);
                assert_eq!(min_members, Some(3));
                assert_eq!(max_members, None);
            }
            other => panic!("unexpected action {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_password_reset_action() -> Result<()> {
        let action = action_from(&[
            "groupdesk",
            "password",
            "reset",
            "--token",
            "t-1",
            "--new-password",
            "secret2",
            "--confirm-password",
            "secret2",
        ])?;
        assert_eq!(action.route(), Some("/reset-password/t-1".to_string()));
        Ok(())
    }

    #[test]
    fn test_profile_update_action() -> Result<()> {
        let action = action_from(&["groupdesk", "profile", "update", "--first-name", "Robert"])?;
        assert_eq!(action.route(), Some("/profile".to_string()));
        match action {
            Action::Profile(profile::Args {
                command:
                    profile::Command::Update {
                        first_name,
                        last_name,
                        ..
                    },
                ..
            }) => {
                assert_eq!(first_name, Some("Robert".to_string()));
                assert_eq!(last_name, None);
            }
            other => panic!("unexpected action {other:?}"),
        }
        Ok(())
    }
}
