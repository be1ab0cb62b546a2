use crate::{
    auth::{
        AuthService, LoginFailure, LoginFlow, LoginState, RegistrationForm, ResetPasswordForm,
        guards,
    },
    cli::globals::GlobalArgs,
    client::ApiClient,
    session::StorageScope,
};
use anyhow::{Result, bail};
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

#[derive(Debug)]
pub enum Command {
    Login {
        username: String,
        password: SecretString,
        remember_me: bool,
    },
    Logout,
    WhoAmI,
    Register(RegistrationForm),
    RequestReset { email: String },
    ResendReset { email: String },
    Reset(ResetPasswordForm),
    ResendConfirmation { email: String },
}

impl Command {
    /// Screen this command stands in for. Reset-link requests live on the login screen.
    #[must_use]
    pub fn route(&self) -> Option<String> {
        match self {
            Self::Login { .. }
            | Self::RequestReset { .. }
            | Self::ResendReset { .. }
            | Self::ResendConfirmation { .. } => Some(guards::LOGIN_ROUTE.to_string()),
            Self::Register(_) => Some(guards::REGISTER_ROUTE.to_string()),
            Self::Reset(form) => Some(format!(
                "{}/{}",
                guards::RESET_PASSWORD_ROUTE,
                form.token.trim()
            )),
            Self::Logout | Self::WhoAmI => None,
        }
    }
}

/// Handle the auth actions
/// # Errors
/// Returns an error if the request is rejected or the session cannot be stored.
pub async fn execute(command: Command, client: ApiClient) -> Result<()> {
    let auth = AuthService::new(client);

    match command {
        Command::Login {
            username,
            password,
            remember_me,
        } => login(&auth, &username, &password, remember_me).await?,
        Command::Logout => {
            auth.logout().await;
            println!("Signed out.");
        }
        Command::WhoAmI => whoami(&auth),
        Command::Register(form) => {
            auth.register(&form).await?;
            println!(
                "Account created. A confirmation email was sent to {}.",
                form.email.trim()
            );
        }
        Command::RequestReset { email } => {
            print_message(
                &auth.request_reset_password(&email).await?,
                "Reset password link has been sent to email. Please check email or spam!",
            );
        }
        Command::ResendReset { email } => {
            print_message(
                &auth.resend_reset_password(&email).await?,
                "Reset password link sent again.",
            );
        }
        Command::Reset(form) => {
            print_message(
                &auth.reset_password(&form).await?,
                "Password updated. You can sign in with the new password.",
            );
        }
        Command::ResendConfirmation { email } => {
            print_message(
                &auth.resend_confirmation_email(&email).await?,
                "Confirmation email sent.",
            );
        }
    }

    Ok(())
}

async fn login(
    auth: &AuthService,
    username: &str,
    password: &SecretString,
    remember_me: bool,
) -> Result<()> {
    if !remember_me {
        warn!("signing in without --remember; the session ends with this process");
    }

    let mut flow = LoginFlow::new();
    let state = flow
        .submit(auth, username, password.expose_secret(), remember_me)
        .await?;

    match state {
        LoginState::Success(credential) => {
            let name = credential
                .user()
                .map_or(username, |user| user.user_name.as_str());
            for line in sign_in_message(name, remember_me) {
                println!("{line}");
            }
            Ok(())
        }
        LoginState::Failed(LoginFailure::InactiveAccount { email }) => bail!(
            "Your account is not activated. Please check the inbox of {email}, or run `groupdesk resend-confirmation --email {email}`."
        ),
        LoginState::Failed(LoginFailure::InvalidCredentials(message)) => {
            bail!("Invalid username or password: {message}")
        }
        LoginState::Failed(LoginFailure::Network(message)) => bail!("{message}"),
        LoginState::Idle | LoginState::Submitting => bail!("login did not complete"),
    }
}

fn whoami(auth: &AuthService) {
    let Some(credential) = auth.current_user() else {
        println!("Not signed in.");
        return;
    };

    let scope = match auth.tokens().scope() {
        Some(StorageScope::Durable) => "remembered",
        _ => "this process only",
    };
    match credential.user() {
        Some(user) => println!(
            "{} <{}> {} {} [{}] ({scope})",
            user.user_name, user.email, user.first_name, user.last_name, user.role
        ),
        None => println!("Signed in ({scope})"),
    }
}

fn print_message(server_message: &str, fallback: &str) {
    if server_message.trim().is_empty() {
        println!("{fallback}");
    } else {
        println!("{}", server_message.trim());
    }
}

/// A session-only login dies with this process, so say that before anything else.
fn sign_in_message(name: &str, remember_me: bool) -> Vec<String> {
    if remember_me {
        vec![format!("Signed in as {name}.")]
    } else {
        vec![
            "Session not kept: it ends when this command exits. Sign in with --remember to stay signed in.".to_string(),
            format!("Credentials for {name} were accepted."),
        ]
    }
}
