use crate::{
    auth::guards::{self, Access},
    cli::actions::{Action, auth, groups, profile},
    session::TokenStore,
};
use anyhow::{Result, bail};
use tracing::debug;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the guard refuses the route or the action fails.
pub async fn execute(action: Action) -> Result<()> {
    let globals = match &action {
        Action::Auth(args) => &args.globals,
        Action::Groups(args) => &args.globals,
        Action::Profile(args) => &args.globals,
    };
    let tokens = globals.tokens();
    enforce(action.route().as_deref(), &tokens)?;

    let client = globals.client(tokens)?;
    match action {
        Action::Auth(args) => auth::execute(args.command, client).await,
        Action::Groups(args) => groups::execute(args.command, client).await,
        Action::Profile(args) => profile::execute(args.command, client).await,
    }
}

fn enforce(route: Option<&str>, tokens: &TokenStore) -> Result<()> {
    let Some(route) = route else {
        return Ok(());
    };
    let Some(guard) = guards::guard_for(route) else {
        return Ok(());
    };

    match guard.check(tokens) {
        Access::Render => {
            debug!(route, "route allowed");
            Ok(())
        }
        Access::Redirect(guards::LOGIN_ROUTE) => {
            bail!("not signed in, run `groupdesk login` first")
        }
        Access::Redirect(target) => {
            bail!("already signed in (landing page {target}), run `groupdesk logout` first")
        }
    }
}
