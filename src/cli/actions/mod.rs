pub mod auth;
pub mod groups;
pub mod profile;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

#[derive(Debug)]
pub enum Action {
    Auth(auth::Args),
    Groups(groups::Args),
    Profile(profile::Args),
}

impl Action {
    /// Route the action stands for; the matching navigation guard runs first.
    #[must_use]
    pub fn route(&self) -> Option<String> {
        match self {
            Self::Auth(args) => args.command.route(),
            Self::Groups(_) => Some(crate::auth::guards::MANAGE_GROUP_ROUTE.to_string()),
            Self::Profile(_) => Some(crate::auth::guards::PROFILE_ROUTE.to_string()),
        }
    }

    /// Execute the action.
    /// # Errors
    /// Returns an error if the guard refuses the route or the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
