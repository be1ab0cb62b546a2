//! Navigation guards. They only gate what the client shows; the API remains
//! the real access control. Each check reads the token store afresh.

use crate::session::TokenStore;

pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";
pub const RESET_PASSWORD_ROUTE: &str = "/reset-password";
pub const MANAGE_GROUP_ROUTE: &str = "/manage-group";
pub const PROFILE_ROUTE: &str = "/profile";

/// Where signed-in users land.
pub const AUTHENTICATED_LANDING: &str = MANAGE_GROUP_ROUTE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Render,
    Redirect(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Only for signed-out users (login, register, password reset).
    PublicOnly,
    Protected,
}

impl Guard {
    #[must_use]
    pub fn check(self, tokens: &TokenStore) -> Access {
        match self {
            Self::PublicOnly => public_only(tokens),
            Self::Protected => protected(tokens),
        }
    }
}

#[must_use]
pub fn public_only(tokens: &TokenStore) -> Access {
    if tokens.is_authenticated() {
        Access::Redirect(AUTHENTICATED_LANDING)
    } else {
        Access::Render
    }
}

#[must_use]
pub fn protected(tokens: &TokenStore) -> Access {
    if tokens.is_authenticated() {
        Access::Render
    } else {
        Access::Redirect(LOGIN_ROUTE)
    }
}

/// Guard for a known route, `None` for paths no guard covers.
#[must_use]
pub fn guard_for(path: &str) -> Option<Guard> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');

    match path {
        LOGIN_ROUTE | REGISTER_ROUTE => Some(Guard::PublicOnly),
        MANAGE_GROUP_ROUTE | PROFILE_ROUTE => Some(Guard::Protected),
        _ => path
            .strip_prefix(RESET_PASSWORD_ROUTE)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|token| !token.is_empty() && !token.contains('/'))
            .map(|_| Guard::PublicOnly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credential, StorageScope, in_memory};

    #[test]
    fn guards_follow_store_state() {
        let tokens = in_memory();
        assert_eq!(public_only(&tokens), Access::Render);
        assert_eq!(protected(&tokens), Access::Redirect(LOGIN_ROUTE));

        tokens
            .set(&Credential::new("abc", None), StorageScope::SessionOnly)
            .expect("Failed to store credential");
        assert_eq!(public_only(&tokens), Access::Redirect(MANAGE_GROUP_ROUTE));
        assert_eq!(protected(&tokens), Access::Render);

        tokens.remove();
        assert_eq!(Guard::Protected.check(&tokens), Access::Redirect(LOGIN_ROUTE));
    }

    #[test]
    fn test_guard_for() {
        assert_eq!(guard_for("/login"), Some(Guard::PublicOnly));
        assert_eq!(guard_for("/register/"), Some(Guard::PublicOnly));
        assert_eq!(guard_for("/reset-password/t-1"), Some(Guard::PublicOnly));
        assert_eq!(guard_for("/reset-password"), None);
        assert_eq!(guard_for("/manage-group?page=2"), Some(Guard::Protected));
        assert_eq!(guard_for("/profile"), Some(Guard::Protected));
        assert_eq!(guard_for("/about"), None);
    }
}
