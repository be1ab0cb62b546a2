//! Authentication flows: login/logout, registration, password reset, the
//! login state machine and the navigation guards built on the token store.

pub mod client;
pub mod guards;
pub mod state;
pub mod types;
pub mod validation;

pub use client::AuthService;
pub use guards::{Access, Guard, guard_for};
pub use state::{LoginFailure, LoginFlow, LoginState};
pub use types::{RegistrationForm, ResetPasswordForm};
