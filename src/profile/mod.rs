//! Profile read/update, password change and avatar upload.

pub mod client;
pub mod types;

pub use client::ProfileService;
pub use types::{ChangePasswordForm, DEFAULT_AVATAR, Profile, UpdateProfileRequest};
