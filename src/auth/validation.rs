//! Client-side field checks. Failures are reported per field and never reach
//! the network.

use super::types::{RegistrationForm, ResetPasswordForm};
use crate::client::{ApiError, ValidationErrors};
use regex::Regex;

const NAME_MIN: usize = 6;
const NAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 800;
const PERSON_NAME_MAX: usize = 50;
pub const GROUP_NAME_MAX: usize = 50;

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

fn only_letters(value: &str) -> bool {
    Regex::new(r"^[A-Za-z]+$").is_ok_and(|re| re.is_match(value))
}

fn length(value: &str) -> usize {
    value.chars().count()
}

fn check_user_name(errors: &mut ValidationErrors, user_name: &str) {
    let user_name = user_name.trim();
    if user_name.is_empty() {
        errors.push("userName", "Username is required");
    } else if length(user_name) < NAME_MIN {
        errors.push("userName", "Username must be at least 6 characters");
    } else if length(user_name) > NAME_MAX {
        errors.push("userName", "Username must be at most 50 characters");
    }
}

fn check_password(errors: &mut ValidationErrors, field: &'static str, password: &str) {
    if password.is_empty() {
        errors.push(field, "Password is required");
    } else if length(password) < PASSWORD_MIN {
        errors.push(field, "Password must be at least 6 characters");
    } else if length(password) > PASSWORD_MAX {
        errors.push(field, "Password is too long");
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !valid_email(email) {
        errors.push("email", "Invalid email");
    }
}

fn check_person_name(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, format!("{label} is required"));
    } else if !only_letters(value) {
        errors.push(field, format!("{label} can only contain letters"));
    } else if length(value) > PERSON_NAME_MAX {
        errors.push(field, format!("{label} must be at most 50 characters"));
    }
}

/// # Errors
/// Returns `ApiError::Validation` listing every failing field.
pub fn login(user_name: &str, password: &str) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::default();
    check_user_name(&mut errors, user_name);
    check_password(&mut errors, "password", password);
    errors.into_result()
}

/// # Errors
/// Returns `ApiError::Validation` listing every failing field.
pub fn registration(form: &RegistrationForm) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::default();
    check_user_name(&mut errors, &form.user_name);

    check_email(&mut errors, &form.email);
    if errors.message_for("email").is_none() {
        let email_length = length(form.email.trim());
        if email_length < NAME_MIN {
            errors.push("email", "Email must be at least 6 characters");
        } else if email_length > NAME_MAX {
            errors.push("email", "Email must be at most 50 characters");
        }
    }

    check_person_name(&mut errors, "firstName", "First name", &form.first_name);
    check_person_name(&mut errors, "lastName", "Last name", &form.last_name);
    check_password(&mut errors, "password", &form.password);
    if form.confirm_password != form.password {
        errors.push("confirmPassword", "Passwords must match");
    }
    errors.into_result()
}

/// # Errors
/// Returns `ApiError::Validation` when the address is missing or malformed.
pub fn email(email: &str) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::default();
    check_email(&mut errors, email);
    errors.into_result()
}

/// # Errors
/// Returns `ApiError::Validation` listing every failing field.
pub fn reset_password(form: &ResetPasswordForm) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::default();
    if form.token.trim().is_empty() {
        errors.push("token", "Reset link is missing its token");
    }
    check_password(&mut errors, "newPassword", &form.new_password);
    if form.confirm_password.is_empty() {
        errors.push("confirmPassword", "Confirm your new password");
    } else if form.confirm_password != form.new_password {
        errors.push("confirmPassword", "Passwords must match");
    }
    errors.into_result()
}

/// # Errors
/// Returns `ApiError::Validation` listing every failing field.
pub fn change_password(
    old_password: &str,
    new_password: &str,
    confirm_new_password: &str,
) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::default();
    if old_password.is_empty() {
        errors.push("oldPassword", "Current password is required.");
    }
    if new_password.is_empty() {
        errors.push("newPassword", "New password is required.");
    } else if length(new_password) < PASSWORD_MIN {
        errors.push("newPassword", "Password must be at least 6 characters");
    }
    if confirm_new_password != new_password {
        errors.push("confirmNewPassword", "Passwords do not match!");
    }
    errors.into_result()
}

/// # Errors
/// Returns `ApiError::Validation` for blank or overlong names.
pub fn group_name(name: &str) -> Result<(), ApiError> {
    let mut errors = ValidationErrors::default();
    if name.trim().is_empty() {
        errors.push("name", "Group name cannot be empty");
    } else if length(name) > GROUP_NAME_MAX {
        errors.push("name", "Group name must be 50 characters or less");
    }
    errors.into_result()
}
