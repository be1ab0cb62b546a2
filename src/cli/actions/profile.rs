use crate::{
    cli::globals::GlobalArgs,
    client::ApiClient,
    profile::{ChangePasswordForm, Profile, ProfileService, UpdateProfileRequest},
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

#[derive(Debug)]
pub enum Command {
    Show,
    Update {
        first_name: Option<String>,
        last_name: Option<String>,
        avatar_url: Option<String>,
    },
    ChangePassword(ChangePasswordForm),
    UploadAvatar {
        file: PathBuf,
    },
}

/// Handle the profile actions
/// # Errors
/// Returns an error if validation fails, the file cannot be read, or the API rejects the request.
pub async fn execute(command: Command, client: ApiClient) -> Result<()> {
    let profiles = ProfileService::new(client);

    match command {
        Command::Show => print_profile(&profiles.profile().await?),
        Command::Update {
            first_name,
            last_name,
            avatar_url,
        } => {
            let current = profiles.profile().await?;
            let mut update = UpdateProfileRequest::from_profile(&current);
            if let Some(first_name) = first_name {
                update.first_name = first_name;
            }
            if let Some(last_name) = last_name {
                update.last_name = last_name;
            }
            if avatar_url.is_some() {
                update.avatar_url = avatar_url;
            }
            let updated = profiles.update_profile(&update).await?;
            print_profile(&updated);
        }
        Command::ChangePassword(form) => {
            profiles.change_password(&form).await?;
            println!("Password changed successfully!");
        }
        Command::UploadAvatar { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("avatar")
                .to_string();
            let url = profiles
                .upload_avatar(&file_name, image_mime(&file), bytes)
                .await?;
            println!("Avatar updated successfully! {url}");
        }
    }

    Ok(())
}

fn image_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn print_profile(profile: &Profile) {
    println!("Username:   {}", profile.user_name);
    println!("Email:      {}", profile.email);
    println!("First name: {}", profile.first_name);
    println!("Last name:  {}", profile.last_name);
    println!("Role:       {}", profile.role);
    println!("Avatar:     {}", profile.avatar_url);
}
