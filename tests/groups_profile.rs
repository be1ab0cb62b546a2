mod common;

use anyhow::Result;
use common::{can_bind_localhost, client, sign_in, temp_store};
use groupdesk::{
    client::{ApiError, RecoveryPolicy},
    groups::{GroupListState, GroupQuery, GroupService, Sort, SortField, SortOrder},
    profile::{ChangePasswordForm, DEFAULT_AVATAR, ProfileService, UpdateProfileRequest},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

#[tokio::test]
async fn group_list_query_string() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups"))
        .and(query_param("page", "2"))
        .and(query_param("size", "10"))
        .and(query_param("search", "ops"))
        .and(query_param("sort", "totalMember,desc"))
        .and(query_param("maxTotalMember", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"id": 11, "name": "Ops", "totalMember": 30},
                {"id": 12, "name": "Ops EU", "totalMember": 12}
            ],
            "totalPages": 2,
            "totalElements": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, tokens) = temp_store()?;
    sign_in(&tokens, "abc", None)?;
    let groups = GroupService::new(client(&server, tokens, RecoveryPolicy::default())?);

    let page = groups
        .list(&GroupQuery {
            page: 2,
            search: "ops".to_string(),
            sort: Sort {
                field: SortField::TotalMember,
                order: SortOrder::Desc,
            },
            min_members: Some(0),
            max_members: Some(40),
            ..GroupQuery::default()
        })
        .await?;
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.content.len(), 2);

    let requests = server.received_requests().await.unwrap_or_default();
    let query = requests
        .first()
        .and_then(|request| request.url.query())
        .unwrap_or_default()
        .to_string();
    assert!(!query.contains("minTotalMember"));
    Ok(())
}

#[tokio::test]
async fn list_state_round_trip_with_delete() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"id": 21, "name": "Last", "totalMember": 1}],
            "totalPages": 3,
            "totalElements": 21
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/groups/21"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, tokens) = temp_store()?;
    sign_in(&tokens, "abc", None)?;
    let groups = GroupService::new(client(&server, tokens, RecoveryPolicy::default())?);

    let mut state = GroupListState::new();
    state.set_page(3);
    state.apply_page(groups.list(&state.query()).await?);
    state.toggle_select_all();

    groups.delete(&state.selected_ids()).await?;
    state.finish_delete();
    assert_eq!(state.current_page, 2);
    assert!(state.selected.is_empty());
    Ok(())
}

#[tokio::test]
async fn group_create_edit_delete() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groups"))
        .and(body_json(json!({"name": "Platform"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/groups/7"))
        .and(body_json(json!({"name": "Platform team", "totalMember": 8})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/groups/4,7,9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, tokens) = temp_store()?;
    sign_in(&tokens, "abc", None)?;
    let groups = GroupService::new(client(&server, tokens, RecoveryPolicy::default())?);

    groups.create("Platform").await?;
    groups.edit(7, "Platform team", Some(8)).await?;
    groups.delete(&[4, 7, 9]).await?;

    assert!(matches!(groups.create("   ").await, Err(ApiError::Validation(_))));
    assert!(matches!(
        groups.edit(7, &"x".repeat(51), None).await,
        Err(ApiError::Validation(_))
    ));
    let err = groups.delete(&[]).await.err();
    assert!(matches!(
        err,
        Some(ApiError::Validation(errors)) if errors.message_for("ids") == Some("No groups selected")
    ));
    Ok(())
}

#[tokio::test]
async fn profile_defaults_missing_avatar() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "avatarUrl": null,
            "userName": "bob123",
            "email": "bob@example.com",
            "firstName": "Bob",
            "lastName": "Builder",
            "role": "USER"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/users/profile"))
        .and(body_json(json!({
            "firstName": "Robert",
            "lastName": "Builder",
            "avatarUrl": DEFAULT_AVATAR
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "avatarUrl": DEFAULT_AVATAR,
            "userName": "bob123",
            "email": "bob@example.com",
            "firstName": "Robert",
            "lastName": "Builder",
            "role": "USER"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, tokens) = temp_store()?;
    sign_in(&tokens, "abc", None)?;
    let profiles = ProfileService::new(client(&server, tokens, RecoveryPolicy::default())?);

    let profile = profiles.profile().await?;
    assert_eq!(profile.avatar_url, DEFAULT_AVATAR);

    let mut update = UpdateProfileRequest::from_profile(&profile);
    update.first_name = "Robert".to_string();
    let updated = profiles.update_profile(&update).await?;
    assert_eq!(updated.first_name, "Robert");
    Ok(())
}

#[tokio::test]
async fn change_password_uses_stored_email() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/changePassword"))
        .and(body_json(json!({
            "email": "bob@example.com",
            "oldPassword": "secret1",
            "newPassword": "secret2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Password changed"))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, tokens) = temp_store()?;
    sign_in(&tokens, "abc", None)?;
    let profiles = ProfileService::new(client(&server, tokens, RecoveryPolicy::default())?);

    let message = profiles
        .change_password(&ChangePasswordForm {
            old_password: "secret1".to_string(),
            new_password: "secret2".to_string(),
            confirm_new_password: "secret2".to_string(),
        })
        .await?;
    assert_eq!(message, "Password changed");

    let err = profiles
        .change_password(&ChangePasswordForm {
            old_password: "secret1".to_string(),
            new_password: "secret2".to_string(),
            confirm_new_password: "secret3".to_string(),
        })
        .await
        .err();
    assert!(matches!(
        err,
        Some(ApiError::Validation(errors))
            if errors.message_for("confirmNewPassword") == Some("Passwords do not match!")
    ));
    Ok(())
}

#[tokio::test]
async fn avatar_upload_is_multipart() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files/image"))
        .respond_with(ResponseTemplate::new(200).set_body_string("avatars/bob.png"))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, tokens) = temp_store()?;
    sign_in(&tokens, "abc", None)?;
    let profiles = ProfileService::new(client(&server, tokens, RecoveryPolicy::default())?);

    let url = profiles
        .upload_avatar("bob.png", "image/png", vec![0x89, b'P', b'N', b'G'])
        .await?;
    assert_eq!(url, "avatars/bob.png");

    let requests = server.received_requests().await.unwrap_or_default();
    let request = requests.first().expect("upload request");
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("filename=\"bob.png\""));
    assert_eq!(
        request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok()),
        Some("Bearer abc")
    );
    Ok(())
}
