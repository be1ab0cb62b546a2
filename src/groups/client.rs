//! Group CRUD over the shared API client. Names are checked locally before
//! anything is sent.

use super::types::{CreateGroupRequest, EditGroupRequest, GroupPage, GroupQuery};
use crate::{
    auth::validation,
    client::{ApiClient, ApiError, ApiRequest, ValidationErrors},
};
use tracing::{info, instrument};

pub const GROUPS_PATH: &str = "/groups";

#[derive(Clone)]
pub struct GroupService {
    client: ApiClient,
}

impl GroupService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// Returns transport errors or `Http` with the server message.
    #[instrument(skip(self, query), fields(page = query.page))]
    pub async fn list(&self, query: &GroupQuery) -> Result<GroupPage, ApiError> {
        let request = query
            .to_pairs()
            .into_iter()
            .fold(ApiRequest::get(GROUPS_PATH), |request, (key, value)| {
                request.query(key, value)
            });
        self.client.send_json(request).await
    }

    /// # Errors
    /// `Validation` for a blank or overlong name, `Http` otherwise.
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<(), ApiError> {
        validation::group_name(name)?;
        let request = ApiRequest::post(GROUPS_PATH).json(&CreateGroupRequest { name })?;
        self.client.send_empty(request).await?;
        info!("group created");
        Ok(())
    }

    /// # Errors
    /// `Validation` for a blank or overlong name, `Http` otherwise.
    #[instrument(skip(self))]
    pub async fn edit(&self, id: u64, name: &str, total_member: Option<u32>) -> Result<(), ApiError> {
        validation::group_name(name)?;
        let request = ApiRequest::put(format!("{GROUPS_PATH}/{id}"))
            .json(&EditGroupRequest { name, total_member })?;
        self.client.send_empty(request).await?;
        info!("group updated");
        Ok(())
    }

    /// Deletes every group in `ids` with one call.
    ///
    /// # Errors
    /// `Validation` when nothing is selected, `Http` otherwise.
    #[instrument(skip(self), fields(count = ids.len()))]
    pub async fn delete(&self, ids: &[u64]) -> Result<(), ApiError> {
        if ids.is_empty() {
            let mut errors = ValidationErrors::default();
            errors.push("ids", "No groups selected");
            return errors.into_result();
        }

        let joined = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.client
            .send_empty(ApiRequest::delete(format!("{GROUPS_PATH}/{joined}")))
            .await?;
        info!("groups deleted");
        Ok(())
    }
}
