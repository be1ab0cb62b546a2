//! HTTP client shared by every service. Each call runs the same pipeline:
//! build the URL, attach the bearer token (request authorizer), send with a
//! timeout, then let the response guard decide whether the credential must be
//! cleared or refreshed before the response is decoded.
//!
//! The client never logs token material; request spans carry only the method,
//! the path and the retry marker.

pub mod authorizer;
pub mod config;
pub mod errors;
pub mod guard;
pub mod request;
pub(crate) mod response;

pub use authorizer::RequestAuthorizer;
pub use config::{ClientConfig, RecoveryPolicy};
pub use errors::{ApiError, FieldError, ValidationErrors};
pub use guard::{ResponseGuard, Verdict};
pub use request::{ApiRequest, FilePart, RequestBody};

use crate::session::{Credential, TokenStore};
use guard::{RefreshRequest, RefreshResponse};
use reqwest::{
    Response,
    multipart::{Form, Part},
};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    tokens: TokenStore,
    authorizer: RequestAuthorizer,
    guard: ResponseGuard,
}

impl ApiClient {
    /// Builds a client around `config`, reading and writing credentials in `tokens`.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig, tokens: TokenStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            authorizer: RequestAuthorizer::new(&config.public_paths),
            guard: ResponseGuard::new(config.recovery.clone()),
            http,
            config: Arc::new(config),
            tokens,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Runs the full pipeline and returns the raw response.
    ///
    /// # Errors
    /// Returns transport errors, or `ApiError::AuthorizationExpired` when the
    /// guard cleared the credential.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Response, ApiError> {
        loop {
            self.authorizer.authorize(&mut request, &self.tokens);
            let response = self.dispatch(&request).await?;

            match self.guard.verdict(&request, response.status()) {
                Verdict::Pass => return Ok(response),
                Verdict::Invalidate => {
                    self.tokens.remove();
                    warn!(path = %request.path, "credential rejected, session cleared");
                    return Err(expired(response).await);
                }
                Verdict::Refresh { refresh_path } => {
                    if let Err(err) = self.refresh(refresh_path).await {
                        self.tokens.remove();
                        warn!(path = %request.path, "token refresh failed, session cleared: {err}");
                        return Err(expired(response).await);
                    }
                    info!(path = %request.path, "token refreshed, replaying request");
                    request.retried = true;
                }
            }
        }
    }

    /// # Errors
    /// See [`ApiClient::send`]; also fails when the body does not decode as `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        response::handle_json_response(self.send(request).await?).await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        response::handle_empty_response(self.send(request).await?).await
    }

    /// # Errors
    /// See [`ApiClient::send`].
    pub async fn send_text(&self, request: ApiRequest) -> Result<String, ApiError> {
        response::handle_text_response(self.send(request).await?).await
    }

    /// Exchanges the stored refresh token for a new access token.
    async fn refresh(&self, refresh_path: &str) -> Result<Credential, ApiError> {
        let current = self.tokens.get().ok_or_else(|| {
            ApiError::AuthorizationExpired {
                status: 401,
                message: "No session to refresh.".to_string(),
            }
        })?;
        let refresh_token = current.refresh_token().ok_or_else(|| {
            ApiError::AuthorizationExpired {
                status: 401,
                message: "No refresh token stored.".to_string(),
            }
        })?;

        let request = ApiRequest::post(refresh_path).json(&RefreshRequest {
            refresh_token: refresh_token.expose_secret(),
        })?;
        let response = self.dispatch(&request).await?;
        let refreshed: RefreshResponse = response::handle_json_response(response).await?;

        if refreshed.token.trim().is_empty() {
            return Err(ApiError::Decode("Refresh response carried no token.".to_string()));
        }

        self.tokens
            .replace_token(refreshed.token, refreshed.refresh_token)
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let url = self.config.url_for(&request.path);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone())
            .timeout(self.config.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Multipart(part) => builder.multipart(multipart_form(part)?),
        };

        let span = info_span!(
            "api.request",
            http.method = %request.method,
            path = %request.path,
            retried = request.retried
        );
        let response = builder.send().instrument(span).await?;
        debug!(path = %request.path, status = %response.status(), "response received");

        Ok(response)
    }
}

fn multipart_form(part: &FilePart) -> Result<Form, ApiError> {
    let file = Part::bytes(part.bytes.clone())
        .file_name(part.file_name.clone())
        .mime_str(&part.mime)
        .map_err(|err| ApiError::Config(format!("Invalid content type '{}': {err}", part.mime)))?;

    Ok(Form::new().part(part.field.clone(), file))
}

async fn expired(response: Response) -> ApiError {
    let (status, message) = response::status_and_message(response).await;
    ApiError::AuthorizationExpired { status, message }
}
