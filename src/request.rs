use crate::response::{
    DataResponse, ErrorResponse, LoginRequest, LoginResponse, ProfileResponse, UpdateUserRequest,
};
use crate::session::{SessionToken, UserProfile};
use http::StatusCode;
use serde::de::DeserializeOwned;
use snafu::{ResultExt, Snafu};
use url::Url;

/// Header the backend expects the session token in. Not `Authorization`!
pub const AUTHENTICATION_HEADER: &str = "authentication";

#[derive(Debug, Snafu)]
pub enum RequestError {
    #[snafu(display("RequestError: Could not build url of endpoint '{path}'"))]
    Endpoint {
        path: String,
        source: url::ParseError,
    },

    #[snafu(display("RequestError: Could not send request"))]
    Send { source: reqwest::Error },

    #[snafu(display("RequestError: Could not decode payload"))]
    Decode { source: reqwest::Error },

    #[snafu(display("RequestError: Received an error response ({status})"))]
    ErrResponse {
        status: StatusCode,
        error_response: ErrorResponse,
    },
}

impl RequestError {
    /// Human-readable message sent by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            RequestError::ErrResponse { error_response, .. } => error_response
                .message
                .as_deref()
                .filter(|it| !it.trim().is_empty()),
            _ => None,
        }
    }
}

/// The game backend, as far as login is concerned.
///
/// Futures are not required to be `Send`, as everything runs on the browsers event loop.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `POST /login`. Passing the current session allows the backend to upgrade that session
    /// (E.g. a guest) instead of creating a second account.
    async fn login(
        &self,
        request: &LoginRequest,
        current_session: Option<&SessionToken>,
    ) -> Result<SessionToken, RequestError>;

    /// `PATCH /user`
    async fn update_username(
        &self,
        session: &SessionToken,
        username: &str,
    ) -> Result<(), RequestError>;

    /// `GET /`
    async fn fetch_profile(&self, session: &SessionToken) -> Result<UserProfile, RequestError>;
}

/// [`Backend`] talking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: Url,
}

impl HttpBackend {
    pub fn new(api_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: Url) -> Self {
        Self { client, api_url }
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        let raw = format!("{}/{path}", self.api_url.as_str().trim_end_matches('/'));
        Url::parse(&raw).context(EndpointSnafu { path })
    }
}

impl Backend for HttpBackend {
    async fn login(
        &self,
        request: &LoginRequest,
        current_session: Option<&SessionToken>,
    ) -> Result<SessionToken, RequestError> {
        let mut builder = self.client.post(self.endpoint("login")?).json(request);
        if let Some(session) = current_session {
            builder = builder.header(AUTHENTICATION_HEADER, session.as_str());
        }
        let response = builder.send().await.context(SendSnafu {})?;
        let login = parse_success::<DataResponse<LoginResponse>>(response).await?;
        Ok(login.data.into())
    }

    async fn update_username(
        &self,
        session: &SessionToken,
        username: &str,
    ) -> Result<(), RequestError> {
        let response = self
            .client
            .patch(self.endpoint("user")?)
            .header(AUTHENTICATION_HEADER, session.as_str())
            .json(&UpdateUserRequest { username })
            .send()
            .await
            .context(SendSnafu {})?;
        // The response body carries nothing we need.
        match response.status().is_success() {
            true => Ok(()),
            false => Err(read_error(response).await),
        }
    }

    async fn fetch_profile(&self, session: &SessionToken) -> Result<UserProfile, RequestError> {
        let response = self
            .client
            .get(self.endpoint("")?)
            .header(AUTHENTICATION_HEADER, session.as_str())
            .send()
            .await
            .context(SendSnafu {})?;
        let profile = parse_success::<ProfileResponse>(response).await?;
        Ok(profile.data)
    }
}

async fn parse_success<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
    if !response.status().is_success() {
        return Err(read_error(response).await);
    }
    response.json::<T>().await.context(DecodeSnafu {})
}

async fn read_error(response: reqwest::Response) -> RequestError {
    let status = response.status();
    let error_response = response
        .json::<ErrorResponse>()
        .await
        .unwrap_or_else(|err| {
            tracing::debug!(?err, %status, "Error response carried no readable body.");
            ErrorResponse::default()
        });
    RequestError::ErrResponse {
        status,
        error_response,
    }
}
