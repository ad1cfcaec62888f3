use crate::session::{LoginType, SessionToken, UserProfile};
use serde::{Deserialize, Serialize};

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "loginType")]
    pub login_type: LoginType,

    #[serde(rename = "socialId")]
    pub social_id: String,

    /// Only sent when a referral code is held.
    #[serde(rename = "referralCode", skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

/// Body of `PATCH /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct UpdateUserRequest<'a> {
    pub username: &'a str,
}

/// Success envelope of the backend: `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct DataResponse<T> {
    pub data: T,
}

/// Payload of a successful `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(rename = "tokenType")]
    pub token_type: String,
    pub token: String,
}

impl From<LoginResponse> for SessionToken {
    fn from(response: LoginResponse) -> Self {
        SessionToken::new(response.token_type, response.token)
    }
}

pub(crate) type ProfileResponse = DataResponse<UserProfile>;

/// Error body of the backend. Every field is optional, as not every failure produces one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
}
