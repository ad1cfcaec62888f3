use crate::external_token::ExternalTokenError;
use crate::identity::IdentityProviderError;
use crate::request::RequestError;
use crate::session::SocialProvider;
use snafu::Snafu;

/// Everything that can go wrong in the login, referral and bootstrap flows.
///
/// None of these reach the user. The automatic bootstrap swallows all of them, secondary calls of
/// the interactive login hand them out as [`BestEffort`]. See [`SignInError`] for failures the
/// user is told about.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SocialLoginError {
    #[snafu(display("SocialLoginError: Malformed external token"))]
    MalformedExternalToken { source: ExternalTokenError },

    #[snafu(display("SocialLoginError: Login request failed"))]
    LoginRequest { source: RequestError },

    #[snafu(display("SocialLoginError: Could not update profile"))]
    ProfileUpdate { source: RequestError },

    #[snafu(display("SocialLoginError: Could not refresh profile"))]
    ProfileRefresh { source: RequestError },

    #[snafu(display("SocialLoginError: Could not parse stored user profile: {source}"))]
    StoredProfileParse { source: serde_json::Error },
}

/// Failure of an interactive sign-in. Always shown to the user, who can simply retry.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SignInError {
    #[snafu(display("{} login failed", provider.display_name()))]
    PopupCancelledOrProviderError {
        provider: SocialProvider,
        source: IdentityProviderError,
    },

    #[snafu(display("{message}"))]
    LoginRequestFailed {
        provider: SocialProvider,
        message: String,
        source: RequestError,
    },
}

impl SignInError {
    /// Text of the alert shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Outcome of a secondary call that must never fail the flow it is part of.
///
/// Failures were already logged when this is handed out. Inspect it if you care, drop it if
/// you do not.
#[derive(Debug)]
pub struct BestEffort<T>(pub Result<T, SocialLoginError>);

impl<T> BestEffort<T> {
    pub fn is_applied(&self) -> bool {
        self.0.is_ok()
    }

    pub fn ok(self) -> Option<T> {
        self.0.ok()
    }
}
