use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque credential of an application session, in the form `"<tokenType> <token>"`.
///
/// Sent verbatim in the `authentication` header and persisted verbatim. Presence implies
/// "logged in" (as guest or with a linked identity).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token_type: impl AsRef<str>, token: impl AsRef<str>) -> Self {
        Self(format!("{} {}", token_type.as_ref(), token.as_ref()))
    }

    /// Wrap a value previously read from storage. No format checks are performed.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login types known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownLoginType {
    Guest,
    Google,
    Apple,
    Telegram,
}

/// The `loginType` of a user profile. Values we do not know about are kept as-is, whatever their
/// JSON type, so that a profile written by a newer backend still parses and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LoginType {
    Known(KnownLoginType),
    Unknown(serde_json::Value),
}

impl LoginType {
    pub const GUEST: LoginType = LoginType::Known(KnownLoginType::Guest);
    pub const TELEGRAM: LoginType = LoginType::Known(KnownLoginType::Telegram);
}

/// Identity providers offering an interactive popup sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Apple,
}

impl SocialProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Apple => "apple",
        }
    }

    /// Name shown to users, E.g. in "Google login failed".
    pub fn display_name(&self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Apple => "Apple",
        }
    }
}

impl Display for SocialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SocialProvider> for LoginType {
    fn from(provider: SocialProvider) -> Self {
        match provider {
            SocialProvider::Google => LoginType::Known(KnownLoginType::Google),
            SocialProvider::Apple => LoginType::Known(KnownLoginType::Apple),
        }
    }
}

/// The user profile as served by the backend. Only `loginType` is interpreted, every other
/// field is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    #[serde(rename = "loginType", default, skip_serializing_if = "Option::is_none")]
    pub login_type: Option<LoginType>,

    #[serde(flatten)]
    pub remaining: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    pub fn is_guest(&self) -> bool {
        self.login_type.as_ref() == Some(&LoginType::GUEST)
    }
}

/// Identity obtained from an identity-provider popup. Never persisted, only forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialIdentity {
    pub uid: String,
    pub display_name: Option<String>,
}

/// Identity decoded from a one-time external token (E.g. issued by a Telegram mini-app).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub social_id: String,
    pub display_name: Option<String>,
}

impl ExternalIdentity {
    pub const DEFAULT_DISPLAY_NAME: &'static str = "Guest";

    /// The username to publish for this identity. Falls back to "Guest".
    pub fn username(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|it| !it.is_empty())
            .unwrap_or(Self::DEFAULT_DISPLAY_NAME)
    }
}

/// Who the current session belongs to, as far as the client knows.
///
/// Classified from the persisted user profile. A guest session can be upgraded in place by
/// signing in with a social provider while still holding the guest session token.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionIdentity {
    /// No profile known.
    Anonymous,

    /// Session created without a third-party identity. Upgradable.
    Guest(UserProfile),

    /// Session backed by a third-party identity.
    Linked {
        login_type: LoginType,
        profile: Option<UserProfile>,
    },
}

impl SessionIdentity {
    pub fn classify(profile: Option<UserProfile>) -> Self {
        match profile {
            None => SessionIdentity::Anonymous,
            Some(profile) if profile.is_guest() => SessionIdentity::Guest(profile),
            Some(profile) => SessionIdentity::Linked {
                login_type: profile
                    .login_type
                    .clone()
                    .unwrap_or(LoginType::Unknown(serde_json::Value::Null)),
                profile: Some(profile),
            },
        }
    }

    pub fn is_upgradable_guest(&self) -> bool {
        matches!(self, SessionIdentity::Guest(_))
    }

    /// Transition performed by a successful social login. The resulting session always
    /// supersedes the previous one, whatever it was.
    pub fn link(self, provider: SocialProvider, profile: Option<UserProfile>) -> Self {
        match &self {
            SessionIdentity::Guest(_) => {
                tracing::debug!(%provider, "Guest session upgraded to a linked account.")
            }
            SessionIdentity::Linked { login_type, .. } => {
                tracing::debug!(%provider, ?login_type, "Replacing linked session.")
            }
            SessionIdentity::Anonymous => {
                tracing::debug!(%provider, "Anonymous user signed in.")
            }
        }
        SessionIdentity::Linked {
            login_type: profile
                .as_ref()
                .and_then(|it| it.login_type.clone())
                .unwrap_or_else(|| provider.into()),
            profile,
        }
    }
}
