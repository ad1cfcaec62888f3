use std::time::Duration;
use url::Url;

/// Everything needed to run the sign-in, referral and bootstrap flows.
///
/// Only `api_url` has no sensible default. Use [`SocialLoginOptions::new`] to get the defaults
/// of every other field and override what you need.
#[derive(Debug, Clone)]
pub struct SocialLoginOptions {
    /// Base url of the game backend, E.g. "https://api.example.com".
    /// Endpoints like `/login` are appended to it.
    pub api_url: Url,

    /// Path of the separately built game client. All bootstrap and referral routes hard-redirect
    /// here. Defaults to `/build/bow.html`.
    pub game_build_path: String,

    /// Route the interactive login navigates to after a successful sign-in. Defaults to `/`.
    pub post_login_path: String,

    /// Time the entry route waits before redirecting into the game, giving the background
    /// login a chance to get started. Defaults to `Duration::from_millis(800)`.
    pub redirect_delay: Duration,

    pub storage_keys: StorageKeys,

    /// Browser storage used for the session token, user profile and referral code.
    /// Defaults to `StorageArea::Local`, as the game build reads the same keys.
    pub storage_area: StorageArea,
}

impl SocialLoginOptions {
    pub const DEFAULT_GAME_BUILD_PATH: &'static str = "/build/bow.html";
    pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(800);

    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            game_build_path: Self::DEFAULT_GAME_BUILD_PATH.to_owned(),
            post_login_path: "/".to_owned(),
            redirect_delay: Self::DEFAULT_REDIRECT_DELAY,
            storage_keys: StorageKeys::default(),
            storage_area: StorageArea::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageArea {
    /// `window.localStorage`
    #[default]
    Local,

    /// `window.sessionStorage`
    Session,
}

/// Storage keys shared with the game build. Changing them breaks the hand-over of the session
/// into the game, so only do this if the game is reconfigured as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Holds the session token in the form `"<tokenType> <token>"`.
    pub session_token: String,

    /// Holds the JSON serialized user profile.
    pub user_profile: String,

    /// Holds a captured, not yet consumed referral code.
    pub referral_code: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            session_token: "authToken".to_owned(),
            user_profile: "user".to_owned(),
            referral_code: "referralCode".to_owned(),
        }
    }
}
