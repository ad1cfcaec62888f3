use crate::browser::{Browser, Redirect};
use crate::config::SocialLoginOptions;
use crate::query::take_query_param;
use crate::storage::{KeyValueStore, SessionStore};

pub const REFERRAL_CODE_PARAM: &str = "referralCode";

/// Persist a non-blank `referralCode` from the current url and strip it from the address bar.
/// Returns the captured code.
pub(crate) fn capture_referral_code<S: KeyValueStore>(
    browser: &impl Browser,
    store: &SessionStore<S>,
) -> Option<String> {
    let url = browser.current_url()?;
    let consumed = take_query_param(&url, REFERRAL_CODE_PARAM)?;
    if consumed.value.trim().is_empty() {
        tracing::debug!("Ignoring blank referral code.");
        return None;
    }

    tracing::debug!(referral_code = %consumed.value, "Captured referral code.");
    store.set_referral_code(&consumed.value);
    browser.replace_url(&consumed.cleaned);
    Some(consumed.value)
}

/// Flow behind the `/referral` route: remember the referral code, then go straight to the game.
pub struct ReferralCapture<S, W> {
    store: SessionStore<S>,
    browser: W,
    game_build_path: String,
}

impl<S: KeyValueStore, W: Browser> ReferralCapture<S, W> {
    pub fn new(store: SessionStore<S>, browser: W, options: &SocialLoginOptions) -> Self {
        Self {
            store,
            browser,
            game_build_path: options.game_build_path.clone(),
        }
    }

    /// Nothing asynchronous happens here, so the returned redirect is always immediate.
    pub fn on_mount(&self) -> Redirect {
        capture_referral_code(&self.browser, &self.store);
        Redirect::immediate(self.game_build_path.clone())
    }

    pub fn browser(&self) -> &W {
        &self.browser
    }
}
