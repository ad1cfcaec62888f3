use crate::browser::{Browser, Redirect, RedirectTimer};
use crate::config::SocialLoginOptions;
use crate::error::{
    BestEffort, LoginRequestSnafu, MalformedExternalTokenSnafu, ProfileUpdateSnafu,
    SocialLoginError,
};
use crate::external_token::decode_external_token;
use crate::query::take_query_param;
use crate::request::Backend;
use crate::response::LoginRequest;
use crate::session::{ExternalIdentity, LoginType, SessionToken};
use crate::storage::{KeyValueStore, SessionStore};
use snafu::ResultExt;

pub const TOKEN_PARAM: &str = "token";

/// What the entry route has to do after it mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPlan {
    /// Identity decoded from a `token` url parameter, still to be logged in.
    pub pending_login: Option<ExternalIdentity>,

    /// Always present. The game is entered no matter how the login goes.
    pub redirect: Redirect,
}

/// Session created from an external token.
#[derive(Debug)]
pub struct ExternalSession {
    pub session: SessionToken,
    pub username_update: BestEffort<()>,
}

/// Flow behind the `/` route: silently log in a user arriving with a one-time external token
/// (E.g. from a Telegram mini-app), then forward into the game.
///
/// Nothing in here ever blocks the redirect. Every failure is logged and swallowed, leaving the
/// user with whatever session existed before (or none).
pub struct EntryRouter<S, B, W> {
    store: SessionStore<S>,
    backend: B,
    browser: W,
    redirect: Redirect,
}

impl<S: KeyValueStore, B: Backend, W: Browser> EntryRouter<S, B, W> {
    pub fn new(store: SessionStore<S>, backend: B, browser: W, options: &SocialLoginOptions) -> Self {
        Self {
            store,
            backend,
            browser,
            redirect: Redirect {
                target: options.game_build_path.clone(),
                delay: options.redirect_delay,
            },
        }
    }

    /// Consume the `token` url parameter, if any. The parameter is only stripped when it could
    /// be decoded. A malformed token is treated as no token at all.
    pub fn on_mount(&self) -> EntryPlan {
        EntryPlan {
            pending_login: self.consume_external_token(),
            redirect: self.redirect.clone(),
        }
    }

    /// [`Self::on_mount`], with the redirect (re)scheduled on `timer`. Returns the identity
    /// still to be logged in. That login must not be awaited before the redirect.
    pub fn enter(&self, timer: &impl RedirectTimer) -> Option<ExternalIdentity> {
        let plan = self.on_mount();
        timer.cancel();
        tracing::trace!(delay = ?plan.redirect.delay, "Scheduling redirect into the game.");
        timer.start(plan.redirect);
        plan.pending_login
    }

    /// The route is left before the game was entered. Nothing must happen anymore.
    pub fn leave(&self, timer: &impl RedirectTimer) {
        tracing::trace!("Entry route left. Cancelling pending redirect.");
        timer.cancel();
    }

    fn consume_external_token(&self) -> Option<ExternalIdentity> {
        let url = self.browser.current_url()?;
        let consumed = take_query_param(&url, TOKEN_PARAM)?;
        match decode_external_token(&consumed.value).context(MalformedExternalTokenSnafu) {
            Ok(identity) => {
                tracing::debug!(social_id = %identity.social_id, "Decoded external token.");
                self.browser.replace_url(&consumed.cleaned);
                Some(identity)
            }
            Err(err) => {
                tracing::error!(?err, "Invalid external token. Continuing without login.");
                None
            }
        }
    }

    /// Exchange the external identity for a session and publish its display name.
    ///
    /// Performs exactly one login and, if that succeeded, exactly one username update. The
    /// outcome of the latter never affects the result.
    pub async fn link_external(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<ExternalSession, SocialLoginError> {
        let request = LoginRequest {
            login_type: LoginType::TELEGRAM,
            social_id: identity.social_id.clone(),
            referral_code: None,
        };
        let session = self
            .backend
            .login(&request, None)
            .await
            .context(LoginRequestSnafu)?;
        self.store.set_session_token(&session);
        tracing::trace!("Stored session from external token.");

        let username_update = match self
            .backend
            .update_username(&session, identity.username())
            .await
            .context(ProfileUpdateSnafu)
        {
            Ok(()) => BestEffort(Ok(())),
            Err(err) => {
                tracing::warn!(?err, "Could not update username. Ignoring.");
                BestEffort(Err(err))
            }
        };

        Ok(ExternalSession {
            session,
            username_update,
        })
    }

    /// [`Self::link_external`], with any failure logged and dropped.
    pub async fn run_pending_login(&self, identity: &ExternalIdentity) {
        if let Err(err) = self.link_external(identity).await {
            tracing::error!(?err, "Login with external token failed. Entering game anonymously.");
        }
    }

    pub fn browser(&self) -> &W {
        &self.browser
    }
}
