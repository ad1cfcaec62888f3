use crate::browser::Browser;
use crate::config::SocialLoginOptions;
use crate::error::{BestEffort, ProfileRefreshSnafu, SignInError, StoredProfileParseSnafu};
use crate::identity::IdentityProvider;
use crate::referral::capture_referral_code;
use crate::request::Backend;
use crate::response::LoginRequest;
use crate::session::{SessionIdentity, SessionToken, SocialProvider};
use crate::storage::{KeyValueStore, SessionStore};
use snafu::ResultExt;

/// State the login screen renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginScreen {
    pub referral_code: Option<String>,
    pub session_token: Option<SessionToken>,
    pub identity: SessionIdentity,
}

impl LoginScreen {
    /// Whether signing in upgrades an existing guest account instead of starting fresh.
    pub fn is_guest(&self) -> bool {
        self.identity.is_upgradable_guest()
    }

    /// Shown above the sign-in options while a referral code is held.
    pub fn referral_banner(&self) -> Option<String> {
        self.referral_code
            .as_ref()
            .map(|code| format!("Referral Code Applied: {code}"))
    }

    pub fn hint(&self) -> &'static str {
        if self.is_guest() {
            "Upgrade your guest account"
        } else {
            "Sign in to continue your Ludo journey"
        }
    }

    /// The referral code was consumed by a successful sign-in.
    pub fn signed_in(&mut self) {
        self.referral_code = None;
    }
}

#[derive(Debug)]
pub struct SignedIn {
    pub session: SessionToken,
    pub identity: SessionIdentity,

    /// The profile is re-fetched by the game anyway. Failing to do so here is not a problem.
    pub profile_refresh: BestEffort<()>,

    /// Route to navigate to now.
    pub navigate_to: String,
}

/// Flow behind the `/login` route.
pub struct LoginFlow<S, B, P, W> {
    store: SessionStore<S>,
    backend: B,
    identity_provider: P,
    browser: W,
    post_login_path: String,
}

impl<S, B, P, W> LoginFlow<S, B, P, W>
where
    S: KeyValueStore,
    B: Backend,
    P: IdentityProvider,
    W: Browser,
{
    pub fn new(
        store: SessionStore<S>,
        backend: B,
        identity_provider: P,
        browser: W,
        options: &SocialLoginOptions,
    ) -> Self {
        Self {
            store,
            backend,
            identity_provider,
            browser,
            post_login_path: options.post_login_path.clone(),
        }
    }

    /// Gather everything the login screen shows. A referral code in the url wins over a stored
    /// one and is persisted (and stripped from the url) right away.
    pub fn reconcile(&self) -> LoginScreen {
        let referral_code = capture_referral_code(&self.browser, &self.store).or_else(|| {
            self.store
                .referral_code()
                .filter(|it| !it.trim().is_empty())
        });

        LoginScreen {
            referral_code,
            session_token: self.store.session_token(),
            identity: self.stored_identity(),
        }
    }

    fn stored_identity(&self) -> SessionIdentity {
        match self.store.user_profile().context(StoredProfileParseSnafu) {
            Ok(profile) => SessionIdentity::classify(profile),
            Err(err) => {
                tracing::error!(?err, "Error parsing stored user data.");
                SessionIdentity::Anonymous
            }
        }
    }

    /// Sign in with `provider` and exchange the resulting identity for a session.
    ///
    /// An existing session (E.g. a guest) is sent along so that the backend can upgrade it in
    /// place. On failure, the user is alerted and nothing was persisted. On success, the caller
    /// must navigate to [`SignedIn::navigate_to`].
    pub async fn sign_in(&self, provider: SocialProvider) -> Result<SignedIn, SignInError> {
        let social = match self.identity_provider.sign_in_with_popup(provider).await {
            Ok(social) => social,
            Err(source) => {
                return Err(self.report(SignInError::PopupCancelledOrProviderError {
                    provider,
                    source,
                }));
            }
        };
        tracing::trace!(%provider, uid = %social.uid, "Identity provider sign-in succeeded.");

        let previous = self.stored_identity();
        let request = LoginRequest {
            login_type: provider.into(),
            social_id: social.uid,
            referral_code: self
                .store
                .referral_code()
                .filter(|it| !it.trim().is_empty()),
        };
        let current_session = self.store.session_token();

        let session = match self.backend.login(&request, current_session.as_ref()).await {
            Ok(session) => session,
            Err(source) => {
                let message = source
                    .backend_message()
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("{} login failed", provider.display_name()));
                return Err(self.report(SignInError::LoginRequestFailed {
                    provider,
                    message,
                    source,
                }));
            }
        };

        // The referral code is consumed. The new session supersedes whatever we held before.
        self.store.clear_referral_code();
        self.store.set_session_token(&session);

        let (profile, profile_refresh) = match self
            .backend
            .fetch_profile(&session)
            .await
            .context(ProfileRefreshSnafu)
        {
            Ok(profile) => {
                self.store.set_user_profile(&profile);
                (Some(profile), BestEffort(Ok(())))
            }
            Err(err) => {
                tracing::warn!(?err, "Could not refresh user profile after login. Ignoring.");
                (None, BestEffort(Err(err)))
            }
        };

        Ok(SignedIn {
            session,
            identity: previous.link(provider, profile),
            profile_refresh,
            navigate_to: self.post_login_path.clone(),
        })
    }

    fn report(&self, err: SignInError) -> SignInError {
        tracing::error!(?err, "Login error");
        self.browser.alert(&err.user_message());
        err
    }
}
