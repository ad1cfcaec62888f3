use crate::browser::WebBrowser;
use crate::config::SocialLoginOptions;
use crate::entry::EntryRouter;
use crate::identity::PopupIdentityProvider;
use crate::login::LoginFlow;
use crate::referral::ReferralCapture;
use crate::request::HttpBackend;
use crate::storage::{SessionStore, WebStorage};
use leptos::prelude::*;

/// Provided as context. Use
/// ```no_run
/// use leptos::prelude::expect_context;
/// use leptos_social_login::SocialLogin;
///
/// let social_login = expect_context::<SocialLogin>();
/// ```
/// to get access to the configured flows in any component rendered below the component that
/// performed the `init_social_login` call (or below a `SocialLoginProvider`).
#[derive(Debug, Clone, Copy)]
pub struct SocialLogin {
    pub(crate) options: StoredValue<SocialLoginOptions>,

    /// Shared by all flows. Clones share the underlying `reqwest::Client`.
    pub(crate) backend: StoredValue<HttpBackend>,
}

impl SocialLogin {
    pub fn options(&self) -> SocialLoginOptions {
        self.options.get_value()
    }

    pub fn session_store(&self) -> SessionStore<WebStorage> {
        self.options.with_value(|options| {
            SessionStore::new(
                WebStorage::new(options.storage_area),
                options.storage_keys.clone(),
            )
        })
    }

    pub fn backend(&self) -> HttpBackend {
        self.backend.get_value()
    }

    pub fn entry_router(&self) -> EntryRouter<WebStorage, HttpBackend, WebBrowser> {
        let options = self.options();
        EntryRouter::new(self.session_store(), self.backend(), WebBrowser, &options)
    }

    pub fn referral_capture(&self) -> ReferralCapture<WebStorage, WebBrowser> {
        let options = self.options();
        ReferralCapture::new(self.session_store(), WebBrowser, &options)
    }

    pub fn login_flow(&self) -> LoginFlow<WebStorage, HttpBackend, PopupIdentityProvider, WebBrowser> {
        let options = self.options();
        LoginFlow::new(
            self.session_store(),
            self.backend(),
            PopupIdentityProvider,
            WebBrowser,
            &options,
        )
    }
}
