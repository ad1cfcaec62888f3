use crate::config::SocialLoginOptions;
use crate::request::HttpBackend;
use crate::SocialLogin;
use leptos::prelude::*;

/// Initializes social login with the given options and provides the resulting `SocialLogin` as
/// context to all components rendered below.
pub fn init_social_login(options: SocialLoginOptions) -> SocialLogin {
    tracing::trace!(api_url = %options.api_url, "Initializing social login...");

    let social_login = SocialLogin {
        backend: StoredValue::new(HttpBackend::new(options.api_url.clone())),
        options: StoredValue::new(options),
    };
    provide_context(social_login);
    social_login
}

/// Get the `SocialLogin` provided by an ancestor.
///
/// # Panics
/// If neither `init_social_login` was called nor a `SocialLoginProvider` rendered above.
pub fn use_social_login() -> SocialLogin {
    expect_context::<SocialLogin>()
}
