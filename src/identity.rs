use crate::session::{SocialIdentity, SocialProvider};
use snafu::Snafu;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum IdentityProviderError {
    #[snafu(display("IdentityProviderError: Sign-in bridge not available: {message}"))]
    BridgeUnavailable { message: String },

    #[snafu(display("IdentityProviderError: Sign-in cancelled or rejected: {message}"))]
    Rejected { message: String },

    #[snafu(display("IdentityProviderError: Sign-in result carried no user id"))]
    MissingUid,
}

/// Interactive sign-in with a third-party identity provider.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Open the providers popup and wait for the user to complete (or abort) it.
    async fn sign_in_with_popup(
        &self,
        provider: SocialProvider,
    ) -> Result<SocialIdentity, IdentityProviderError>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = socialLogin, js_name = signInWithPopup, catch)]
    fn bridge_sign_in_with_popup(provider: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Popup sign-in through a small JavaScript bridge the host page provides:
///
/// ```js
/// window.socialLogin = {
///   // provider: "google" | "apple"
///   // resolves to { uid: string, displayName?: string }
///   signInWithPopup: async (provider) => { /* E.g. firebase signInWithPopup */ },
/// };
/// ```
///
/// The provider SDK itself (Firebase in the game portal) stays on the JavaScript side.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopupIdentityProvider;

impl IdentityProvider for PopupIdentityProvider {
    async fn sign_in_with_popup(
        &self,
        provider: SocialProvider,
    ) -> Result<SocialIdentity, IdentityProviderError> {
        let promise = bridge_sign_in_with_popup(provider.as_str()).map_err(|err| {
            IdentityProviderError::BridgeUnavailable {
                message: describe(&err),
            }
        })?;

        let user = JsFuture::from(promise)
            .await
            .map_err(|err| IdentityProviderError::Rejected {
                message: describe(&err),
            })?;

        let uid = read_string(&user, "uid")
            .filter(|it| !it.is_empty())
            .ok_or(IdentityProviderError::MissingUid)?;

        Ok(SocialIdentity {
            uid,
            display_name: read_string(&user, "displayName"),
        })
    }
}

fn read_string(object: &JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(object, &JsValue::from_str(key))
        .ok()
        .and_then(|it| it.as_string())
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| read_string(err, "message"))
        .unwrap_or_else(|| format!("{err:?}"))
}
