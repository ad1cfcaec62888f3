use std::time::Duration;
use url::Url;
use wasm_bindgen::JsValue;

/// The page the flows run in.
pub trait Browser {
    /// Full url currently shown in the address bar.
    fn current_url(&self) -> Option<Url>;

    /// Replace the current history entry with `relative_url`. Does not reload or navigate, so
    /// going back or refreshing will not see the replaced url again.
    fn replace_url(&self, relative_url: &str);

    /// Hard navigation, leaving the application.
    fn redirect(&self, path: &str);

    /// Blocking message to the user.
    fn alert(&self, message: &str);
}

/// A hard redirect a flow wants to happen, possibly after some delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub delay: Duration,
}

impl Redirect {
    pub fn immediate(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn perform(&self, browser: &impl Browser) {
        tracing::debug!(to = %self.target, "Redirecting.");
        browser.redirect(&self.target);
    }
}

/// Runs a [`Redirect`] once its delay elapsed, unless cancelled before.
///
/// Starting again replaces a pending redirect.
pub trait RedirectTimer {
    fn start(&self, redirect: Redirect);
    fn cancel(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebBrowser;

impl WebBrowser {
    fn window(&self) -> Option<web_sys::Window> {
        let window = web_sys::window();
        if window.is_none() {
            tracing::error!("No window available.");
        }
        window
    }
}

impl Browser for WebBrowser {
    fn current_url(&self) -> Option<Url> {
        let href = match self.window()?.location().href() {
            Ok(href) => href,
            Err(err) => {
                tracing::error!(?err, "Could not read current location.");
                return None;
            }
        };
        Url::parse(&href)
            .inspect_err(|err| tracing::error!(?err, %href, "Current location is not a valid url."))
            .ok()
    }

    fn replace_url(&self, relative_url: &str) {
        let Some(window) = self.window() else {
            return;
        };
        let result = window.history().and_then(|history| {
            history.replace_state_with_url(&JsValue::NULL, "", Some(relative_url))
        });
        if let Err(err) = result {
            tracing::error!(?err, relative_url, "Could not replace history entry.");
        }
    }

    fn redirect(&self, path: &str) {
        let Some(window) = self.window() else {
            return;
        };
        if let Err(err) = window.location().set_href(path) {
            tracing::error!(?err, path, "Could not redirect.");
        }
    }

    fn alert(&self, message: &str) {
        let Some(window) = self.window() else {
            return;
        };
        if let Err(err) = window.alert_with_message(message) {
            tracing::error!(?err, message, "Could not show alert.");
        }
    }
}
