#![allow(dead_code)]

use http::StatusCode;
use leptos_social_login::url::Url;
use leptos_social_login::{
    Backend, Browser, ErrorResponse, IdentityProvider, IdentityProviderError, LoginRequest,
    MemoryStore, Redirect, RedirectTimer, RequestError, SessionStore, SessionToken, SocialIdentity, SocialLoginOptions,
    SocialProvider, StorageKeys, UserProfile,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub mod tracing {
    pub fn init_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(::tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    }
}

pub fn options() -> SocialLoginOptions {
    SocialLoginOptions::new(Url::parse("https://api.example.com").unwrap())
}

pub fn store(memory: &MemoryStore) -> SessionStore<MemoryStore> {
    SessionStore::new(memory.clone(), StorageKeys::default())
}

pub fn external_token(claims: serde_json::Value) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"mini-app-secret"),
    )
    .unwrap()
}

#[derive(Debug, Default)]
pub struct BrowserState {
    pub url: Option<Url>,
    pub replaced: Vec<String>,
    pub redirects: Vec<String>,
    pub alerts: Vec<String>,
}

/// Clones share their state.
#[derive(Debug, Clone, Default)]
pub struct FakeBrowser {
    pub state: Rc<RefCell<BrowserState>>,
}

impl FakeBrowser {
    pub fn at(url: &str) -> Self {
        let browser = Self::default();
        browser.state.borrow_mut().url = Some(Url::parse(url).unwrap());
        browser
    }

    pub fn url(&self) -> String {
        self.state
            .borrow()
            .url
            .as_ref()
            .map(|it| it.to_string())
            .unwrap_or_default()
    }

    pub fn replaced(&self) -> Vec<String> {
        self.state.borrow().replaced.clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.state.borrow().redirects.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }
}

impl Browser for FakeBrowser {
    fn current_url(&self) -> Option<Url> {
        self.state.borrow().url.clone()
    }

    fn replace_url(&self, relative_url: &str) {
        let mut state = self.state.borrow_mut();
        state.url = state.url.as_ref().and_then(|it| it.join(relative_url).ok());
        state.replaced.push(relative_url.to_owned());
    }

    fn redirect(&self, path: &str) {
        self.state.borrow_mut().redirects.push(path.to_owned());
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_owned());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Login {
        request: LoginRequest,
        current_session: Option<SessionToken>,
    },
    UpdateUsername {
        session: SessionToken,
        username: String,
    },
    FetchProfile {
        session: SessionToken,
    },
}

/// Scripted answer of the fake backend. Anything not scripted is answered with a 500.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(StatusCode, Option<&'static str>),
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T, RequestError> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Status(status, message) => Err(RequestError::ErrResponse {
                status,
                error_response: ErrorResponse {
                    message: message.map(str::to_owned),
                },
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub calls: Vec<BackendCall>,
    pub login_replies: VecDeque<Reply<SessionToken>>,
    pub update_replies: VecDeque<Reply<()>>,
    pub profile_replies: VecDeque<Reply<UserProfile>>,
}

/// Records every call. Clones share their state.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    pub state: Rc<RefCell<BackendState>>,
}

impl FakeBackend {
    pub fn reply_login(&self, reply: Reply<SessionToken>) -> &Self {
        self.state.borrow_mut().login_replies.push_back(reply);
        self
    }

    pub fn reply_update(&self, reply: Reply<()>) -> &Self {
        self.state.borrow_mut().update_replies.push_back(reply);
        self
    }

    pub fn reply_profile(&self, reply: Reply<UserProfile>) -> &Self {
        self.state.borrow_mut().profile_replies.push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.borrow().calls.clone()
    }

    pub fn login_calls(&self) -> Vec<(LoginRequest, Option<SessionToken>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Login {
                    request,
                    current_session,
                } => Some((request, current_session)),
                _ => None,
            })
            .collect()
    }

    fn unscripted<T>() -> Reply<T> {
        Reply::Status(StatusCode::INTERNAL_SERVER_ERROR, None)
    }
}

impl Backend for FakeBackend {
    async fn login(
        &self,
        request: &LoginRequest,
        current_session: Option<&SessionToken>,
    ) -> Result<SessionToken, RequestError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::Login {
            request: request.clone(),
            current_session: current_session.cloned(),
        });
        state
            .login_replies
            .pop_front()
            .unwrap_or_else(Self::unscripted)
            .into_result()
    }

    async fn update_username(
        &self,
        session: &SessionToken,
        username: &str,
    ) -> Result<(), RequestError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::UpdateUsername {
            session: session.clone(),
            username: username.to_owned(),
        });
        state
            .update_replies
            .pop_front()
            .unwrap_or_else(Self::unscripted)
            .into_result()
    }

    async fn fetch_profile(&self, session: &SessionToken) -> Result<UserProfile, RequestError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::FetchProfile {
            session: session.clone(),
        });
        state
            .profile_replies
            .pop_front()
            .unwrap_or_else(Self::unscripted)
            .into_result()
    }
}

#[derive(Debug, Clone)]
pub struct FakeIdentityProvider {
    pub result: Result<SocialIdentity, IdentityProviderError>,
    pub opened: Rc<RefCell<Vec<SocialProvider>>>,
}

impl FakeIdentityProvider {
    pub fn signing_in_as(uid: &str) -> Self {
        Self {
            result: Ok(SocialIdentity {
                uid: uid.to_owned(),
                display_name: Some("Bob".to_owned()),
            }),
            opened: Rc::default(),
        }
    }

    pub fn closed_by_user() -> Self {
        Self {
            result: Err(IdentityProviderError::Rejected {
                message: "auth/popup-closed-by-user".to_owned(),
            }),
            opened: Rc::default(),
        }
    }
}

impl IdentityProvider for FakeIdentityProvider {
    async fn sign_in_with_popup(
        &self,
        provider: SocialProvider,
    ) -> Result<SocialIdentity, IdentityProviderError> {
        self.opened.borrow_mut().push(provider);
        self.result.clone()
    }
}

#[derive(Debug, Default)]
pub struct TimerState {
    pub pending: Option<Redirect>,
    pub started: Vec<Redirect>,
    pub cancelled: usize,
}

/// Time only passes on [`FakeTimer::elapse`]. Clones share their state.
#[derive(Debug, Clone, Default)]
pub struct FakeTimer {
    pub state: Rc<RefCell<TimerState>>,
}

impl FakeTimer {
    pub fn pending(&self) -> Option<Redirect> {
        self.state.borrow().pending.clone()
    }

    pub fn started(&self) -> Vec<Redirect> {
        self.state.borrow().started.clone()
    }

    pub fn cancelled(&self) -> usize {
        self.state.borrow().cancelled
    }

    /// Lets the pending delay run out, performing the redirect if it is still scheduled.
    pub fn elapse(&self, browser: &impl Browser) {
        let pending = self.state.borrow_mut().pending.take();
        if let Some(redirect) = pending {
            redirect.perform(browser);
        }
    }
}

impl RedirectTimer for FakeTimer {
    fn start(&self, redirect: Redirect) {
        let mut state = self.state.borrow_mut();
        state.started.push(redirect.clone());
        state.pending = Some(redirect);
    }

    fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        state.pending = None;
        state.cancelled += 1;
    }
}
