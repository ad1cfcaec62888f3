//! Social login, referral capture and mini-app bootstrap for Leptos frontends of a game that
//! lives outside the SPA (E.g. a WebGL build under `/build/bow.html`).
//!
//! Three routes make up the integration:
//!
//! - `/` renders [`components::EntryRedirect`]. Users arriving with `?token=<jwt>` from a Telegram
//!   mini-app are logged in silently while they are forwarded into the game.
//! - `/referral` renders [`components::ReferralRedirect`]. `?referralCode=<code>` is remembered
//!   until the next successful login.
//! - `/login` renders [`components::LoginPopup`]. Users sign in with Google (or Apple), guests
//!   upgrade their account.
//!
//! ```no_run
//! use leptos::prelude::*;
//! use leptos_router::{path, components::{Route, Router, Routes}};
//! use leptos_social_login::components::{EntryRedirect, LoginPopup, ReferralRedirect, SocialLoginProvider};
//! use leptos_social_login::url::Url;
//!
//! #[component]
//! pub fn App() -> impl IntoView {
//!     // Note: This value should be served from an environment variable to be overwritten in production.
//!     let api_url = Url::parse("http://localhost:8080").unwrap();
//!
//!     view! {
//!         <main>
//!             <Router>
//!                 <SocialLoginProvider api_url=api_url>
//!                     <Routes fallback=|| view! { "Page not found." }>
//!                         <Route path=path!("/") view=EntryRedirect/>
//!                         <Route path=path!("/referral") view=ReferralRedirect/>
//!                         <Route path=path!("/login") view=|| view! { <LoginPopup show_apple=true/> }/>
//!                     </Routes>
//!                 </SocialLoginProvider>
//!             </Router>
//!         </main>
//!     }
//! }
//! ```
//!
//! The sign-in popup itself is driven by the page. It must expose
//! `window.socialLogin.signInWithPopup(provider)`, resolving to `{ uid, displayName }`.
//!

mod browser;
pub mod components;
mod config;
mod entry;
mod error;
mod external_token;
mod hooks;
mod identity;
mod login;
mod query;
mod referral;
mod request;
mod response;
mod session;
mod state;
mod storage;

// Library exports (additional to pub modules).
pub use browser::*;
pub use config::*;
pub use entry::*;
pub use error::*;
pub use external_token::*;
pub use hooks::*;
pub use identity::*;
pub use login::*;
pub use query::*;
pub use referral::*;
pub use request::{AUTHENTICATION_HEADER, Backend, HttpBackend, RequestError};
pub use response::{ErrorResponse, LoginRequest};
pub use session::*;
pub use state::*;
pub use storage::*;
pub mod url {
    pub use url::Url;
}
