use crate::browser::{Redirect, RedirectTimer, WebBrowser};
use crate::config::SocialLoginOptions;
use crate::hooks::{init_social_login, use_social_login};
use crate::login::LoginScreen;
use crate::session::SocialProvider;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use leptos_use::{use_timeout_fn, UseTimeoutFnReturn};
use std::time::Duration;
use url::Url;

/// Initialize social login and provide it to child components.
///
/// # Example
/// ```no_run
/// use leptos::prelude::*;
/// use leptos_router::components::Router;
/// use leptos_social_login::components::SocialLoginProvider;
/// use leptos_social_login::url::Url;
///
/// # #[component]
/// # fn Example() -> impl IntoView {
/// view! {
///     <Router>
///         <SocialLoginProvider api_url=Url::parse("http://localhost:8080").expect("valid api url")>
///             <p>"<Routes> and further app content..."</p>
///         </SocialLoginProvider>
///     </Router>
/// }
/// # }
/// ```
#[allow(clippy::must_use_candidate)]
#[component]
pub fn SocialLoginProvider(
    /// Base url of the game backend.
    #[prop(into)]
    api_url: Url,

    /// Where the game build lives. Defaults to `/build/bow.html`.
    #[prop(into, optional)]
    game_build_path: Option<String>,

    /// Delay of the entry redirect. Defaults to 800ms.
    #[prop(optional)]
    redirect_delay: Option<Duration>,

    children: Children,
) -> impl IntoView {
    let mut options = SocialLoginOptions::new(api_url);
    if let Some(game_build_path) = game_build_path {
        options.game_build_path = game_build_path;
    }
    if let Some(redirect_delay) = redirect_delay {
        options.redirect_delay = redirect_delay;
    }

    let _social_login = init_social_login(options);

    view! {
        { children() }
    }
}

/// Render at `/`. Logs in users arriving with a `?token=...` from a mini-app in the background
/// and enters the game after a short delay, whether that login worked or not.
///
/// The pending redirect is cancelled should this component unmount before the delay elapsed.
#[component]
#[allow(clippy::must_use_candidate)]
pub fn EntryRedirect() -> impl IntoView {
    let social_login = use_social_login();
    let location = use_location();

    let delay = RwSignal::new(0.0);
    let UseTimeoutFnReturn { start, stop, .. } = use_timeout_fn(
        move |redirect: Redirect| redirect.perform(&WebBrowser),
        delay,
    );
    let timer = TimeoutRedirectTimer { delay, start, stop };

    Effect::new({
        let timer = timer.clone();
        move |_| {
            location.search.track();

            let Some(identity) = social_login.entry_router().enter(&timer) else {
                return;
            };
            // Intentionally not awaited by the redirect.
            leptos::task::spawn_local(async move {
                social_login
                    .entry_router()
                    .run_pending_login(&identity)
                    .await;
            });
        }
    });

    on_cleanup(move || social_login.entry_router().leave(&timer));
}

/// [`RedirectTimer`] backed by `use_timeout_fn`. The delay is taken from each started redirect.
#[derive(Clone)]
struct TimeoutRedirectTimer<Start, Stop> {
    delay: RwSignal<f64>,
    start: Start,
    stop: Stop,
}

impl<Start, Stop> RedirectTimer for TimeoutRedirectTimer<Start, Stop>
where
    Start: Fn(Redirect),
    Stop: Fn(),
{
    fn start(&self, redirect: Redirect) {
        self.delay.set(redirect.delay.as_millis() as f64);
        (self.start)(redirect);
    }

    fn cancel(&self) {
        (self.stop)();
    }
}

/// Render at `/referral`. Remembers `?referralCode=...` and enters the game immediately.
#[component]
#[allow(clippy::must_use_candidate)]
pub fn ReferralRedirect() -> impl IntoView {
    let social_login = use_social_login();
    let location = use_location();

    Effect::new(move |_| {
        location.search.track();

        let capture = social_login.referral_capture();
        capture.on_mount().perform(capture.browser());
    });
}

/// Render at `/login`. The interactive sign-in screen.
///
/// Shows an applied referral code, offers to upgrade guest accounts and navigates to the
/// configured `post_login_path` after a successful sign-in. Failures are alerted to the user.
#[component]
#[allow(clippy::must_use_candidate)]
pub fn LoginPopup(
    /// Also offer "Continue with Apple".
    #[prop(optional)]
    show_apple: bool,
) -> impl IntoView {
    let social_login = use_social_login();
    let location = use_location();
    let navigate = use_navigate();

    let (screen, set_screen) = signal::<Option<LoginScreen>>(None);

    Effect::new(move |_| {
        location.search.track();
        set_screen.set(Some(social_login.login_flow().reconcile()));
    });

    let referral_banner =
        Signal::derive(move || screen.with(|it| it.as_ref().and_then(LoginScreen::referral_banner)));
    let hint = Signal::derive(move || {
        screen.with(|it| it.as_ref().map(LoginScreen::hint).unwrap_or_default())
    });

    let sign_in = move |provider: SocialProvider| {
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            // Failures were already alerted by the flow.
            if let Ok(signed_in) = social_login.login_flow().sign_in(provider).await {
                tracing::debug!(identity = ?signed_in.identity, "Signed in.");
                set_screen.update(|it| {
                    if let Some(it) = it {
                        it.signed_in();
                    }
                });
                navigate(&signed_in.navigate_to, NavigateOptions::default());
            }
        });
    };
    let sign_in_with_apple = sign_in.clone();

    view! {
        <div class="login-popup">
            <div class="login-card">
                <img class="login-logo" alt="Bows Logo" src="/survival_icon.png"/>

                {move || referral_banner.get().map(|banner| view! {
                    <div class="referral-code">{banner}</div>
                })}

                <h1>"Play, Earn, Conquer"</h1>
                <div class="login-earn">
                    <img src="/BOWS_Coin.png" alt="Bows coin"/>
                    <span>"Earn $CORE COINS"</span>
                </div>

                <p class="login-hint">{move || hint.get()}</p>

                <div class="login-buttons">
                    <button class="login-google" on:click=move |_| sign_in(SocialProvider::Google)>
                        <img src="/google-logo.png" alt="Google Icon"/>
                        <span>"Continue with Google"</span>
                    </button>

                    {show_apple.then(|| view! {
                        <button class="login-apple" on:click=move |_| sign_in_with_apple(SocialProvider::Apple)>
                            <img src="/apple-logo.png" alt="Apple Icon"/>
                            <span>"Continue with Apple"</span>
                        </button>
                    })}
                </div>

                <p class="login-terms">
                    "By continuing, you agree to our "
                    <a href="#">"Terms of Service"</a>
                    " and "
                    <a href="#">"Privacy Policy"</a>
                </p>
            </div>
        </div>
    }
}
