use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Meta, Title};
use leptos_router::components::*;
use leptos_router::path;
use leptos_social_login::components::{
    EntryRedirect, LoginPopup, ReferralRedirect, SocialLoginProvider,
};
use leptos_social_login::url::Url;

use crate::environment::ENVIRONMENT;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api_url = Url::parse(&ENVIRONMENT.api_url()).expect("API_* variables to form a valid url");

    view! {
        <Meta name="charset" content="UTF-8"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1.0"/>
        <Title text="Bows - Play, Earn, Conquer"/>

        <main style=r#"
            height: 100%;
            width: 100%;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
        "#>
            <Router>
                <SocialLoginProvider api_url=api_url game_build_path=ENVIRONMENT.game_build_path>
                    <Routes fallback=|| view! { "Page not found." }>
                        <Route path=path!("/") view=Entry/>
                        <Route path=path!("/referral") view=ReferralRedirect/>
                        <Route path=path!("/login") view=|| view! { <LoginPopup show_apple=true/> }/>
                    </Routes>
                </SocialLoginProvider>
            </Router>
        </main>
    }
}

#[component]
pub fn Entry() -> impl IntoView {
    view! {
        <EntryRedirect/>
        <p class="entry-loading">"Loading game..."</p>
    }
}
