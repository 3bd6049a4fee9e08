use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

use crate::{apps, config::site_config, content::portfolio_library};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Portfolio Desktop" />
        <Meta name="description" content="A desktop-style personal website shell." />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider
            config=site_config()
            content=portfolio_library()
            render_window=Callback::new(apps::render_window)
        >
            <DesktopShell />
        </DesktopProvider>
    }
}
