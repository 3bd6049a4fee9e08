use window_manager::{search_apps, AppDescriptor};

use super::*;

/// Installed apps matching the search box, grouped under their category headings in catalog
/// order.
fn categorized(query: &str) -> Vec<(&'static str, Vec<&'static AppDescriptor>)> {
    let mut sections: Vec<(&'static str, Vec<&'static AppDescriptor>)> = Vec::new();
    for app in search_apps(query) {
        match sections
            .iter_mut()
            .find(|(category, _)| *category == app.category)
        {
            Some((_, apps)) => apps.push(app),
            None => sections.push((app.category, vec![app])),
        }
    }
    sections
}

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let query = create_rw_signal(String::new());

    create_effect(move |_| {
        if !runtime.start_menu_open.get() {
            query.set(String::new());
        }
    });

    let launch = move |app: &'static AppDescriptor| runtime.open_app(app);

    view! {
        <Show when=move || runtime.start_menu_open.get() fallback=|| ()>
            <div
                id="desktop-launcher-menu"
                class="start-menu"
                role="menu"
                style=move || {
                    let taskbar_height = runtime.config.with_value(|config| config.taskbar_height);
                    format!("bottom:{}px;", taskbar_height)
                }
                on:mousedown=move |ev| ev.stop_propagation()
            >
                <input
                    class="start-menu-search"
                    type="search"
                    placeholder="Search apps"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            if let Some(app) = search_apps(&query.get_untracked()).first().copied() {
                                launch(app);
                            }
                        } else if ev.key() == "Escape" {
                            runtime.start_menu_open.set(false);
                        }
                    }
                />
                {move || {
                    let sections = categorized(&query.get());
                    if sections.is_empty() {
                        return view! { <p class="start-menu-empty">"No apps found"</p> }.into_view();
                    }
                    sections
                        .into_iter()
                        .map(|(category, apps)| {
                            view! {
                                <section class="start-menu-section">
                                    <h3>{category}</h3>
                                    {apps
                                        .into_iter()
                                        .map(|app| {
                                            view! {
                                                <button
                                                    class="start-menu-item"
                                                    role="menuitem"
                                                    on:click=move |ev| {
                                                        stop_mouse_event(&ev);
                                                        launch(app);
                                                    }
                                                >
                                                    <span aria-hidden="true">{app.icon}</span>
                                                    <span>{app.name}</span>
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </section>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Show>
    }
}
