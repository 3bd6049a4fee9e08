//! Desktop shell UI composition and interaction surfaces.

mod desktop_icons;
mod start_menu;
mod taskbar;
mod window;

use leptos::*;
use window_manager::{Point, ResizeDirection, Viewport, WindowRecord};

use self::{
    desktop_icons::DesktopIcons, start_menu::StartMenu, taskbar::Taskbar, window::DesktopWindow,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the desktop: icons, the window layer, the start menu, and the taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            class:compact=move || runtime.is_compact()
            on:mousedown=move |_| close_start_menu(runtime.start_menu_open)
        >
            <DesktopIcons />

            <div class="desktop-window-layer">
                <For each=move || state.get().windows key=|win| win.id.clone() let:win>
                    <DesktopWindow window_id=win.id />
                </For>
            </div>

            <StartMenu />
            <Taskbar />
        </div>
    }
}

/// Closes the start menu if it is open; presses outside it call this.
fn close_start_menu(open: RwSignal<bool>) {
    if open.get_untracked() {
        open.set(false);
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn touch_points(list: &web_sys::TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
        .collect()
}

fn resize_edge_class(direction: ResizeDirection) -> &'static str {
    match direction {
        ResizeDirection::N => "edge-n",
        ResizeDirection::S => "edge-s",
        ResizeDirection::E => "edge-e",
        ResizeDirection::W => "edge-w",
        ResizeDirection::Ne => "edge-ne",
        ResizeDirection::Nw => "edge-nw",
        ResizeDirection::Se => "edge-se",
        ResizeDirection::Sw => "edge-sw",
    }
}

/// Inline geometry for a window frame. Minimized windows are not painted at all.
fn window_style(win: &WindowRecord, viewport: Viewport, taskbar_height: f64) -> String {
    if win.is_minimized {
        return format!("display:none;z-index:{};", win.z_index);
    }
    let rect = win.effective_rect(viewport, taskbar_height);
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        rect.origin.x, rect.origin.y, rect.size.width, rect.size.height, win.z_index
    )
}

fn window_class(win: &WindowRecord, is_active: bool) -> String {
    let active_class = if is_active { " focused" } else { "" };
    let minimized_class = if win.is_minimized { " minimized" } else { "" };
    let maximized_class = if win.is_maximized { " maximized" } else { "" };
    format!("desktop-window{active_class}{minimized_class}{maximized_class}")
}
