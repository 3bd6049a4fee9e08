use leptos::leptos_dom::helpers::WindowListenerHandle;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
use window_manager::{ShellContext, ShellEvent, ShellTarget, WindowCommand, WindowId, WindowShell};

use super::*;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Mouse and pen only; touch input arrives through the touch handlers.
fn is_primary_mouse_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "touch" || !ev.is_primary() {
        return false;
    }
    ev.pointer_type() != "mouse" || ev.button() == 0
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let taskbar_height = runtime.config.with_value(|config| config.taskbar_height);
    let shell = store_value(WindowShell::new(window_id.clone()));
    let gesture_listeners = store_value(Vec::<WindowListenerHandle>::new());
    let id = store_value(window_id);

    let window = Signal::derive(move || {
        id.with_value(|id| runtime.state.with(|state| state.window(id).cloned()))
    });
    let is_active =
        Signal::derive(move || id.with_value(|id| runtime.state.with(|state| state.is_active(id))));

    // Runs one event through the gesture interpreter and applies what it emits.
    let feed = move |event: ShellEvent| {
        let viewport = runtime.viewport.get_untracked();
        let commands = runtime.state.with_untracked(|state| {
            runtime.config.with_value(|config| {
                id.try_with_value(|id| {
                    let ctx = ShellContext::new(state.window(id), viewport, config);
                    shell.try_update_value(|shell| shell.handle(event, &ctx))
                })
                .flatten()
                .unwrap_or_default()
            })
        });
        runtime.dispatch_all(commands);
    };
    // Stored values may already be disposed when a gesture outlives its window.
    let in_gesture = move || {
        shell
            .try_with_value(|shell| !shell.is_idle())
            .unwrap_or(false)
    };

    let release_listeners = move || {
        gesture_listeners.try_update_value(|handles| {
            for handle in handles.drain(..) {
                handle.remove();
            }
        });
    };
    let listening = move || {
        gesture_listeners
            .try_with_value(|handles| !handles.is_empty())
            .unwrap_or(false)
    };

    // Move/up listeners live on the window object for the duration of one gesture so tracking
    // survives the pointer leaving the frame.
    let track_pointer = move || {
        if listening() {
            return;
        }
        let on_move = window_event_listener(ev::pointermove, move |ev| {
            if ev.pointer_type() == "touch" {
                return;
            }
            feed(ShellEvent::PointerMove {
                pointer: pointer_from_pointer_event(&ev),
            });
        });
        let on_up = window_event_listener(ev::pointerup, move |_| {
            feed(ShellEvent::PointerUp);
            release_listeners();
        });
        let on_cancel = window_event_listener(ev::pointercancel, move |_| {
            feed(ShellEvent::PointerUp);
            release_listeners();
        });
        gesture_listeners.update_value(|handles| handles.extend([on_move, on_up, on_cancel]));
    };

    let track_touch = move || {
        if listening() {
            return;
        }
        let on_move = window_event_listener(ev::touchmove, move |ev| {
            feed(ShellEvent::TouchMove {
                touches: touch_points(&ev.touches()),
            });
        });
        let on_end = window_event_listener(ev::touchend, move |ev| {
            feed(ShellEvent::TouchEnd {
                remaining: touch_points(&ev.touches()),
            });
            if !in_gesture() {
                release_listeners();
            }
        });
        let on_cancel = window_event_listener(ev::touchcancel, move |_| {
            feed(ShellEvent::TouchEnd {
                remaining: Vec::new(),
            });
            release_listeners();
        });
        gesture_listeners.update_value(|handles| handles.extend([on_move, on_end, on_cancel]));
    };

    on_cleanup(release_listeners);

    let press = move |target: ShellTarget, ev: &web_sys::PointerEvent| {
        if !is_primary_mouse_press(ev) {
            return;
        }
        // preventDefault below suppresses the compatibility mousedown the shell listens for.
        close_start_menu(runtime.start_menu_open);
        if target != ShellTarget::Body {
            ev.stop_propagation();
        }
        if matches!(target, ShellTarget::TitleBar | ShellTarget::ResizeHandle(_)) {
            ev.prevent_default();
            try_set_pointer_capture(ev);
        }
        feed(ShellEvent::PointerDown {
            target,
            pointer: pointer_from_pointer_event(ev),
        });
        if in_gesture() {
            track_pointer();
        }
    };

    let touch = move |target: ShellTarget, ev: &web_sys::TouchEvent| {
        close_start_menu(runtime.start_menu_open);
        if target != ShellTarget::Body {
            ev.stop_propagation();
        }
        if matches!(target, ShellTarget::TitleBar | ShellTarget::ResizeHandle(_)) {
            // Suppresses the emulated mouse events that would follow.
            ev.prevent_default();
        }
        feed(ShellEvent::TouchStart {
            target,
            touches: touch_points(&ev.touches()),
            time_ms: runtime.host.get_value().now_ms(),
        });
        if in_gesture() {
            track_touch();
        }
    };

    let command = move |make: fn(WindowId) -> WindowCommand| {
        runtime.dispatch_command(id.with_value(|id| make(id.clone())));
    };

    let Some(initial) = window.get_untracked() else {
        return ().into_view();
    };
    let body = runtime.render_window.call(initial.clone());

    let resize_handles = move || {
        ResizeDirection::ALL
            .into_iter()
            .map(|direction| {
                view! {
                    <div
                        class=format!("window-resize-handle {}", resize_edge_class(direction))
                        aria-hidden="true"
                        on:pointerdown=move |ev: web_sys::PointerEvent| {
                            press(ShellTarget::ResizeHandle(direction), &ev)
                        }
                        on:touchstart=move |ev: web_sys::TouchEvent| {
                            touch(ShellTarget::ResizeHandle(direction), &ev)
                        }
                    />
                }
            })
            .collect_view()
    };

    view! {
        <section
            class=move || {
                window
                    .get()
                    .map(|win| window_class(&win, is_active.get()))
                    .unwrap_or_default()
            }
            style=move || {
                let viewport = runtime.viewport.get();
                window
                    .get()
                    .map(|win| window_style(&win, viewport, taskbar_height))
                    .unwrap_or_default()
            }
            role="dialog"
            aria-label=initial.title.clone()
            data-app-type=initial.app_type.slug().to_string()
            on:pointerdown=move |ev: web_sys::PointerEvent| press(ShellTarget::Body, &ev)
            on:touchstart=move |ev: web_sys::TouchEvent| touch(ShellTarget::Body, &ev)
        >
            <header
                class="titlebar"
                on:pointerdown=move |ev: web_sys::PointerEvent| press(ShellTarget::TitleBar, &ev)
                on:touchstart=move |ev: web_sys::TouchEvent| touch(ShellTarget::TitleBar, &ev)
                on:dblclick=move |ev: web_sys::MouseEvent| {
                    stop_mouse_event(&ev);
                    feed(ShellEvent::DoubleClick {
                        target: ShellTarget::TitleBar,
                    });
                }
            >
                <div class="titlebar-title">
                    <span class="titlebar-app-icon" aria-hidden="true">
                        {initial.icon.clone()}
                    </span>
                    <span>{initial.title.clone()}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| press(ShellTarget::Controls, &ev)
                        on:touchstart=move |ev: web_sys::TouchEvent| touch(ShellTarget::Controls, &ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            command(WindowCommand::ToggleMinimize);
                        }
                    >
                        "—"
                    </button>
                    <button
                        aria-label=move || {
                            if window.get().is_some_and(|win| win.is_maximized) {
                                "Restore window"
                            } else {
                                "Maximize window"
                            }
                        }
                        on:pointerdown=move |ev: web_sys::PointerEvent| press(ShellTarget::Controls, &ev)
                        on:touchstart=move |ev: web_sys::TouchEvent| touch(ShellTarget::Controls, &ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            command(WindowCommand::ToggleMaximize);
                        }
                    >
                        {move || if window.get().is_some_and(|win| win.is_maximized) { "❐" } else { "□" }}
                    </button>
                    <button
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| press(ShellTarget::Controls, &ev)
                        on:touchstart=move |ev: web_sys::TouchEvent| touch(ShellTarget::Controls, &ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            command(WindowCommand::Close);
                        }
                    >
                        "✕"
                    </button>
                </div>
            </header>
            <div class="window-body">{body}</div>
            <Show
                when=move || window.get().is_some_and(|win| !win.is_maximized)
                fallback=|| ()
            >
                {resize_handles}
            </Show>
        </section>
    }
    .into_view()
}
