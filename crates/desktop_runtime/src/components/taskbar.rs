#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
use window_manager::{
    activate_window, group_windows, preview_close, preview_layout, preview_select,
    taskbar_buttons, AppType, PreviewController, TaskbarButton, TaskbarGroup,
    TaskbarWindowButton, TimerRequest, WindowStoreState,
};

use super::*;

/// Gap between the top of the taskbar and the preview strip.
const PREVIEW_LIFT_PX: f64 = 4.0;

fn taskbar_group_class(group: &TaskbarGroup) -> String {
    let mut class = String::from("taskbar-button");
    if group.is_running {
        class.push_str(" running");
    }
    if group.is_any_active {
        class.push_str(" active");
    }
    if group.has_minimized {
        class.push_str(" has-minimized");
    }
    class
}

fn taskbar_window_class(button: &TaskbarWindowButton) -> String {
    let mut class = String::from("taskbar-button taskbar-window running");
    if button.is_active {
        class.push_str(" active");
    }
    if button.is_minimized {
        class.push_str(" has-minimized");
    }
    class
}

/// Windows shown in the preview strip for `app_type`, in the group's creation order.
fn preview_windows(state: &WindowStoreState, app_type: &AppType) -> Vec<WindowRecord> {
    group_windows(state)
        .into_iter()
        .find(|group| &group.app_type == app_type)
        .map(|group| {
            group
                .window_ids
                .iter()
                .filter_map(|id| state.window(id).cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Horizontal centre of the element the event is attached to.
fn anchor_x(ev: &web_sys::MouseEvent) -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(element) = ev
            .current_target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        {
            let rect = element.get_bounding_client_rect();
            return rect.left() + rect.width() / 2.0;
        }
    }
    f64::from(ev.client_x())
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let taskbar_height = runtime.config.with_value(|config| config.taskbar_height);
    let preview = create_rw_signal(runtime.config.with_value(PreviewController::new));
    let preview_anchor = create_rw_signal(0.0_f64);

    create_effect(move |_| {
        let hover_enabled = !runtime.is_compact();
        preview.update(|preview| preview.set_hover_enabled(hover_enabled));
    });

    create_effect(move |_| {
        state.with(|state| preview.update(|preview| preview.reconcile(state)));
    });

    // Both delays go through the controller's tokens, so a superseded timer firing late is inert.
    let schedule = move |request: Option<TimerRequest>| {
        let Some(request) = request else {
            return;
        };
        if let Err(err) = set_timeout_with_handle(
            move || {
                preview.update(|preview| {
                    preview.fire(request.kind, request.token);
                });
            },
            request.delay,
        ) {
            logging::warn!("taskbar preview timer failed: {err:?}");
        }
    };

    let group_button = move |group: TaskbarGroup| {
        let label = state.with_untracked(|state| group.label(state));
        let class_name = taskbar_group_class(&group);
        let app_type = group.app_type.clone();
        let has_multiple = group.has_multiple();
        let is_running = group.is_running;
        let icon = group.icon.clone();

        view! {
            <button
                class=class_name
                title=label.clone()
                aria-label=label
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    preview.update(|preview| preview.dismiss());
                    runtime.activate_taskbar_group(&app_type);
                }
                on:mouseenter=move |ev: web_sys::MouseEvent| {
                    preview_anchor.set(anchor_x(&ev));
                    schedule(preview.try_update(|preview| preview.enter_button(&group)).flatten());
                }
                on:mouseleave=move |_| {
                    schedule(preview.try_update(|preview| preview.leave_button()).flatten());
                }
            >
                <span class="taskbar-icon" aria-hidden="true">{icon}</span>
                {is_running.then(|| view! { <span class="taskbar-running-indicator" /> })}
                {has_multiple.then(|| view! { <span class="taskbar-multi-dot" /> })}
            </button>
        }
        .into_view()
    };

    let window_button = move |button: TaskbarWindowButton| {
        let label = button.label();
        let class_name = taskbar_window_class(&button);
        let window_id = button.window_id.clone();

        view! {
            <button
                class=class_name
                title=label.clone()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    let commands = state.with_untracked(|state| activate_window(state, &window_id));
                    runtime.dispatch_all(commands);
                }
            >
                <span class="taskbar-icon" aria-hidden="true">{button.icon.clone()}</span>
                <span class="taskbar-title">{label}</span>
            </button>
        }
        .into_view()
    };

    let preview_strip = move || {
        let app_type: AppType = preview.with(|preview| preview.visible_group().cloned())?;
        let windows = state.with(|state| preview_windows(state, &app_type));
        let layout = preview_layout(
            windows.len(),
            preview_anchor.get(),
            runtime.viewport.get().width,
        );

        let thumbnails = windows
            .into_iter()
            .map(|win| {
                let select_id = win.id.clone();
                let close_id = win.id.clone();
                let title = if win.is_minimized {
                    format!("{} (Minimized)", win.title)
                } else {
                    win.title.clone()
                };
                view! {
                    <div
                        class="taskbar-preview-item"
                        class:minimized=win.is_minimized
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            let commands = state.with_untracked(|state| preview_select(state, &select_id));
                            preview.update(|preview| preview.dismiss());
                            runtime.dispatch_all(commands);
                        }
                    >
                        <div class="taskbar-preview-thumb" aria-hidden="true">{win.icon.clone()}</div>
                        <span class="taskbar-preview-title">{title}</span>
                        <button
                            class="taskbar-preview-close"
                            aria-label="Close window"
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                runtime.dispatch_all(preview_close(&close_id));
                            }
                        >
                            "✕"
                        </button>
                    </div>
                }
            })
            .collect_view();

        Some(view! {
            <div
                class="taskbar-preview"
                style=format!(
                    "left:{}px;width:{}px;bottom:{}px;",
                    layout.left,
                    layout.width,
                    taskbar_height + PREVIEW_LIFT_PX
                )
                on:mouseenter=move |_| preview.update(|preview| preview.enter_preview())
                on:mouseleave=move |_| {
                    schedule(preview.try_update(|preview| preview.leave_preview()).flatten());
                }
            >
                // Covers the gap down to the button so the pointer can cross it.
                <div
                    class="taskbar-preview-bridge"
                    aria-hidden="true"
                    style=format!("height:{}px;", PREVIEW_LIFT_PX)
                />
                {thumbnails}
            </div>
        })
    };

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Taskbar"
            style=format!("height:{}px;", taskbar_height)
            on:mousedown=move |ev| ev.stop_propagation()
        >
            <button
                class="taskbar-start"
                class:open=move || runtime.start_menu_open.get()
                aria-label="Start"
                aria-expanded=move || runtime.start_menu_open.get().to_string()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.start_menu_open.update(|open| *open = !*open);
                }
            >
                "⊞"
            </button>
            <div class="taskbar-buttons">
                {move || {
                    state
                        .with(taskbar_buttons)
                        .into_iter()
                        .map(|button| match button {
                            TaskbarButton::Pinned(group) => group_button(group),
                            TaskbarButton::Window(window) => window_button(window),
                        })
                        .collect_view()
                }}
            </div>
            {preview_strip}
        </footer>
    }
}
