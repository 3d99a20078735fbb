use super::*;
use crate::model::ResizeEdge;

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let gesture = use_shell_gesture();

    let window = create_memo(move |_| runtime.state.with(|desktop| desktop.window(window_id).cloned()));
    // App content is built once per window and only hidden while minimized.
    let app_id = runtime
        .state
        .with_untracked(|desktop| desktop.window(window_id).map(|w| w.app_id));
    let is_focused = move || runtime.state.with(|desktop| desktop.active_window == Some(window_id));

    let style = move || {
        window.with(|win| {
            win.as_ref()
                .map(|win| {
                    format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                        win.rect.x, win.rect.y, win.rect.w, win.rect.h, win.z_index
                    )
                })
                .unwrap_or_default()
        })
    };
    let class_name = move || {
        window.with(|win| {
            let mut class_name = String::from("desktop-window");
            if let Some(win) = win {
                if win.minimized {
                    class_name.push_str(" minimized");
                }
                if win.maximized {
                    class_name.push_str(" maximized");
                }
                if win.flags.fixed_size {
                    class_name.push_str(" fixed-size");
                }
            }
            if is_focused() {
                class_name.push_str(" focused");
            }
            class_name
        })
    };
    let title = move || window.with(|win| win.as_ref().map(|w| w.title.clone()).unwrap_or_default());
    let icon = move || window.with(|win| win.as_ref().map(|w| w.icon.clone()).unwrap_or_default());
    let flag = move |read: fn(&WindowRecord) -> bool| {
        window.with(|win| win.as_ref().map(read).unwrap_or(false))
    };

    let focus = move |_: web_sys::MouseEvent| {
        if !is_focused() {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    };
    let begin_move = move |ev: web_sys::MouseEvent| {
        if !is_primary_button(&ev) {
            return;
        }
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_mouse_event(&ev),
        });
        if runtime
            .interaction
            .with_untracked(|interaction| interaction.dragging.is_some())
        {
            start_window_gesture(runtime, gesture);
        }
    };

    view! {
        <section
            class=class_name
            style=style
            role="dialog"
            aria-label=title
            on:mousedown=focus
        >
            <header
                class="titlebar"
                on:mousedown=begin_move
                on:dblclick=move |_| runtime.toggle_maximize(window_id)
            >
                <div class="titlebar-title">
                    <img class="titlebar-app-icon" src=icon alt="" />
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        disabled=move || !flag(|w| w.flags.minimizable)
                        aria-label="Minimize window"
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
                        }
                    >
                        "_"
                    </button>
                    <button
                        disabled=move || !flag(|w| w.flags.maximizable || w.maximized)
                        aria-label=move || {
                            if flag(|w| w.maximized) { "Restore window" } else { "Maximize window" }
                        }
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.toggle_maximize(window_id);
                        }
                    >
                        {move || if flag(|w| w.maximized) { "❐" } else { "□" }}
                    </button>
                    <button
                        aria-label="Close window"
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                        }
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">
                {app_id.map(apps::render_app)}
            </div>
            <Show
                when=move || !flag(|w| w.flags.fixed_size || w.maximized)
                fallback=|| ()
            >
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id=window_id edge=edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let gesture = use_shell_gesture();
    let class_name = format!("window-resize-handle {}", edge.css_class());

    let on_mousedown = move |ev: web_sys::MouseEvent| {
        if !is_primary_button(&ev) {
            return;
        }
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_mouse_event(&ev),
        });
        if runtime
            .interaction
            .with_untracked(|interaction| interaction.resizing.is_some())
        {
            start_window_gesture(runtime, gesture);
        }
    };

    view! { <div class=class_name aria-hidden="true" on:mousedown=on_mousedown /> }
}
