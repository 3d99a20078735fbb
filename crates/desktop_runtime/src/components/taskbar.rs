use super::*;

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let start_menu_open = move || state.with(|desktop| desktop.start_menu_open);

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <button
                id="taskbar-start-button"
                class="taskbar-start"
                class:pressed=start_menu_open
                aria-haspopup="menu"
                aria-expanded=move || start_menu_open().to_string()
                on:mousedown=move |ev| stop_mouse_event(&ev)
                on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleStartMenu)
            >
                "Start"
            </button>
            <Show when=start_menu_open fallback=|| ()>
                <StartMenu />
            </Show>
            <div class="taskbar-windows">
                <For
                    each=move || state.with(taskbar_windows)
                    key=|win| (win.id.0, win.minimized, win.title.clone())
                    let:win
                >
                    <TaskbarWindowButton window=win />
                </For>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarWindowButton(window: WindowRecord) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_id = window.id;
    let is_active = move || runtime.state.with(|desktop| desktop.active_window == Some(window_id));

    view! {
        <button
            id=format!("taskbar-window-button-{}", window_id.0)
            class="taskbar-window-button"
            class:active=is_active
            class:minimized=window.minimized
            on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleTaskbarWindow { window_id })
        >
            <img src=window.icon.clone() alt="" />
            <span>{window.title.clone()}</span>
        </button>
    }
}

#[component]
fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <div
            id="desktop-launcher-menu"
            class="start-menu"
            role="menu"
            on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
        >
            {apps::launcher_apps()
                .into_iter()
                .map(|app| {
                    let app_id = app.app_id;
                    view! {
                        <button
                            role="menuitem"
                            class="start-menu-item"
                            class:disabled=app.disabled
                            disabled=app.disabled
                            title=if app.disabled { "Coming soon" } else { "" }
                            on:click=move |_| runtime.open_app(app_id)
                        >
                            <img src=app.icon.clone() alt="" />
                            <span>{app.title.clone()}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
