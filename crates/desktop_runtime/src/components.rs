//! Desktop shell UI composition and interaction surfaces.

mod taskbar;
mod window;

use desktop_app_contract::{
    pointer_from_mouse_event, use_dispatch_windows, DispatchContent, DispatchWindowConfig,
    DispatchWindowProvider, PointerGesture,
};
use leptos::*;

use self::{taskbar::Taskbar, window::DesktopWindow};

use crate::{
    apps,
    model::{DesktopState, WindowId, WindowRecord},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Pointer listeners shared by every outer window; only one move or resize runs at a time.
#[derive(Clone, Copy)]
struct ShellGesture(PointerGesture);

fn use_shell_gesture() -> PointerGesture {
    use_context::<ShellGesture>()
        .expect("shell gesture is provided by DesktopShell")
        .0
}

#[component]
/// Renders the full desktop shell: background, icons, windows, dispatch-window overlay and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    provide_context(ShellGesture(PointerGesture::new()));

    let background = move || {
        state.with(|desktop| {
            format!(
                "background-image:url('{}');",
                desktop.preferences.background_image
            )
        })
    };

    view! {
        <DispatchWindowProvider>
            <div id="desktop-shell-root" class="desktop-shell" style=background>
                <div
                    class="desktop-dismiss-layer"
                    on:mousedown=move |_| runtime.dispatch_action(DesktopAction::CloseStartMenu)
                />
                <ul class="desktop-icon-grid">
                    <For
                        each=apps::desktop_icon_apps
                        key=|app| app.app_id.key()
                        let:app
                    >
                        {{
                            let app_id = app.app_id;
                            view! {
                                <li>
                                    <button
                                        class="desktop-icon"
                                        class:disabled=app.disabled
                                        disabled=app.disabled
                                        on:dblclick=move |_| runtime.open_app(app_id)
                                    >
                                        <img src=app.icon.clone() alt="" />
                                        <span>{app.title.clone()}</span>
                                    </button>
                                </li>
                            }
                        }}
                    </For>
                </ul>

                <div class="desktop-window-layer">
                    <For
                        each=move || state.with(|desktop| window_ids(desktop))
                        key=|window_id| window_id.0
                        let:window_id
                    >
                        <DesktopWindow window_id=window_id />
                    </For>
                </div>
            </div>
            <Taskbar />
            <LinkedAppLauncher />
        </DispatchWindowProvider>
    }
}

/// Opens the app named by the `?app=` link once at boot; unknown keys get a placeholder panel.
#[component]
fn LinkedAppLauncher() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let dispatch = use_dispatch_windows();
    let Some(key) = runtime.host.get_value().launch_app_key() else {
        return;
    };

    match apps::resolve_app_key(&key) {
        apps::AppLaunch::Open(app_id) => runtime.open_app(app_id),
        apps::AppLaunch::Unknown(key) => {
            let content = DispatchContent::new(move || apps::render_app_by_key(&key));
            dispatch.create_dispatch_window(DispatchWindowConfig::new("App not found", content));
        }
    }
}

/// Window ids in stable creation order, so stacking changes never remount app content.
fn window_ids(state: &DesktopState) -> Vec<WindowId> {
    let mut ids = state.windows.iter().map(|w| w.id).collect::<Vec<_>>();
    ids.sort();
    ids
}

/// Taskbar buttons follow creation order, independent of stacking.
fn taskbar_windows(state: &DesktopState) -> Vec<WindowRecord> {
    let mut windows = state.windows.clone();
    windows.sort_by_key(|w| w.id);
    windows
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

/// Routes window-level pointer movement into the active move or resize session.
fn start_window_gesture(runtime: DesktopRuntimeContext, gesture: PointerGesture) {
    gesture.start(
        move |pointer| {
            let (dragging, resizing) = runtime.interaction.with_untracked(|interaction| {
                (interaction.dragging.is_some(), interaction.resizing.is_some())
            });
            if dragging {
                runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
            }
            if resizing {
                runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
            }
        },
        move |_| end_active_pointer_interaction(runtime),
    );
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let (dragging, resizing) = runtime.interaction.with_untracked(|interaction| {
        (interaction.dragging.is_some(), interaction.resizing.is_some())
    });
    if dragging {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if resizing {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn is_primary_button(ev: &web_sys::MouseEvent) -> bool {
    ev.button() == 0
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{AppId, InteractionState},
        reducer::reduce_desktop,
    };

    #[test]
    fn window_order_is_stable_across_focus_changes() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        for app_id in [AppId::Arena, AppId::TicTacToe, AppId::Wallet] {
            reduce_desktop(&mut state, &mut interaction, DesktopAction::OpenWindow { app_id })
                .expect("open");
        }
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::FocusWindow {
                window_id: WindowId(1),
            },
        )
        .expect("focus");

        assert_eq!(
            window_ids(&state),
            vec![WindowId(1), WindowId(2), WindowId(3)]
        );
        assert_eq!(
            taskbar_windows(&state)
                .iter()
                .map(|w| w.app_id)
                .collect::<Vec<_>>(),
            vec![AppId::Arena, AppId::TicTacToe, AppId::Wallet]
        );
        assert_eq!(state.windows.last().map(|w| w.id), Some(WindowId(1)));
    }
}
