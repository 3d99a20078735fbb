//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use thiserror::Error;

use crate::{
    apps::app_descriptor,
    model::{
        AppId, DesktopPreferences, DesktopSnapshot, DesktopState, DragSession, InteractionState,
        PointerPosition, ResizeEdge, ResizeSession, WindowId, WindowRecord, WindowRect,
    },
    window_manager::{
        focus_window_internal, min_window_size, normalize_window_stack, resize_rect_clamped,
        staggered_rect,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window for an app.
    OpenWindow {
        /// App to open.
        app_id: AppId,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Hide a window while keeping it mounted.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Bring a minimized window back and focus it.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Maximize into `viewport`, or return to the saved rect if already maximized.
    ToggleMaximizeWindow {
        /// Window to toggle.
        window_id: WindowId,
        /// Desktop area available to windows.
        viewport: WindowRect,
    },
    /// Taskbar button behavior: restore, minimize, or focus.
    ToggleTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Hydrate the window layout from a persisted snapshot.
    HydrateSnapshot {
        /// Snapshot payload to restore.
        snapshot: DesktopSnapshot,
    },
    /// Replace user preferences.
    SetPreferences {
        /// New preferences.
        preferences: DesktopPreferences,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current desktop layout snapshot.
    PersistLayout,
    /// Persist user preferences.
    PersistPreferences,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions the registry forbids.
pub enum ReducerError {
    /// The app's manifest marks it disabled.
    #[error("app `{}` is disabled", .0.key())]
    AppDisabled(AppId),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// Actions that reference a window which no longer exists leave the state untouched and return no
/// effects.
///
/// # Errors
///
/// Returns [`ReducerError::AppDisabled`] when opening an app whose manifest disables it.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow { app_id } => {
            let descriptor = app_descriptor(app_id);
            if descriptor.disabled {
                return Err(ReducerError::AppDisabled(app_id));
            }
            let window_id = next_window_id(state);
            let rect = staggered_rect(descriptor.default_rect(), state.windows.len());
            state.windows.push(WindowRecord {
                id: window_id,
                app_id,
                title: descriptor.title.clone(),
                icon: descriptor.icon.clone(),
                rect,
                original_rect: rect,
                restore_rect: None,
                z_index: 0,
                minimized: false,
                maximized: false,
                flags: descriptor.flags(),
            });
            focus_window_internal(state, window_id);
            state.start_menu_open = false;
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::CloseWindow { window_id } => {
            let before_len = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.windows.len() != before_len {
                if state.active_window == Some(window_id) {
                    state.active_window = None;
                }
                clear_sessions_for(interaction, window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if focus_window_internal(state, window_id) {
                state.start_menu_open = false;
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if let Some(window) = find_window_mut(state, window_id) {
                if window.flags.minimizable && !window.minimized {
                    window.minimized = true;
                    if state.active_window == Some(window_id) {
                        state.active_window = None;
                    }
                    clear_sessions_for(interaction, window_id);
                    effects.push(RuntimeEffect::PersistLayout);
                }
            }
        }
        DesktopAction::RestoreWindow { window_id } => {
            if let Some(window) = find_window_mut(state, window_id) {
                window.minimized = false;
                focus_window_internal(state, window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ToggleMaximizeWindow {
            window_id,
            viewport,
        } => {
            if let Some(window) = find_window_mut(state, window_id) {
                if window.maximized {
                    if let Some(restore_rect) = window.restore_rect.take() {
                        window.rect = restore_rect;
                    }
                    window.maximized = false;
                } else if window.flags.maximizable {
                    window.restore_rect = Some(window.rect);
                    window.rect = viewport;
                    window.maximized = true;
                } else {
                    return Ok(effects);
                }
                window.minimized = false;
                clear_sessions_for(interaction, window_id);
                focus_window_internal(state, window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            let Some(minimized) = state.window(window_id).map(|w| w.minimized) else {
                return Ok(effects);
            };
            let next = if minimized {
                DesktopAction::RestoreWindow { window_id }
            } else if state.active_window == Some(window_id) {
                DesktopAction::MinimizeWindow { window_id }
            } else {
                DesktopAction::FocusWindow { window_id }
            };
            effects.extend(reduce_desktop(state, interaction, next)?);
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.window(window_id) else {
                return Ok(effects);
            };
            let rect_start = window.rect;
            let maximized = window.maximized;
            focus_window_internal(state, window_id);
            state.start_menu_open = false;
            if !maximized {
                interaction.resizing = None;
                interaction.dragging = Some(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.clone() {
                let dx = pointer.x.saturating_sub(session.pointer_start.x);
                let dy = pointer.y.saturating_sub(session.pointer_start.y);
                match find_window_mut(state, session.window_id) {
                    Some(window) if !window.maximized => {
                        window.rect = session.rect_start.offset(dx, dy);
                    }
                    Some(_) => {}
                    None => interaction.dragging = None,
                }
            }
        }
        DesktopAction::EndMove => {
            if interaction.dragging.take().is_some() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let Some(window) = state.window(window_id) else {
                return Ok(effects);
            };
            let rect_start = window.rect;
            let resizable = !window.flags.fixed_size && !window.maximized;
            focus_window_internal(state, window_id);
            if resizable {
                interaction.dragging = None;
                interaction.resizing = Some(ResizeSession {
                    window_id,
                    edge,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.clone() {
                let dx = pointer.x.saturating_sub(session.pointer_start.x);
                let dy = pointer.y.saturating_sub(session.pointer_start.y);
                match find_window_mut(state, session.window_id) {
                    Some(window) if !window.maximized && !window.flags.fixed_size => {
                        let min_size = min_window_size(window);
                        window.rect =
                            resize_rect_clamped(session.rect_start, session.edge, dx, dy, min_size);
                    }
                    Some(_) => {}
                    None => interaction.resizing = None,
                }
            }
        }
        DesktopAction::EndResize => {
            if interaction.resizing.take().is_some() {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::HydrateSnapshot { mut snapshot } => {
            snapshot
                .windows
                .retain(|window| !app_descriptor(window.app_id).disabled);
            let max_restore = state.preferences.max_restore_windows;
            if snapshot.windows.len() > max_restore {
                // Keep the topmost windows.
                let overflow = snapshot.windows.len() - max_restore;
                snapshot.windows.drain(0..overflow);
            }
            *interaction = InteractionState::default();
            state.apply_snapshot(snapshot);
        }
        DesktopAction::SetPreferences { preferences } => {
            let backend_changed =
                preferences.query_state_layout != state.preferences.query_state_layout;
            state.preferences = preferences;
            effects.push(RuntimeEffect::PersistPreferences);
            if backend_changed {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
    }

    normalize_window_stack(state);
    Ok(effects)
}

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn find_window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}

fn clear_sessions_for(interaction: &mut InteractionState, window_id: WindowId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.resizing = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::window_manager::WINDOW_STAGGER_PX;

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, app_id: AppId) -> WindowId {
        reduce_desktop(state, interaction, DesktopAction::OpenWindow { app_id })
            .expect("open window");
        state.active_window.expect("opened window is active")
    }

    fn pointer(x: i32, y: i32) -> PointerPosition {
        PointerPosition { x, y }
    }

    fn rect_of(state: &DesktopState, window_id: WindowId) -> WindowRect {
        state.window(window_id).expect("window exists").rect
    }

    #[test]
    fn consecutive_opens_are_staggered() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, AppId::Arena);
        let second = open(&mut state, &mut interaction, AppId::Arena);

        let a = rect_of(&state, first);
        let b = rect_of(&state, second);
        assert_eq!(b.x - a.x, WINDOW_STAGGER_PX);
        assert_eq!(b.y - a.y, WINDOW_STAGGER_PX);
        assert_eq!(state.active_window, Some(second));
        assert_ne!(first, second);
    }

    #[test]
    fn dragging_a_window_at_the_coordinate_limit_saturates() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let game = open(&mut state, &mut interaction, AppId::Arena);
        if let Some(window) = state.windows.iter_mut().find(|w| w.id == game) {
            window.rect.x = i32::MAX - 5;
        }

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: game,
                pointer: pointer(i32::MIN, 0),
            },
        )
        .expect("begin move");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: pointer(i32::MAX, 0),
            },
        )
        .expect("update move");

        assert_eq!(rect_of(&state, game).x, i32::MAX);
    }

    #[test]
    fn opening_a_disabled_app_fails() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let result = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow {
                app_id: AppId::Marketplace,
            },
        );

        assert_eq!(result, Err(ReducerError::AppDisabled(AppId::Marketplace)));
        assert!(state.windows.is_empty());
    }

    #[test]
    fn fixed_size_window_never_resizes() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let wallet = open(&mut state, &mut interaction, AppId::Wallet);
        let before = rect_of(&state, wallet);

        for action in [
            DesktopAction::BeginResize {
                window_id: wallet,
                edge: ResizeEdge::SouthEast,
                pointer: pointer(600, 500),
            },
            DesktopAction::UpdateResize {
                pointer: pointer(900, 800),
            },
            DesktopAction::EndResize,
            DesktopAction::ToggleMaximizeWindow {
                window_id: wallet,
                viewport: WindowRect {
                    x: 0,
                    y: 0,
                    w: 1920,
                    h: 1040,
                },
            },
        ] {
            reduce_desktop(&mut state, &mut interaction, action).expect("reduce");
        }

        assert_eq!(rect_of(&state, wallet), before);
        assert!(interaction.resizing.is_none());
    }

    #[test]
    fn grow_only_window_cannot_shrink_below_original() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let arena = open(&mut state, &mut interaction, AppId::Arena);
        let original = rect_of(&state, arena);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: arena,
                edge: ResizeEdge::East,
                pointer: pointer(800, 300),
            },
        )
        .expect("begin resize");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: pointer(500, 300),
            },
        )
        .expect("update resize");

        assert_eq!(rect_of(&state, arena).w, original.w);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: pointer(900, 300),
            },
        )
        .expect("update resize");

        assert_eq!(rect_of(&state, arena).w, original.w + 100);
    }

    #[test]
    fn default_minimum_applies_to_regular_windows() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let game = open(&mut state, &mut interaction, AppId::TicTacToe);
        let start = rect_of(&state, game);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: game,
                edge: ResizeEdge::North,
                pointer: pointer(0, 0),
            },
        )
        .expect("begin resize");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: pointer(0, 400),
            },
        )
        .expect("update resize");

        let rect = rect_of(&state, game);
        assert_eq!(rect.h, 400);
        assert_eq!(rect.y + rect.h, start.y + start.h);
    }

    #[test]
    fn drag_moves_by_pointer_delta() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let game = open(&mut state, &mut interaction, AppId::TicTacToe);
        let start = rect_of(&state, game);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: game,
                pointer: pointer(10, 10),
            },
        )
        .expect("begin move");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: pointer(50, 30),
            },
        )
        .expect("update move");
        let effects =
            reduce_desktop(&mut state, &mut interaction, DesktopAction::EndMove).expect("end move");

        assert_eq!(rect_of(&state, game), start.offset(40, 20));
        assert_eq!(effects, vec![RuntimeEffect::PersistLayout]);
        assert!(interaction.dragging.is_none());
    }

    #[test]
    fn stale_window_ids_are_ignored() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, AppId::Arena);
        let before = state.clone();
        let stale = WindowId(999);

        for action in [
            DesktopAction::CloseWindow { window_id: stale },
            DesktopAction::FocusWindow { window_id: stale },
            DesktopAction::MinimizeWindow { window_id: stale },
            DesktopAction::RestoreWindow { window_id: stale },
            DesktopAction::ToggleTaskbarWindow { window_id: stale },
            DesktopAction::BeginMove {
                window_id: stale,
                pointer: pointer(0, 0),
            },
        ] {
            let effects = reduce_desktop(&mut state, &mut interaction, action).expect("no error");
            assert!(effects.is_empty());
        }

        assert_eq!(state, before);
    }

    #[test]
    fn closing_active_window_leaves_no_active_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let first = open(&mut state, &mut interaction, AppId::Arena);
        let second = open(&mut state, &mut interaction, AppId::TicTacToe);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: second },
        )
        .expect("close");

        assert_eq!(state.active_window, None);
        assert_eq!(state.windows.len(), 1);
        assert_eq!(state.windows[0].id, first);
    }

    #[test]
    fn taskbar_toggle_cycles_focus_minimize_restore() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let first = open(&mut state, &mut interaction, AppId::Arena);
        open(&mut state, &mut interaction, AppId::TicTacToe);

        let toggle = DesktopAction::ToggleTaskbarWindow { window_id: first };

        reduce_desktop(&mut state, &mut interaction, toggle.clone()).expect("focus");
        assert_eq!(state.active_window, Some(first));

        reduce_desktop(&mut state, &mut interaction, toggle.clone()).expect("minimize");
        assert!(state.window(first).expect("window").minimized);
        assert_eq!(state.active_window, None);

        reduce_desktop(&mut state, &mut interaction, toggle).expect("restore");
        assert!(!state.window(first).expect("window").minimized);
        assert_eq!(state.active_window, Some(first));
    }

    #[test]
    fn maximize_toggle_restores_previous_rect() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let arena = open(&mut state, &mut interaction, AppId::Arena);
        let before = rect_of(&state, arena);
        let viewport = WindowRect {
            x: 0,
            y: 0,
            w: 1280,
            h: 720,
        };
        let toggle = DesktopAction::ToggleMaximizeWindow {
            window_id: arena,
            viewport,
        };

        reduce_desktop(&mut state, &mut interaction, toggle.clone()).expect("maximize");
        assert_eq!(rect_of(&state, arena), viewport);
        assert!(state.window(arena).expect("window").maximized);

        reduce_desktop(&mut state, &mut interaction, toggle).expect("restore");
        assert_eq!(rect_of(&state, arena), before);
        assert!(!state.window(arena).expect("window").maximized);
    }

    #[test]
    fn hydrate_keeps_topmost_windows_and_advances_ids() {
        let mut source = DesktopState::default();
        let mut interaction = InteractionState::default();
        for _ in 0..4 {
            open(&mut source, &mut interaction, AppId::TicTacToe);
        }
        let snapshot = source.snapshot();

        let mut state = DesktopState::default();
        state.preferences.max_restore_windows = 2;
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateSnapshot { snapshot },
        )
        .expect("hydrate");

        let ids = state.windows.iter().map(|w| w.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![WindowId(3), WindowId(4)]);
        assert_eq!(state.active_window, Some(WindowId(4)));
        assert_eq!(state.next_window_id, 5);
    }

    #[test]
    fn toggling_query_layout_persists_layout_to_new_backend() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let preferences = DesktopPreferences {
            query_state_layout: true,
            ..DesktopPreferences::default()
        };

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetPreferences { preferences },
        )
        .expect("set preferences");

        assert_eq!(
            effects,
            vec![RuntimeEffect::PersistPreferences, RuntimeEffect::PersistLayout]
        );
        assert!(state.preferences.query_state_layout);
    }
}
