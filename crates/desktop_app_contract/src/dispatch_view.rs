//! Leptos provider and overlay rendering for dispatch windows.

use std::rc::Rc;

use leptos::*;

use crate::{
    dispatch::{DispatchWindow, DispatchWindowConfig, DispatchWindowId, DispatchWindowManager},
    gesture::{pointer_from_mouse_event, PointerGesture},
    PointerPosition,
};

#[derive(Clone)]
/// Body of a dispatch window.
pub struct DispatchContent(Rc<dyn Fn() -> View>);

impl DispatchContent {
    /// Wraps a view factory.
    pub fn new(render: impl Fn() -> View + 'static) -> Self {
        Self(Rc::new(render))
    }

    /// Builds the view.
    pub fn render(&self) -> View {
        (self.0)()
    }
}

impl std::fmt::Debug for DispatchContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DispatchContent")
    }
}

#[derive(Clone, Copy)]
/// Context exposed by [`DispatchWindowProvider`].
pub struct DispatchWindowsContext {
    manager: RwSignal<DispatchWindowManager<DispatchContent>>,
    gesture: PointerGesture,
}

impl DispatchWindowsContext {
    /// Creates and focuses a window, returning its id.
    ///
    /// Returns `None` when the provider has already been disposed.
    pub fn create_dispatch_window(
        &self,
        config: DispatchWindowConfig<DispatchContent>,
    ) -> Option<DispatchWindowId> {
        self.create_dispatch_window_with(move |_| config)
    }

    /// Creates a window whose content is built with its own id, for self-closing panels.
    ///
    /// Returns `None` when the provider has already been disposed.
    pub fn create_dispatch_window_with(
        &self,
        build: impl FnOnce(DispatchWindowId) -> DispatchWindowConfig<DispatchContent>,
    ) -> Option<DispatchWindowId> {
        let Some(id) = self.manager.try_update(|manager| manager.allocate_id()) else {
            logging::warn!("dispatch window requested after its provider was disposed");
            return None;
        };
        let config = build(id);
        self.manager
            .try_update(|manager| manager.attach(id, config))
            .map(|()| id)
    }

    /// Closes a window and runs its close callback. Unknown ids are ignored.
    pub fn close_dispatch_window(&self, id: DispatchWindowId) {
        let known = self
            .manager
            .try_with_untracked(|manager| manager.window(id).is_some())
            .unwrap_or(false);
        if !known {
            return;
        }

        let removed = self
            .manager
            .try_update(|manager| manager.close_dispatch_window(id))
            .flatten();
        let dragging = self
            .manager
            .try_with_untracked(|manager| manager.is_dragging())
            .unwrap_or(false);
        if self.gesture.is_active() && !dragging {
            self.gesture.release();
        }
        if let Some(on_close) = removed.and_then(|window| window.on_close) {
            on_close();
        }
    }

    /// Raises and focuses a window. Unknown ids are ignored.
    pub fn focus_dispatch_window(&self, id: DispatchWindowId) {
        let needs_raise = self
            .manager
            .try_with_untracked(|manager| {
                manager.window(id).is_some() && !manager.is_focused_on_top(id)
            })
            .unwrap_or(false);
        if needs_raise {
            self.manager
                .try_update(|manager| manager.focus_dispatch_window(id));
        }
    }

    /// Replaces a window's body. Returns `false` for unknown ids.
    pub fn set_dispatch_content(&self, id: DispatchWindowId, content: DispatchContent) -> bool {
        let known = self
            .manager
            .try_with_untracked(|manager| manager.window(id).is_some())
            .unwrap_or(false);
        known
            && self
                .manager
                .try_update(|manager| manager.set_content(id, content))
                .unwrap_or(false)
    }

    /// Reactive read of the focused window id.
    pub fn active_dispatch_window_id(&self) -> Option<DispatchWindowId> {
        self.manager
            .with(|manager| manager.active_dispatch_window_id())
    }

    /// Reactive read of all windows in insertion order.
    pub fn dispatch_windows(&self) -> Vec<DispatchWindow<DispatchContent>> {
        self.manager.with(|manager| manager.windows().to_vec())
    }

    /// Reactive read of one window.
    pub fn dispatch_window(&self, id: DispatchWindowId) -> Option<DispatchWindow<DispatchContent>> {
        self.manager.with(|manager| manager.window(id).cloned())
    }

    fn window_ids(&self) -> Vec<DispatchWindowId> {
        self.manager
            .with(|manager| manager.windows().iter().map(|w| w.id).collect())
    }

    fn begin_drag(&self, id: DispatchWindowId, pointer: PointerPosition) {
        let started = self
            .manager
            .try_update(|manager| manager.begin_drag(id, pointer))
            .unwrap_or(false);
        if !started {
            return;
        }

        let manager = self.manager;
        self.gesture.start(
            move |pointer| {
                let dragging = manager.with_untracked(|m| m.is_dragging());
                if dragging {
                    manager.update(|m| {
                        m.update_drag(pointer);
                    });
                }
            },
            move |_| manager.update(|m| m.end_drag()),
        );
    }
}

impl DispatchWindowsContext {
    fn new() -> Self {
        Self {
            manager: create_rw_signal(DispatchWindowManager::new()),
            gesture: PointerGesture::new(),
        }
    }
}

#[component]
/// Provides [`DispatchWindowsContext`] and renders the dispatch-window overlay above `children`.
pub fn DispatchWindowProvider(children: Children) -> impl IntoView {
    let context = DispatchWindowsContext::new();
    provide_context(context);

    view! {
        {children()}
        <div class="dispatch-window-layer" data-ui-kind="dispatch-window-layer">
            <For
                each=move || context.window_ids()
                key=|id| id.0
                let:id
            >
                <DispatchWindowFrame window_id=id />
            </For>
        </div>
    }
}

/// Returns the nearest [`DispatchWindowsContext`].
///
/// # Panics
///
/// Panics if called outside [`DispatchWindowProvider`].
pub fn use_dispatch_windows() -> DispatchWindowsContext {
    use_context::<DispatchWindowsContext>()
        .expect("use_dispatch_windows must be used within a DispatchWindowProvider")
}

#[component]
fn DispatchWindowFrame(window_id: DispatchWindowId) -> impl IntoView {
    let context = use_dispatch_windows();
    let manager = context.manager;

    let frame_style = move || {
        manager.with(|m| {
            m.window(window_id).map(|w| {
                let mut style = format!(
                    "position:fixed;left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    w.position.x, w.position.y, w.size.width, w.size.height, w.z_index
                );
                if let Some(min_width) = w.min_width {
                    style.push_str(&format!("min-width:{min_width}px;"));
                }
                if let Some(min_height) = w.min_height {
                    style.push_str(&format!("min-height:{min_height}px;"));
                }
                style
            })
        })
    };
    let title = move || {
        manager.with(|m| m.window(window_id).map(|w| w.title.clone()).unwrap_or_default())
    };
    let is_active = move || context.active_dispatch_window_id() == Some(window_id);

    // Re-render the body only when content is swapped, not on every drag frame.
    let content_revision = create_memo(move |_| {
        manager.with(|m| m.window(window_id).map(|w| w.content_revision))
    });
    let body = move || {
        content_revision.get()?;
        manager
            .with_untracked(|m| m.window(window_id).map(|w| w.content.clone()))
            .map(|content| content.render())
    };

    let on_frame_mousedown = move |_: web_sys::MouseEvent| context.focus_dispatch_window(window_id);
    let on_titlebar_mousedown = move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        context.begin_drag(window_id, pointer_from_mouse_event(&ev));
    };

    view! {
        <section
            class=move || if is_active() { "dispatch-window focused" } else { "dispatch-window" }
            style=frame_style
            role="dialog"
            aria-label=title
            on:mousedown=on_frame_mousedown
        >
            <header class="titlebar" on:mousedown=on_titlebar_mousedown>
                <span class="titlebar-title">{title}</span>
                <button
                    class="titlebar-close"
                    aria-label="Close window"
                    on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:click=move |_| context.close_dispatch_window(window_id)
                >
                    "×"
                </button>
            </header>
            <div class="dispatch-window-body">{body}</div>
        </section>
    }
}
