//! Headless floating "dispatch window" stack.
//!
//! Dispatch windows are short-lived overlay panels (confirmation prompts, pickers) that stack
//! above the mini-app that created them. They are managed independently of the outer desktop
//! window manager: z-order is a numeric property only, and insertion order never changes.

use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{PointerPosition, Position, Size};

/// Default origin for windows created without an explicit position.
pub const DEFAULT_DISPATCH_POSITION: Position = Position { x: 50, y: 50 };
/// Default size for windows created without an explicit size.
pub const DEFAULT_DISPATCH_SIZE: Size = Size {
    width: 400,
    height: 300,
};
/// Z-index assigned below the first created window.
pub const DISPATCH_BASE_Z_INDEX: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Unique identifier for a dispatch window within one provider.
pub struct DispatchWindowId(pub u64);

impl fmt::Display for DispatchWindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispatch-window-{}", self.0)
    }
}

/// Callback run after a dispatch window has been closed.
pub type OnClose = Rc<dyn Fn()>;

/// Creation request for [`DispatchWindowManager::create_dispatch_window`].
pub struct DispatchWindowConfig<V> {
    /// Title bar text.
    pub title: String,
    /// Window body.
    pub content: V,
    /// Initial origin; defaults to [`DEFAULT_DISPATCH_POSITION`].
    pub position: Option<Position>,
    /// Initial size; defaults to [`DEFAULT_DISPATCH_SIZE`].
    pub size: Option<Size>,
    /// Optional minimum width hint for the rendered frame.
    pub min_width: Option<i32>,
    /// Optional minimum height hint for the rendered frame.
    pub min_height: Option<i32>,
    /// Callback run when the window is closed.
    pub on_close: Option<OnClose>,
}

impl<V> DispatchWindowConfig<V> {
    /// Creates a config with default geometry and no close callback.
    pub fn new(title: impl Into<String>, content: V) -> Self {
        Self {
            title: title.into(),
            content,
            position: None,
            size: None,
            min_width: None,
            min_height: None,
            on_close: None,
        }
    }

    /// Sets the initial origin.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the initial size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the close callback.
    pub fn on_close(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(callback));
        self
    }
}

#[derive(Clone)]
/// A live dispatch window.
pub struct DispatchWindow<V> {
    /// Unique id.
    pub id: DispatchWindowId,
    /// Title bar text.
    pub title: String,
    /// Window body.
    pub content: V,
    /// Bumped every time [`DispatchWindowManager::set_content`] swaps the body.
    pub content_revision: u64,
    /// Current origin.
    pub position: Position,
    /// Current size.
    pub size: Size,
    /// Stacking order; larger values render above smaller ones.
    pub z_index: u32,
    /// Optional minimum width hint.
    pub min_width: Option<i32>,
    /// Optional minimum height hint.
    pub min_height: Option<i32>,
    /// Callback run when the window is closed.
    pub on_close: Option<OnClose>,
}

impl<V: fmt::Debug> fmt::Debug for DispatchWindow<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchWindow")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("z_index", &self.z_index)
            .field("has_on_close", &self.on_close.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DispatchDrag {
    window_id: DispatchWindowId,
    offset_x: i32,
    offset_y: i32,
}

/// Ordered collection of dispatch windows plus focus and drag state.
pub struct DispatchWindowManager<V> {
    windows: Vec<DispatchWindow<V>>,
    active_window_id: Option<DispatchWindowId>,
    max_z_index: u32,
    next_id: u64,
    drag: Option<DispatchDrag>,
}

impl<V> Default for DispatchWindowManager<V> {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            max_z_index: DISPATCH_BASE_Z_INDEX,
            next_id: 1,
            drag: None,
        }
    }
}

impl<V: Clone> Clone for DispatchWindowManager<V> {
    fn clone(&self) -> Self {
        Self {
            windows: self.windows.clone(),
            active_window_id: self.active_window_id,
            max_z_index: self.max_z_index,
            next_id: self.next_id,
            drag: self.drag,
        }
    }
}

impl<V> DispatchWindowManager<V> {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an id without creating a window.
    ///
    /// Used for two-phase construction, where content must capture its own window id.
    pub fn allocate_id(&mut self) -> DispatchWindowId {
        let id = DispatchWindowId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Creates a window, focuses it, and returns its id.
    pub fn create_dispatch_window(&mut self, config: DispatchWindowConfig<V>) -> DispatchWindowId {
        let id = self.allocate_id();
        self.attach(id, config);
        id
    }

    /// Creates a window whose config is built from its already-allocated id.
    pub fn create_dispatch_window_with(
        &mut self,
        build: impl FnOnce(DispatchWindowId) -> DispatchWindowConfig<V>,
    ) -> DispatchWindowId {
        let id = self.allocate_id();
        let config = build(id);
        self.attach(id, config);
        id
    }

    /// Attaches a window under an id previously returned by [`Self::allocate_id`].
    pub(crate) fn attach(&mut self, id: DispatchWindowId, config: DispatchWindowConfig<V>) {
        debug_assert!(id.0 < self.next_id, "{id} was never allocated");
        debug_assert!(self.window(id).is_none(), "{id} is already attached");
        self.max_z_index += 1;
        self.windows.push(DispatchWindow {
            id,
            title: config.title,
            content: config.content,
            content_revision: 0,
            position: config.position.unwrap_or(DEFAULT_DISPATCH_POSITION),
            size: config.size.unwrap_or(DEFAULT_DISPATCH_SIZE),
            z_index: self.max_z_index,
            min_width: config.min_width,
            min_height: config.min_height,
            on_close: config.on_close,
        });
        self.active_window_id = Some(id);
    }

    /// Removes a window and returns it so the caller can run its close callback.
    ///
    /// Unknown ids return `None` and leave focus untouched. Closing the focused window moves focus
    /// to the most recently added remaining window.
    pub fn close_dispatch_window(&mut self, id: DispatchWindowId) -> Option<DispatchWindow<V>> {
        let index = self.windows.iter().position(|w| w.id == id)?;
        let removed = self.windows.remove(index);
        if self.active_window_id == Some(id) {
            self.active_window_id = self.windows.last().map(|w| w.id);
        }
        if self.drag.map(|drag| drag.window_id) == Some(id) {
            self.drag = None;
        }
        Some(removed)
    }

    /// Raises a window above every other window and focuses it.
    ///
    /// Returns `false` for unknown ids.
    pub fn focus_dispatch_window(&mut self, id: DispatchWindowId) -> bool {
        let next_z = self.max_z_index + 1;
        let Some(window) = self.windows.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        window.z_index = next_z;
        self.max_z_index = next_z;
        self.active_window_id = Some(id);
        true
    }

    /// Replaces a window's content. Returns `false` for unknown ids.
    pub fn set_content(&mut self, id: DispatchWindowId, content: V) -> bool {
        match self.windows.iter_mut().find(|w| w.id == id) {
            Some(window) => {
                window.content = content;
                window.content_revision += 1;
                true
            }
            None => false,
        }
    }

    /// Starts dragging `id` from `pointer`, focusing the window.
    pub fn begin_drag(&mut self, id: DispatchWindowId, pointer: PointerPosition) -> bool {
        let Some(origin) = self.window(id).map(|w| w.position) else {
            return false;
        };
        self.focus_dispatch_window(id);
        self.drag = Some(DispatchDrag {
            window_id: id,
            offset_x: pointer.x - origin.x,
            offset_y: pointer.y - origin.y,
        });
        true
    }

    /// Moves the dragged window so the grab offset stays under `pointer`.
    ///
    /// Returns `false` when no drag is active or the dragged window has been closed.
    pub fn update_drag(&mut self, pointer: PointerPosition) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        match self.windows.iter_mut().find(|w| w.id == drag.window_id) {
            Some(window) => {
                window.position = Position {
                    x: pointer.x - drag.offset_x,
                    y: pointer.y - drag.offset_y,
                };
                true
            }
            None => {
                self.drag = None;
                false
            }
        }
    }

    /// Ends the active drag, if any.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Returns windows in insertion order.
    pub fn windows(&self) -> &[DispatchWindow<V>] {
        &self.windows
    }

    /// Returns a window by id.
    pub fn window(&self, id: DispatchWindowId) -> Option<&DispatchWindow<V>> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Returns the focused window id.
    pub fn active_dispatch_window_id(&self) -> Option<DispatchWindowId> {
        self.active_window_id
    }

    /// Returns `true` when `id` is focused and already stacked above every other window.
    pub fn is_focused_on_top(&self, id: DispatchWindowId) -> bool {
        self.active_window_id == Some(id)
            && self.window(id).map(|w| w.z_index) == Some(self.max_z_index)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn create(manager: &mut DispatchWindowManager<&'static str>, title: &str) -> DispatchWindowId {
        manager.create_dispatch_window(DispatchWindowConfig::new(title, "body"))
    }

    fn z_of(manager: &DispatchWindowManager<&'static str>, id: DispatchWindowId) -> u32 {
        manager.window(id).expect("window").z_index
    }

    #[test]
    fn creation_assigns_defaults_and_increasing_z_order() {
        let mut manager = DispatchWindowManager::new();
        let a = create(&mut manager, "A");
        let b = create(&mut manager, "B");
        let c = create(&mut manager, "C");

        assert!(z_of(&manager, a) < z_of(&manager, b));
        assert!(z_of(&manager, b) < z_of(&manager, c));
        assert_eq!(manager.active_dispatch_window_id(), Some(c));

        let window = manager.window(a).expect("window a");
        assert_eq!(window.position, DEFAULT_DISPATCH_POSITION);
        assert_eq!(window.size, DEFAULT_DISPATCH_SIZE);
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "dispatch-window-1");
    }

    #[test]
    fn focus_raises_without_reordering() {
        let mut manager = DispatchWindowManager::new();
        let a = create(&mut manager, "A");
        let b = create(&mut manager, "B");
        let c = create(&mut manager, "C");

        assert!(manager.focus_dispatch_window(a));

        assert!(z_of(&manager, a) > z_of(&manager, b));
        assert!(z_of(&manager, a) > z_of(&manager, c));
        assert_eq!(manager.active_dispatch_window_id(), Some(a));
        let order: Vec<_> = manager.windows().iter().map(|w| w.id).collect();
        assert_eq!(order, vec![a, b, c]);
        assert!(!manager.focus_dispatch_window(DispatchWindowId(99)));
    }

    #[test]
    fn closing_focused_window_refocuses_last_remaining() {
        let mut manager = DispatchWindowManager::new();
        let a = create(&mut manager, "A");
        let b = create(&mut manager, "B");
        let c = create(&mut manager, "C");

        assert!(manager.close_dispatch_window(c).is_some());
        assert_eq!(manager.active_dispatch_window_id(), Some(b));

        manager.focus_dispatch_window(a);
        manager.close_dispatch_window(b);
        assert_eq!(manager.active_dispatch_window_id(), Some(a));

        manager.close_dispatch_window(a);
        assert_eq!(manager.active_dispatch_window_id(), None);
    }

    #[test]
    fn closing_unknown_id_is_inert() {
        let mut manager = DispatchWindowManager::new();
        let a = create(&mut manager, "A");
        let b = create(&mut manager, "B");

        assert!(manager.close_dispatch_window(DispatchWindowId(42)).is_none());
        assert_eq!(manager.windows().len(), 2);
        assert_eq!(manager.active_dispatch_window_id(), Some(b));
        assert!(manager.window(a).is_some());
    }

    #[test]
    fn closed_window_carries_its_close_callback() {
        let mut manager = DispatchWindowManager::new();
        let closed = Rc::new(Cell::new(false));
        let id = manager.create_dispatch_window(DispatchWindowConfig::new("Prompt", "body").on_close({
            let closed = closed.clone();
            move || closed.set(true)
        }));

        let removed = manager.close_dispatch_window(id).expect("removed window");
        if let Some(on_close) = removed.on_close {
            on_close();
        }
        assert!(closed.get());
    }

    #[test]
    fn builder_receives_its_own_id() {
        let mut manager: DispatchWindowManager<String> = DispatchWindowManager::new();
        let id = manager.create_dispatch_window_with(|id| {
            DispatchWindowConfig::new("Select character", format!("close:{id}"))
        });

        assert_eq!(
            manager.window(id).map(|w| w.content.clone()),
            Some(format!("close:{id}"))
        );
    }

    #[test]
    fn refocused_survivor_is_not_on_top_until_focused() {
        let mut manager = DispatchWindowManager::new();
        let a = create(&mut manager, "A");
        let b = create(&mut manager, "B");
        let c = create(&mut manager, "C");
        manager.focus_dispatch_window(a);
        manager.focus_dispatch_window(c);

        manager.close_dispatch_window(c);
        assert_eq!(manager.active_dispatch_window_id(), Some(b));
        assert!(z_of(&manager, b) < z_of(&manager, a));
        assert!(!manager.is_focused_on_top(b));

        manager.focus_dispatch_window(b);
        assert!(z_of(&manager, b) > z_of(&manager, a));
        assert!(manager.is_focused_on_top(b));
    }

    #[test]
    fn content_swap_bumps_revision_and_ignores_unknown_ids() {
        let mut manager = DispatchWindowManager::new();
        let a = create(&mut manager, "A");
        let before = manager.window(a).map(|w| (w.position, w.z_index));

        assert!(manager.set_content(a, "confirm"));
        let window = manager.window(a).expect("window a");
        assert_eq!(window.content, "confirm");
        assert_eq!(window.content_revision, 1);
        assert_eq!(Some((window.position, window.z_index)), before);

        assert!(!manager.set_content(DispatchWindowId(99), "lost"));
        assert_eq!(manager.window(a).map(|w| w.content_revision), Some(1));
    }

    #[test]
    #[should_panic(expected = "already attached")]
    fn attaching_a_live_id_twice_is_rejected() {
        let mut manager = DispatchWindowManager::new();
        let a = create(&mut manager, "A");
        manager.attach(a, DispatchWindowConfig::new("A again", "body"));
    }

    #[test]
    #[should_panic(expected = "never allocated")]
    fn attaching_an_unallocated_id_is_rejected() {
        let mut manager: DispatchWindowManager<&'static str> = DispatchWindowManager::new();
        manager.attach(DispatchWindowId(7), DispatchWindowConfig::new("A", "body"));
    }

    #[test]
    fn drag_tracks_grab_offset_and_focuses() {
        let mut manager = DispatchWindowManager::new();
        let a = manager.create_dispatch_window(
            DispatchWindowConfig::new("A", "body").with_position(Position { x: 100, y: 80 }),
        );
        let b = create(&mut manager, "B");

        assert!(manager.begin_drag(a, PointerPosition { x: 110, y: 90 }));
        assert_eq!(manager.active_dispatch_window_id(), Some(a));
        assert!(z_of(&manager, a) > z_of(&manager, b));

        assert!(manager.update_drag(PointerPosition { x: 210, y: 40 }));
        assert_eq!(
            manager.window(a).map(|w| w.position),
            Some(Position { x: 200, y: 30 })
        );

        manager.end_drag();
        assert!(!manager.update_drag(PointerPosition { x: 0, y: 0 }));
        assert_eq!(
            manager.window(a).map(|w| w.position),
            Some(Position { x: 200, y: 30 })
        );
    }

    #[test]
    fn drag_stops_once_window_is_closed() {
        let mut manager = DispatchWindowManager::new();
        let a = create(&mut manager, "A");

        manager.begin_drag(a, PointerPosition { x: 60, y: 60 });
        manager.close_dispatch_window(a);

        assert!(!manager.is_dragging());
        assert!(!manager.update_drag(PointerPosition { x: 300, y: 300 }));
        assert!(!manager.begin_drag(a, PointerPosition { x: 0, y: 0 }));
    }
}
