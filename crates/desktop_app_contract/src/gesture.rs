//! Document-level pointer listeners scoped to a single drag or resize gesture.

use leptos::{
    ev, leptos_dom::helpers::WindowListenerHandle, on_cleanup, store_value, window_event_listener,
    StoredValue,
};

use crate::PointerPosition;

/// Converts a mouse event into client-space pointer coordinates.
pub fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

#[derive(Clone, Copy)]
/// Owner of the `mousemove`/`mouseup` listeners for the gesture in progress.
///
/// At most one gesture is live per tracker. Listeners are removed on mouse-up, when a new gesture
/// starts, and when the owning component is cleaned up.
pub struct PointerGesture {
    handles: StoredValue<Vec<WindowListenerHandle>>,
}

impl PointerGesture {
    /// Creates a tracker bound to the current reactive owner.
    pub fn new() -> Self {
        let gesture = Self {
            handles: store_value(Vec::new()),
        };
        on_cleanup(move || gesture.release());
        gesture
    }

    /// Attaches listeners for a new gesture, releasing any previous one first.
    pub fn start(
        self,
        on_move: impl Fn(PointerPosition) + 'static,
        on_end: impl Fn(PointerPosition) + 'static,
    ) {
        self.release();

        let move_handle = window_event_listener(ev::mousemove, move |ev| {
            on_move(pointer_from_mouse_event(&ev));
        });
        let up_handle = window_event_listener(ev::mouseup, move |ev| {
            on_end(pointer_from_mouse_event(&ev));
            self.release();
        });

        self.handles.update_value(|handles| {
            handles.push(move_handle);
            handles.push(up_handle);
        });
    }

    /// Removes every listener owned by the current gesture.
    pub fn release(self) {
        let handles = self
            .handles
            .try_update_value(std::mem::take)
            .unwrap_or_default();
        for handle in handles {
            handle.remove();
        }
    }

    /// Returns `true` while listeners are attached.
    pub fn is_active(self) -> bool {
        self.handles
            .try_with_value(|handles| !handles.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PointerGesture {
    fn default() -> Self {
        Self::new()
    }
}
