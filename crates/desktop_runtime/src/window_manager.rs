//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{DesktopState, ResizeEdge, WindowId, WindowRecord, WindowRect};

/// Minimum width for windows that are not `grow_only`.
pub const DEFAULT_MIN_WINDOW_WIDTH: i32 = 450;
/// Minimum height for windows that are not `grow_only`.
pub const DEFAULT_MIN_WINDOW_HEIGHT: i32 = 400;
/// Down-right offset applied per already-open window when opening a new one.
pub const WINDOW_STAGGER_PX: i32 = 30;

/// Returns the cascaded origin for a window opened while `open_count` windows exist.
pub fn staggered_rect(default_rect: WindowRect, open_count: usize) -> WindowRect {
    let step = WINDOW_STAGGER_PX.saturating_mul(open_count as i32);
    default_rect.offset(step, step)
}

/// Returns the smallest size a resize gesture may produce for `window`.
pub fn min_window_size(window: &WindowRecord) -> (i32, i32) {
    if window.flags.grow_only {
        (window.original_rect.w, window.original_rect.h)
    } else {
        (DEFAULT_MIN_WINDOW_WIDTH, DEFAULT_MIN_WINDOW_HEIGHT)
    }
}

/// Moves `window_id` to the top of the stack and marks it active.
///
/// Returns `false` when the window no longer exists.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    let Some(index) = state.windows.iter().position(|w| w.id == window_id) else {
        return false;
    };

    let already_top = index + 1 == state.windows.len() && state.active_window == Some(window_id);
    if !already_top {
        let window = state.windows.remove(index);
        state.windows.push(window);
    }
    state.active_window = Some(window_id);
    normalize_window_stack(state);
    true
}

/// Re-derives z-indices from stack order and drops an `active_window` that no longer exists.
pub fn normalize_window_stack(state: &mut DesktopState) {
    for (idx, window) in state.windows.iter_mut().enumerate() {
        window.z_index = (idx + 1) as u32;
    }
    if let Some(active) = state.active_window {
        if !state.windows.iter().any(|w| w.id == active) {
            state.active_window = None;
        }
    }
}

/// Applies resize deltas for a given edge/corner drag. Arithmetic saturates so hand-edited
/// layouts near the `i32` limits cannot overflow.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let east = start.w.saturating_add(dx);
    let south = start.h.saturating_add(dy);
    let (west_x, west_w) = (start.x.saturating_add(dx), start.w.saturating_sub(dx));
    let (north_y, north_h) = (start.y.saturating_add(dy), start.h.saturating_sub(dy));
    match edge {
        ResizeEdge::East => WindowRect { w: east, ..start },
        ResizeEdge::West => WindowRect {
            x: west_x,
            w: west_w,
            ..start
        },
        ResizeEdge::South => WindowRect { h: south, ..start },
        ResizeEdge::North => WindowRect {
            y: north_y,
            h: north_h,
            ..start
        },
        ResizeEdge::NorthEast => WindowRect {
            y: north_y,
            h: north_h,
            w: east,
            ..start
        },
        ResizeEdge::NorthWest => WindowRect {
            x: west_x,
            y: north_y,
            w: west_w,
            h: north_h,
        },
        ResizeEdge::SouthEast => WindowRect {
            w: east,
            h: south,
            ..start
        },
        ResizeEdge::SouthWest => WindowRect {
            x: west_x,
            w: west_w,
            h: south,
            ..start
        },
    }
}

/// Resizes from `start` and clamps to `(min_w, min_h)`, keeping the edge opposite the dragged
/// one anchored.
pub fn resize_rect_clamped(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    (min_w, min_h): (i32, i32),
) -> WindowRect {
    let mut rect = resize_rect(start, edge, dx, dy);
    if rect.w < min_w {
        rect.w = min_w;
        if edge.moves_west() {
            rect.x = start.x.saturating_add(start.w).saturating_sub(min_w);
        }
    }
    if rect.h < min_h {
        rect.h = min_h;
        if edge.moves_north() {
            rect.y = start.y.saturating_add(start.h).saturating_sub(min_h);
        }
    }
    rect
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const START: WindowRect = WindowRect {
        x: 100,
        y: 100,
        w: 500,
        h: 450,
    };

    #[test]
    fn stagger_offsets_by_open_count() {
        let base = WindowRect {
            x: 40,
            y: 40,
            w: 600,
            h: 480,
        };
        assert_eq!(staggered_rect(base, 0), base);
        assert_eq!(staggered_rect(base, 2), base.offset(60, 60));
    }

    #[test]
    fn west_resize_keeps_east_edge_anchored_at_minimum() {
        let rect = resize_rect_clamped(START, ResizeEdge::West, 200, 0, (450, 400));

        assert_eq!(rect.w, 450);
        assert_eq!(rect.x + rect.w, START.x + START.w);
    }

    #[test]
    fn north_west_resize_clamps_both_axes() {
        let rect = resize_rect_clamped(START, ResizeEdge::NorthWest, 300, 300, (450, 400));

        assert_eq!(
            rect,
            WindowRect {
                x: 150,
                y: 150,
                w: 450,
                h: 400,
            }
        );
    }

    #[test]
    fn south_east_growth_is_unclamped() {
        let rect = resize_rect_clamped(START, ResizeEdge::SouthEast, 40, 25, (450, 400));

        assert_eq!(rect.w, 540);
        assert_eq!(rect.h, 475);
        assert_eq!(rect.x, START.x);
    }

    #[test]
    fn extreme_rects_saturate_instead_of_overflowing() {
        let far = WindowRect {
            x: i32::MAX - 10,
            y: i32::MAX - 10,
            w: i32::MAX - 5,
            h: 500,
        };

        assert_eq!(far.offset(100, 100).x, i32::MAX);
        let grown = resize_rect_clamped(far, ResizeEdge::SouthEast, 100, 0, (450, 400));
        assert_eq!(grown.w, i32::MAX);
        let shrunk = resize_rect_clamped(far, ResizeEdge::West, i32::MIN, 0, (450, 400));
        assert_eq!(shrunk.x, -11);
        assert_eq!(shrunk.w, i32::MAX);
    }
}
