use crate::model::WindowRect;

const FALLBACK_VIEWPORT_WIDTH: i32 = 1024;
const FALLBACK_VIEWPORT_HEIGHT: i32 = 768;

pub(super) fn desktop_viewport_rect(taskbar_height_px: i32) -> WindowRect {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_VIEWPORT_WIDTH);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);

            return viewport_from_inner_size(width, height, taskbar_height_px);
        }
    }

    viewport_from_inner_size(
        FALLBACK_VIEWPORT_WIDTH,
        FALLBACK_VIEWPORT_HEIGHT,
        taskbar_height_px,
    )
}

pub(super) fn launch_app_key(param: &str) -> Option<String> {
    // Consumed once so a reload restores the saved layout without reopening the app.
    #[cfg(target_arch = "wasm32")]
    {
        let key = crate::persistence::query_param(param)?;
        if let Err(err) = crate::persistence::replace_query_param(param, None) {
            leptos::logging::warn!("failed to clear `?{param}=`: {err}");
        }
        Some(key).filter(|key| !key.trim().is_empty())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = param;
        None
    }
}

fn viewport_from_inner_size(width: i32, height: i32, taskbar_height_px: i32) -> WindowRect {
    WindowRect {
        x: 0,
        y: 0,
        w: width.max(320),
        h: (height - taskbar_height_px).max(220),
    }
}
