use leptos::{logging, SignalWithUntracked};

use crate::{persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_layout(runtime: DesktopRuntimeContext) {
    runtime.state.with_untracked(|state| {
        if let Err(err) = persistence::persist_layout_snapshot(state) {
            logging::warn!("persist layout failed: {err}");
        }
    });
}

pub(super) fn persist_preferences(runtime: DesktopRuntimeContext) {
    runtime.state.with_untracked(|state| {
        if let Err(err) = persistence::persist_preferences(&state.preferences) {
            logging::warn!("persist preferences failed: {err}");
        }
    });
}
