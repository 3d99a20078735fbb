//! Host-side runtime helpers for executing reducer effects and querying browser environment state.

mod boot;
mod host_ui;
mod persistence_effects;

use leptos::Callback;

use crate::{
    model::{DesktopPreferences, WindowRect},
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

/// Height reserved at the bottom of the desktop for the taskbar.
pub const TASKBAR_HEIGHT_PX: i32 = 38;
/// Query parameter naming an app to open at boot, e.g. `?app=arena`.
pub const LAUNCH_QUERY_PARAM: &str = "app";

#[derive(Clone, Copy, Debug, Default)]
/// Browser boundary for desktop runtime side effects.
pub struct DesktopHostContext;

impl DesktopHostContext {
    /// Restores the persisted layout when the preferences allow it.
    pub fn install_boot_hydration(
        &self,
        preferences: &DesktopPreferences,
        dispatch: Callback<DesktopAction>,
    ) {
        boot::install_boot_hydration(preferences, dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistLayout => persistence_effects::persist_layout(runtime),
            RuntimeEffect::PersistPreferences => persistence_effects::persist_preferences(runtime),
        }
    }

    /// Returns the app key requested through [`LAUNCH_QUERY_PARAM`], if any.
    pub fn launch_app_key(&self) -> Option<String> {
        host_ui::launch_app_key(LAUNCH_QUERY_PARAM)
    }

    /// Returns the desktop area available to windows, excluding the taskbar.
    pub fn desktop_viewport_rect(&self) -> WindowRect {
        host_ui::desktop_viewport_rect(TASKBAR_HEIGHT_PX)
    }
}
