use leptos::{logging, Callable, Callback};

use crate::{
    model::DesktopPreferences,
    persistence::{self, LayoutBackend},
    reducer::DesktopAction,
};

pub(super) fn install_boot_hydration(
    preferences: &DesktopPreferences,
    dispatch: Callback<DesktopAction>,
) {
    if !preferences.restore_on_boot {
        logging::log!("layout restore disabled; starting with an empty desktop");
        return;
    }

    let backend = LayoutBackend::for_preferences(preferences);
    if let Some(snapshot) = persistence::load_layout_snapshot(backend) {
        dispatch.call(DesktopAction::HydrateSnapshot { snapshot });
    }
}
