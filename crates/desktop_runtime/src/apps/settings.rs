//! Desktop settings: background image, layout restore, and the experimental URL-backed layout.

use leptos::*;

use crate::{
    model::{DesktopPreferences, DEFAULT_BACKGROUND_IMAGE},
    reducer::DesktopAction,
    runtime_context::use_desktop_runtime,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BackgroundPreset {
    label: &'static str,
    url: &'static str,
}

const BACKGROUND_PRESETS: [BackgroundPreset; 3] = [
    BackgroundPreset {
        label: "Teal grid",
        url: DEFAULT_BACKGROUND_IMAGE,
    },
    BackgroundPreset {
        label: "Night arena",
        url: "/backgrounds/night-arena.png",
    },
    BackgroundPreset {
        label: "Clouds",
        url: "/backgrounds/clouds.png",
    },
];

const MAX_RESTORE_WINDOWS_LIMIT: usize = 12;

fn with_max_restore_windows(preferences: &DesktopPreferences, raw: &str) -> Option<DesktopPreferences> {
    let value = raw.trim().parse::<usize>().ok()?;
    Some(DesktopPreferences {
        max_restore_windows: value.min(MAX_RESTORE_WINDOWS_LIMIT),
        ..preferences.clone()
    })
}

#[component]
pub fn SettingsApp() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let preferences = create_memo(move |_| runtime.state.with(|desktop| desktop.preferences.clone()));

    let apply = move |update: &dyn Fn(&mut DesktopPreferences)| {
        let mut next = preferences.get_untracked();
        update(&mut next);
        runtime.dispatch_action(DesktopAction::SetPreferences { preferences: next });
    };

    view! {
        <div class="app-shell app-settings">
            <fieldset>
                <legend>"Background"</legend>
                {BACKGROUND_PRESETS
                    .into_iter()
                    .map(|preset| {
                        view! {
                            <label class="settings-radio">
                                <input
                                    type="radio"
                                    name="desktop-background"
                                    prop:checked=move || preferences.with(|p| p.background_image == preset.url)
                                    on:change=move |_| apply(&|p| p.background_image = preset.url.to_string())
                                />
                                <span>{preset.label}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>
            <fieldset>
                <legend>"Layout"</legend>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || preferences.with(|p| p.restore_on_boot)
                        on:change=move |ev| {
                            let enabled = event_target_checked(&ev);
                            apply(&|p| p.restore_on_boot = enabled);
                        }
                    />
                    "Restore windows on start"
                </label>
                <label>
                    "Windows to restore"
                    <input
                        type="number"
                        min="0"
                        max=MAX_RESTORE_WINDOWS_LIMIT.to_string()
                        prop:value=move || preferences.with(|p| p.max_restore_windows.to_string())
                        on:change=move |ev| {
                            let raw = event_target_value(&ev);
                            match with_max_restore_windows(&preferences.get_untracked(), &raw) {
                                Some(next) => runtime.dispatch_action(DesktopAction::SetPreferences { preferences: next }),
                                None => logging::warn!("ignoring restore window count `{raw}`"),
                            }
                        }
                    />
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || preferences.with(|p| p.query_state_layout)
                        on:change=move |ev| {
                            let enabled = event_target_checked(&ev);
                            apply(&|p| p.query_state_layout = enabled);
                        }
                    />
                    "Keep layout in the page URL (experimental)"
                </label>
            </fieldset>
        </div>
    }
}
